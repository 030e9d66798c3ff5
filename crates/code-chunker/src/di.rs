use crate::types::{ChunkKind, ChunkMetadata, CodeChunk};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// DI frameworks recognized in Android projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiFramework {
    Dagger,
    Hilt,
    Koin,
}

impl DiFramework {
    /// Get framework name as string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dagger => "dagger",
            Self::Hilt => "hilt",
            Self::Koin => "koin",
        }
    }
}

/// A DI declaration found in a file, anchored to its line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiSymbol {
    pub name: String,
    pub line: usize,
}

/// Result of DI analysis for a single file
#[derive(Debug, Clone)]
pub struct DiAnalysis {
    pub framework: DiFramework,
    pub components: Vec<DiSymbol>,
    pub modules: Vec<DiSymbol>,
    pub providers: Vec<DiSymbol>,
    pub injection_points: Vec<String>,
}

/// Detects DI framework usage and extracts its declarations
pub struct DiAnalyzer {
    dagger_component_name: Regex,
    hilt_name: Regex,
    koin_markers: Regex,
    component: Regex,
    module: Regex,
    provides: Regex,
    inject: Regex,
    koin_module: Regex,
    koin_provider: Regex,
}

const DAGGER_ANNOTATIONS: &[&str] = &["@Inject", "@Provides", "@Binds", "@Module", "@Component"];
const HILT_ANNOTATIONS: &[&str] = &["@HiltAndroidApp", "@AndroidEntryPoint", "@HiltViewModel"];

impl DiAnalyzer {
    pub fn new() -> Self {
        Self {
            dagger_component_name: compile(r"Dagger[A-Z]\w*Component"),
            hilt_name: compile(r"Hilt[A-Z]\w*"),
            koin_markers: compile(r"startKoin|module\s*\{|single\s*\{|factory\s*\{"),
            component: compile(
                r"@Component(?:\([^)]*\))?\s+(?:public\s+)?(?:interface|abstract\s+class)\s+(\w+)",
            ),
            module: compile(
                r"@Module(?:\([^)]*\))?\s+(?:public\s+)?(?:class|interface|object|abstract\s+class)\s+(\w+)",
            ),
            provides: compile(r"@Provides\s+(?:\w+\s+)*?fun\s+(\w+)"),
            inject: compile(r"@Inject\s+(?:lateinit\s+var|val|var)\s+(\w+)"),
            koin_module: compile(r"val\s+(\w+)\s*=\s*module\s*\{"),
            koin_provider: compile(r"(?:single|factory)\s*\{[^}]*?\b(\w+)\s*\("),
        }
    }

    /// Analyze a file for DI framework usage. Returns None when no framework
    /// shows up in the content.
    pub fn analyze(&self, content: &str) -> Option<DiAnalysis> {
        let framework = self.detect(content)?;

        let mut analysis = DiAnalysis {
            framework,
            components: Vec::new(),
            modules: Vec::new(),
            providers: Vec::new(),
            injection_points: Vec::new(),
        };

        match framework {
            DiFramework::Dagger | DiFramework::Hilt => {
                analysis.components = capture_symbols(&self.component, content);
                analysis.modules = capture_symbols(&self.module, content);
                analysis.providers = capture_symbols(&self.provides, content);
                analysis.injection_points = self
                    .inject
                    .captures_iter(content)
                    .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
                    .collect();
            }
            DiFramework::Koin => {
                analysis.modules = capture_symbols(&self.koin_module, content);
                analysis.providers = capture_symbols(&self.koin_provider, content);
            }
        }

        Some(analysis)
    }

    fn detect(&self, content: &str) -> Option<DiFramework> {
        if DAGGER_ANNOTATIONS.iter().any(|a| content.contains(a))
            || self.dagger_component_name.is_match(content)
        {
            return Some(DiFramework::Dagger);
        }
        if HILT_ANNOTATIONS.iter().any(|a| content.contains(a))
            || self.hilt_name.is_match(content)
        {
            return Some(DiFramework::Hilt);
        }
        if self.koin_markers.is_match(content) {
            return Some(DiFramework::Koin);
        }
        None
    }
}

impl Default for DiAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a DI analysis into chunks (components, modules, providers)
pub(crate) fn di_chunks(analysis: &DiAnalysis, file_path: &str) -> Vec<CodeChunk> {
    let mut chunks = Vec::new();
    let groups = [
        (ChunkKind::DiComponent, &analysis.components),
        (ChunkKind::DiModule, &analysis.modules),
        (ChunkKind::DiProvider, &analysis.providers),
    ];

    for (kind, symbols) in groups {
        for symbol in symbols.iter() {
            let metadata = ChunkMetadata::new(kind)
                .symbol_name(symbol.name.clone())
                .framework(analysis.framework.as_str())
                .estimated_tokens(ChunkMetadata::estimate_tokens_from_content(&symbol.name));
            chunks.push(CodeChunk::new(
                file_path.to_string(),
                symbol.line,
                symbol.line,
                symbol.name.clone(),
                metadata,
            ));
        }
    }

    chunks
}

fn capture_symbols(pattern: &Regex, content: &str) -> Vec<DiSymbol> {
    pattern
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(DiSymbol {
                name: name.as_str().to_string(),
                line: line_of_offset(content, whole.start()),
            })
        })
        .collect()
}

fn line_of_offset(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static DI pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HILT_FILE: &str = r#"
@HiltViewModel
class UserViewModel @Inject constructor(
    private val repository: UserRepository
) : ViewModel() {
    @Inject lateinit var logger: Logger
}
"#;

    const DAGGER_FILE: &str = r#"
@Component(modules = [AppModule::class])
interface AppComponent {
    fun inject(activity: MainActivity)
}

@Module
class AppModule {
    @Provides fun provideRepository(): UserRepository = UserRepository()
}
"#;

    const KOIN_FILE: &str = r#"
val appModule = module {
    single { UserRepository() }
    factory { UserViewModel(get()) }
}
"#;

    #[test]
    fn detects_dagger_before_hilt_on_shared_annotations() {
        // @Inject belongs to both stacks; detection order keeps Dagger first
        let analyzer = DiAnalyzer::new();
        let analysis = analyzer.analyze(DAGGER_FILE).unwrap();
        assert_eq!(analysis.framework, DiFramework::Dagger);
    }

    #[test]
    fn detects_hilt_annotations() {
        let analyzer = DiAnalyzer::new();
        let content = "@HiltAndroidApp\nclass App : Application()";
        let analysis = analyzer.analyze(content).unwrap();
        assert_eq!(analysis.framework, DiFramework::Hilt);
    }

    #[test]
    fn extracts_dagger_declarations() {
        let analyzer = DiAnalyzer::new();
        let analysis = analyzer.analyze(DAGGER_FILE).unwrap();

        assert_eq!(analysis.components.len(), 1);
        assert_eq!(analysis.components[0].name, "AppComponent");
        assert_eq!(analysis.modules.len(), 1);
        assert_eq!(analysis.modules[0].name, "AppModule");
        assert_eq!(analysis.providers.len(), 1);
        assert_eq!(analysis.providers[0].name, "provideRepository");
    }

    #[test]
    fn extracts_injection_points() {
        let analyzer = DiAnalyzer::new();
        let analysis = analyzer.analyze(HILT_FILE).unwrap();
        assert!(analysis.injection_points.contains(&"logger".to_string()));
    }

    #[test]
    fn extracts_koin_modules_and_providers() {
        let analyzer = DiAnalyzer::new();
        let analysis = analyzer.analyze(KOIN_FILE).unwrap();

        assert_eq!(analysis.framework, DiFramework::Koin);
        assert_eq!(analysis.modules.len(), 1);
        assert_eq!(analysis.modules[0].name, "appModule");
        assert!(!analysis.providers.is_empty());
    }

    #[test]
    fn plain_code_has_no_di_analysis() {
        let analyzer = DiAnalyzer::new();
        assert!(analyzer.analyze("class Plain { fun f() = 1 }").is_none());
    }

    #[test]
    fn di_chunks_carry_framework_metadata() {
        let analyzer = DiAnalyzer::new();
        let analysis = analyzer.analyze(DAGGER_FILE).unwrap();
        let chunks = di_chunks(&analysis, "AppComponent.kt");

        assert_eq!(chunks.len(), 3);
        assert!(chunks
            .iter()
            .all(|c| c.metadata.framework.as_deref() == Some("dagger")));
        assert!(chunks
            .iter()
            .any(|c| c.metadata.kind == ChunkKind::DiComponent && c.content == "AppComponent"));
    }
}
