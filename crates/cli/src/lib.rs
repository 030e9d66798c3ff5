//! `droid-context` command line interface.
//!
//! ```text
//! droid-context <project_path> --index [--incremental]
//! droid-context <project_path> --query "<question>" --openai-key <key>
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use droid_indexer::{state_path, IndexEvent, IndexMode, IndexState, ProjectIndexer};
use droid_rag::{OpenAiClient, RagEngine, DEFAULT_BASE_URL, DEFAULT_MODEL};
use droid_search::{ContextRetrievalEngine, HybridSearch};
use droid_vector_store::VectorStore;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Queries trigger an incremental re-index when the index is older than this
const REINDEX_AFTER_SECS: u64 = 3600;

#[derive(Parser)]
#[command(name = "droid-context")]
#[command(about = "Codebase-aware AI assistant for Android projects", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Android project root
    project_path: PathBuf,

    /// Index the project
    #[arg(long)]
    index: bool,

    /// Perform incremental indexing instead of a full rebuild
    #[arg(long)]
    incremental: bool,

    /// Natural-language query about the codebase
    #[arg(long)]
    query: Option<String>,

    /// OpenAI API key (falls back to the OPENAI_API_KEY environment variable)
    #[arg(long)]
    openai_key: Option<String>,

    /// OpenAI-compatible endpoint base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    openai_url: String,

    /// Chat model id
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum chunks retrieved per query
    #[arg(long, default_value_t = 15)]
    limit: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if !cli.index && cli.query.is_none() {
        bail!("Nothing to do: pass --index and/or --query");
    }

    if cli.index {
        let mode = if cli.incremental {
            IndexMode::Incremental
        } else {
            IndexMode::Full
        };
        run_index(&cli, mode).await?;
    }

    if let Some(query) = &cli.query {
        run_query(&cli, query).await?;
    }

    Ok(())
}

async fn run_index(cli: &Cli, mode: IndexMode) -> Result<()> {
    let indexer = ProjectIndexer::new(&cli.project_path)
        .with_context(|| format!("Cannot index {}", cli.project_path.display()))?;

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
            .expect("valid progress template")
            .progress_chars("=> "),
    );

    let stats = indexer
        .index_with_observer(mode, |event| match event {
            IndexEvent::Scanned { files } => progress.set_length(files as u64),
            IndexEvent::FileIndexed { path } => {
                progress.set_message(path);
                progress.inc(1);
            }
        })
        .await?;
    progress.finish_and_clear();

    println!(
        "Indexed {} files ({} chunks, {} lines) in {} ms",
        stats.files, stats.chunks, stats.total_lines, stats.time_ms
    );
    if let Some(deps) = &stats.dependencies {
        if !deps.di_frameworks.is_empty() {
            let frameworks: Vec<&str> = deps.di_frameworks.iter().map(String::as_str).collect();
            println!("DI frameworks: {}", frameworks.join(", "));
        }
    }
    if !stats.errors.is_empty() {
        println!("{} files failed; see log for details", stats.errors.len());
    }

    Ok(())
}

async fn run_query(cli: &Cli, query: &str) -> Result<()> {
    let api_key = cli
        .openai_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .filter(|key| !key.is_empty());
    let Some(api_key) = api_key else {
        bail!("OpenAI API key required: pass --openai-key or set OPENAI_API_KEY");
    };

    match IndexState::load(state_path(&cli.project_path)) {
        None => bail!(
            "No index found for {}. Run `droid-context {} --index` first.",
            cli.project_path.display(),
            cli.project_path.display()
        ),
        Some(state) if state.age_secs() > REINDEX_AFTER_SECS => {
            log::info!("Index is stale; performing incremental index before query");
            let indexer = ProjectIndexer::new(&cli.project_path)?;
            indexer.index(IndexMode::Incremental).await?;
        }
        Some(_) => {}
    }

    let store = VectorStore::load(droid_indexer::index_path(&cli.project_path))
        .await
        .context("Failed to load the index; try re-running with --index")?;

    let context_engine = ContextRetrievalEngine::new(HybridSearch::new(store));
    let client = OpenAiClient::new(api_key, cli.openai_url.clone(), cli.model.clone());
    let rag = RagEngine::new(context_engine, client).with_max_chunks(cli.limit);

    let response = rag.generate_response(query).await?;

    println!();
    println!("{}", "=".repeat(80));
    println!("RESPONSE:");
    println!("{}", "=".repeat(80));
    println!("{response}");
    println!("{}", "=".repeat(80));

    Ok(())
}
