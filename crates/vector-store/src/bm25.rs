use std::collections::HashMap;

const K1: f32 = 1.5;
const B: f32 = 0.75;

/// Okapi BM25 index over the stored chunk corpus.
///
/// Rebuilt whenever the corpus changes; cheap relative to embedding work.
pub struct Bm25Index {
    docs: HashMap<String, Vec<String>>,
    doc_freq: HashMap<String, usize>,
    avg_len: f32,
}

impl Bm25Index {
    /// Build an index from `(id, content)` pairs
    pub fn build<'a>(corpus: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let mut docs = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut total_len = 0usize;

        for (id, content) in corpus {
            let tokens = tokenize(content);
            if tokens.is_empty() {
                continue;
            }
            total_len += tokens.len();

            let mut seen: Vec<&str> = Vec::new();
            for token in &tokens {
                if !seen.contains(&token.as_str()) {
                    seen.push(token);
                    *doc_freq.entry(token.clone()).or_insert(0) += 1;
                }
            }
            docs.insert(id.to_string(), tokens);
        }

        let avg_len = (total_len as f32) / (docs.len().max(1) as f32);

        Self {
            docs,
            doc_freq,
            avg_len,
        }
    }

    /// Build an empty index
    pub fn empty() -> Self {
        Self::build(std::iter::empty())
    }

    /// Number of indexed documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Check if the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Score all documents against the query; returns `(id, score)` pairs
    /// sorted by score descending, truncated to `limit`
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<(String, f32)> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() || self.docs.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(String, f32)> = self
            .docs
            .iter()
            .filter_map(|(id, tokens)| {
                let score = self.score_doc(tokens, &query_tokens);
                (score > 0.0).then(|| (id.clone(), score))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(limit);
        scored
    }

    fn score_doc(&self, doc_tokens: &[String], query_tokens: &[String]) -> f32 {
        let dl = doc_tokens.len() as f32;
        let total_docs = self.docs.len() as f32;
        let mut score = 0.0;

        for token in query_tokens {
            let freq = doc_tokens.iter().filter(|t| *t == token).count() as f32;
            if freq <= 0.0 {
                continue;
            }
            let df = *self.doc_freq.get(token).unwrap_or(&0) as f32;
            let idf = bm25_idf(total_docs, df);
            let denom = freq + K1 * (1.0 - B + B * dl / self.avg_len.max(1e-3));
            if denom > 0.0 {
                score += idf * (freq * (K1 + 1.0)) / denom;
            }
        }

        score
    }
}

fn bm25_idf(total_docs: f32, df: f32) -> f32 {
    ((total_docs - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// Lowercased alphanumeric tokens, two characters or longer
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| part.len() >= 2)
        .map(str::to_ascii_lowercase)
        .collect()
}
