use crate::error::{Result, VectorStoreError};
use ndarray::{Array, Axis, Ix2, Ix3};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputs};
use ort::value::{DynTensor, Tensor};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokenizers::{Encoding, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};
use tokio::task::spawn_blocking;

// MiniLM sentence-embedding export
const MODEL_DIMENSION: usize = 384;
const MODEL_MAX_LENGTH: usize = 256;
const MODEL_MAX_BATCH: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum EmbeddingMode {
    Fast,
    Stub,
}

impl EmbeddingMode {
    fn from_env() -> Result<Self> {
        let raw = std::env::var("DROID_CONTEXT_EMBEDDING_MODE")
            .unwrap_or_else(|_| "fast".to_string())
            .to_ascii_lowercase();
        match raw.as_str() {
            "fast" => Ok(Self::Fast),
            "stub" => Ok(Self::Stub),
            other => Err(VectorStoreError::EmbeddingError(format!(
                "Unsupported DROID_CONTEXT_EMBEDDING_MODE '{other}' (expected 'fast' or 'stub')"
            ))),
        }
    }
}

/// Directory holding `model.onnx` and `tokenizer.json`
pub fn model_dir() -> PathBuf {
    if let Ok(path) = std::env::var("DROID_CONTEXT_MODEL_DIR") {
        return PathBuf::from(path);
    }

    let cache_base = std::env::var("XDG_CACHE_HOME").map_or_else(
        |_| {
            std::env::var("HOME")
                .map_or_else(|_| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    cache_base.join("droid-context").join("models").join("minilm")
}

/// Sentence embedding backend
#[derive(Clone)]
pub struct EmbeddingModel {
    inner: Arc<Backend>,
}

enum Backend {
    Ort(OrtBackend),
    Stub,
}

struct OrtBackend {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl EmbeddingModel {
    /// Create the backend selected by `DROID_CONTEXT_EMBEDDING_MODE`
    pub fn new() -> Result<Self> {
        let backend = match EmbeddingMode::from_env()? {
            EmbeddingMode::Fast => Backend::Ort(OrtBackend::new()?),
            EmbeddingMode::Stub => {
                log::debug!("Using stub embedding backend");
                Backend::Stub
            }
        };
        Ok(Self {
            inner: Arc::new(backend),
        })
    }

    /// Embedding vector dimension
    #[must_use]
    pub const fn dimension(&self) -> usize {
        MODEL_DIMENSION
    }

    /// Embed a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(vec![text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| VectorStoreError::EmbeddingError("Empty embedding batch".to_string()))
    }

    /// Embed a batch of texts (inference runs on the blocking pool)
    pub async fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let inner = self.inner.clone();
        spawn_blocking(move || inner.embed_batch_blocking(&texts))
            .await
            .map_err(|e| VectorStoreError::EmbeddingError(format!("Embedding task failed: {e}")))?
    }
}

impl Backend {
    fn embed_batch_blocking(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        match self {
            Self::Ort(backend) => backend.embed_batch_blocking(texts),
            Self::Stub => Ok(texts
                .iter()
                .map(|text| stub_embed(text, MODEL_DIMENSION))
                .collect()),
        }
    }
}

impl OrtBackend {
    fn new() -> Result<Self> {
        let dir = model_dir();
        let model_path = dir.join("model.onnx");
        let tokenizer_path = dir.join("tokenizer.json");

        if !model_path.exists() || !tokenizer_path.exists() {
            return Err(VectorStoreError::EmbeddingError(format!(
                "Model files are missing. Expected ONNX at {} and tokenizer at {}. \
                 Place a MiniLM export there (or set DROID_CONTEXT_MODEL_DIR), \
                 or run with DROID_CONTEXT_EMBEDDING_MODE=stub.",
                model_path.display(),
                tokenizer_path.display(),
            )));
        }

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| VectorStoreError::EmbeddingError(format!("Tokenizer load failed: {e}")))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..PaddingParams::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MODEL_MAX_LENGTH,
                ..TruncationParams::default()
            }))
            .map_err(|e| {
                VectorStoreError::EmbeddingError(format!("Tokenizer truncation failed: {e}"))
            })?;

        let session = Session::builder()
            .map_err(|e| VectorStoreError::EmbeddingError(format!("{e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| {
                VectorStoreError::EmbeddingError(format!("Failed to set optimization level: {e}"))
            })?
            .commit_from_file(&model_path)
            .map_err(|e| {
                VectorStoreError::EmbeddingError(format!("Failed to load ONNX model: {e}"))
            })?;

        log::info!(
            "Loaded ONNX embedding model from {} (dim {MODEL_DIMENSION})",
            dir.display()
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    fn embed_batch_blocking(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());

        for batch in texts.chunks(MODEL_MAX_BATCH) {
            let encodings = self
                .tokenizer
                .encode_batch(batch.to_vec(), true)
                .map_err(|e| {
                    VectorStoreError::EmbeddingError(format!("Tokenization failed: {e}"))
                })?;
            if encodings.is_empty() {
                continue;
            }

            let seq_len = encodings[0].len();
            if encodings.iter().any(|e| e.len() != seq_len) {
                return Err(VectorStoreError::EmbeddingError(
                    "Inconsistent sequence lengths after padding".to_string(),
                ));
            }

            let (ids, masks, type_ids, mask_rows) = build_flat_tensors(&encodings, seq_len);

            let ids_array = Array::from_shape_vec((batch.len(), seq_len), ids)
                .map_err(|e| VectorStoreError::EmbeddingError(format!("IDs shape error: {e}")))?;
            let mask_array = Array::from_shape_vec((batch.len(), seq_len), masks)
                .map_err(|e| VectorStoreError::EmbeddingError(format!("Mask shape error: {e}")))?;
            let type_array = Array::from_shape_vec((batch.len(), seq_len), type_ids)
                .map_err(|e| VectorStoreError::EmbeddingError(format!("Types shape error: {e}")))?;

            let mut available: HashMap<String, DynTensor> = HashMap::new();
            available.insert(
                "input_ids".to_string(),
                Tensor::from_array(ids_array.into_dyn())
                    .map_err(|e| VectorStoreError::EmbeddingError(format!("{e}")))?
                    .upcast(),
            );
            available.insert(
                "attention_mask".to_string(),
                Tensor::from_array(mask_array.into_dyn())
                    .map_err(|e| VectorStoreError::EmbeddingError(format!("{e}")))?
                    .upcast(),
            );
            available.insert(
                "token_type_ids".to_string(),
                Tensor::from_array(type_array.into_dyn())
                    .map_err(|e| VectorStoreError::EmbeddingError(format!("{e}")))?
                    .upcast(),
            );

            let array = {
                let mut session = self.session.lock().map_err(|_| {
                    VectorStoreError::EmbeddingError("Failed to lock ONNX session".to_string())
                })?;

                let mut feed: HashMap<String, DynTensor> = HashMap::new();
                for input in &session.inputs {
                    let key = input.name.clone();
                    match available.get(&key) {
                        Some(value) => {
                            feed.insert(key, value.clone());
                        }
                        None => {
                            return Err(VectorStoreError::EmbeddingError(format!(
                                "Unsupported ONNX input '{key}'"
                            )));
                        }
                    }
                }

                let outputs = session.run(SessionInputs::from(feed)).map_err(|e| {
                    VectorStoreError::EmbeddingError(format!("ONNX forward failed: {e}"))
                })?;
                if outputs.len() == 0 {
                    return Err(VectorStoreError::EmbeddingError(
                        "ONNX returned no outputs".to_string(),
                    ));
                }

                outputs[0]
                    .try_extract_array::<f32>()
                    .map_err(|e| {
                        VectorStoreError::EmbeddingError(format!(
                            "Failed to decode ONNX output: {e}"
                        ))
                    })?
                    .to_owned()
            };

            results.extend(embeddings_from_output(array, &mask_rows)?);
        }

        Ok(results)
    }
}

fn embeddings_from_output(
    array: ndarray::ArrayD<f32>,
    mask_rows: &[Vec<i64>],
) -> Result<Vec<Vec<f32>>> {
    let mut out = Vec::new();
    match array.ndim() {
        // Pooled sentence embeddings
        2 => {
            let embeddings = array
                .into_dimensionality::<Ix2>()
                .map_err(|e| VectorStoreError::EmbeddingError(format!("Bad output shape: {e}")))?;
            for row in embeddings.outer_iter() {
                let mut emb = row.to_owned().to_vec();
                ensure_dimension(&emb)?;
                normalize(&mut emb);
                out.push(emb);
            }
        }
        // Token-level hidden states, mean-pool over the attention mask
        3 => {
            let hidden = array
                .into_dimensionality::<Ix3>()
                .map_err(|e| VectorStoreError::EmbeddingError(format!("Bad output shape: {e}")))?;
            for (idx, sample) in hidden.outer_iter().enumerate() {
                let mask = mask_rows
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| vec![1; sample.len_of(Axis(0))]);
                let mut emb = mean_pool(sample, &mask);
                ensure_dimension(&emb)?;
                normalize(&mut emb);
                out.push(emb);
            }
        }
        _ => {
            return Err(VectorStoreError::EmbeddingError(format!(
                "Unexpected ONNX output dims: {:?}",
                array.shape()
            )));
        }
    }
    Ok(out)
}

fn mean_pool(sample: ndarray::ArrayView2<'_, f32>, mask: &[i64]) -> Vec<f32> {
    let hidden = sample.len_of(Axis(1));
    let mut sum = vec![0.0f32; hidden];
    let mut count = 0.0f32;

    for (token_idx, token) in sample.outer_iter().enumerate() {
        if *mask.get(token_idx).unwrap_or(&0) == 0 {
            continue;
        }
        count += 1.0;
        for (dim, value) in token.iter().enumerate() {
            sum[dim] += value;
        }
    }

    if count > 0.0 {
        for value in &mut sum {
            *value /= count;
        }
    }

    sum
}

fn build_flat_tensors(
    encodings: &[Encoding],
    seq_len: usize,
) -> (Vec<i64>, Vec<i64>, Vec<i64>, Vec<Vec<i64>>) {
    let mut ids = Vec::with_capacity(encodings.len() * seq_len);
    let mut masks = Vec::with_capacity(encodings.len() * seq_len);
    let mut type_ids = Vec::with_capacity(encodings.len() * seq_len);
    let mut mask_rows = Vec::with_capacity(encodings.len());

    for encoding in encodings {
        let encoding_ids = encoding.get_ids();
        let encoding_masks = encoding.get_attention_mask();
        let encoding_types = encoding.get_type_ids();

        for idx in 0..seq_len {
            ids.push(i64::from(*encoding_ids.get(idx).unwrap_or(&0)));
            masks.push(i64::from(*encoding_masks.get(idx).unwrap_or(&0)));
            type_ids.push(i64::from(*encoding_types.get(idx).unwrap_or(&0)));
        }

        mask_rows.push(
            encoding_masks
                .iter()
                .take(seq_len)
                .map(|v| i64::from(*v))
                .collect(),
        );
    }

    (ids, masks, type_ids, mask_rows)
}

fn ensure_dimension(vec: &[f32]) -> Result<()> {
    if vec.len() != MODEL_DIMENSION {
        return Err(VectorStoreError::InvalidDimension {
            expected: MODEL_DIMENSION,
            actual: vec.len(),
        });
    }
    Ok(())
}

fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

/// Deterministic pseudo-random unit vector derived from the text
fn stub_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let mantissa = ((bits >> 32) as u32) >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_embeddings_are_deterministic() {
        let a = stub_embed("fun main() {}", MODEL_DIMENSION);
        let b = stub_embed("fun main() {}", MODEL_DIMENSION);
        assert_eq!(a, b);
    }

    #[test]
    fn stub_embeddings_differ_per_text() {
        let a = stub_embed("fun main() {}", MODEL_DIMENSION);
        let b = stub_embed("class Other", MODEL_DIMENSION);
        assert_ne!(a, b);
    }

    #[test]
    fn stub_embeddings_are_normalized() {
        let v = stub_embed("anything", MODEL_DIMENSION);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn stub_backend_embeds_batches() {
        std::env::set_var("DROID_CONTEXT_EMBEDDING_MODE", "stub");
        let model = EmbeddingModel::new().unwrap();

        let vectors = model
            .embed_batch(vec!["one".to_string(), "two".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].len(), model.dimension());
    }

    #[test]
    fn mean_pool_ignores_masked_tokens() {
        let sample = ndarray::array![[1.0f32, 2.0], [3.0, 4.0], [100.0, 100.0]];
        let pooled = mean_pool(sample.view(), &[1, 1, 0]);
        assert_eq!(pooled, vec![2.0, 3.0]);
    }
}
