use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::Tensor,
};
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info};

use crate::application::EmbeddingService;
use crate::domain::{l2_normalize, DomainError, EmbeddingConfig};

pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DEFAULT_DIMENSIONS: usize = 384;
const DEFAULT_MAX_SEQ_LENGTH: usize = 256;
const BATCH_SIZE: usize = 32;

/// Sentence-transformer embeddings run locally through ONNX Runtime.
///
/// Token states are mean-pooled over the attention mask, then L2-normalized.
/// Models that already export a pooled `[batch, hidden]` output are only
/// normalized.
pub struct OrtEmbedding {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    config: EmbeddingConfig,
}

impl OrtEmbedding {
    /// Downloads (or reuses the cached copy of) `model_id` from the HF hub.
    pub fn new(model_id: Option<&str>) -> Result<Self, DomainError> {
        let model_id = model_id.unwrap_or(DEFAULT_MODEL_ID);
        info!("Initializing ORT embedding service with model: {}", model_id);

        let api = hf_hub::api::sync::ApiBuilder::new()
            .with_progress(true)
            .build()
            .map_err(|e| DomainError::embedding(format!("Failed to create HF API: {}", e)))?;

        let repo = api.model(model_id.to_string());

        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| DomainError::embedding(format!("Failed to download tokenizer: {}", e)))?;

        let model_path = repo
            .get("model.onnx")
            .or_else(|_| repo.get("onnx/model.onnx"))
            .map_err(|e| DomainError::embedding(format!("Failed to download ONNX model: {}", e)))?;

        Self::from_paths(model_path, tokenizer_path, model_id)
    }

    pub fn from_paths(
        model_path: PathBuf,
        tokenizer_path: PathBuf,
        model_name: &str,
    ) -> Result<Self, DomainError> {
        info!("Loading ONNX model from: {:?}", model_path);

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(&model_path))
            .map_err(|e| DomainError::embedding(format!("Failed to load ONNX model: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| DomainError::embedding(format!("Failed to load tokenizer: {}", e)))?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            config: EmbeddingConfig::new(
                model_name.to_string(),
                DEFAULT_DIMENSIONS,
                DEFAULT_MAX_SEQ_LENGTH,
            ),
        })
    }

    fn run_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| DomainError::embedding(format!("Tokenization failed: {}", e)))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(self.config.max_sequence_length());
        let shape = [encodings.len(), max_len];

        let input_ids = tensor(shape, padded(&encodings, max_len, Encoding::get_ids))?;
        let attention_mask =
            tensor(shape, padded(&encodings, max_len, Encoding::get_attention_mask))?;
        let token_type_ids = tensor(shape, padded(&encodings, max_len, Encoding::get_type_ids))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| DomainError::internal(format!("Failed to lock session: {}", e)))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask,
                "token_type_ids" => token_type_ids,
            ])
            .map_err(|e| DomainError::embedding(format!("Inference failed: {}", e)))?;

        let (_, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| DomainError::embedding("No output tensor found"))?;

        let (out_shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| DomainError::embedding(format!("Failed to extract output tensor: {}", e)))?;
        let out_shape: Vec<usize> = out_shape.iter().map(|&x| x as usize).collect();
        debug!("Output tensor shape: {:?}", out_shape);

        let mut embeddings = match out_shape.as_slice() {
            &[batch, seq_len, hidden] => (0..batch)
                .map(|i| {
                    let start = i * seq_len * hidden;
                    mean_pool(
                        &data[start..start + seq_len * hidden],
                        encodings[i].get_attention_mask(),
                        seq_len.min(max_len),
                        hidden,
                    )
                })
                .collect::<Vec<_>>(),
            &[batch, hidden] => (0..batch)
                .map(|i| data[i * hidden..(i + 1) * hidden].to_vec())
                .collect(),
            other => {
                return Err(DomainError::embedding(format!(
                    "Unexpected output tensor shape: {:?}",
                    other
                )))
            }
        };

        for embedding in &mut embeddings {
            l2_normalize(embedding);
        }

        Ok(embeddings)
    }
}

fn padded(encodings: &[Encoding], max_len: usize, field: fn(&Encoding) -> &[u32]) -> Vec<i64> {
    let mut values = Vec::with_capacity(encodings.len() * max_len);
    for encoding in encodings {
        let row = field(encoding);
        let len = row.len().min(max_len);
        values.extend(row[..len].iter().map(|&x| x as i64));
        values.extend(std::iter::repeat_n(0i64, max_len - len));
    }
    values
}

fn tensor(shape: [usize; 2], values: Vec<i64>) -> Result<Tensor<i64>, DomainError> {
    Tensor::from_array((shape, values))
        .map_err(|e| DomainError::embedding(format!("Failed to create input tensor: {}", e)))
}

fn mean_pool(states: &[f32], mask: &[u32], tokens: usize, hidden: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; hidden];
    let mut count = 0.0f32;

    for (j, token) in states.chunks(hidden).take(tokens).enumerate() {
        if mask.get(j).copied().unwrap_or(0) == 0 {
            continue;
        }
        for (p, s) in pooled.iter_mut().zip(token) {
            *p += s;
        }
        count += 1.0;
    }

    if count > 0.0 {
        for p in &mut pooled {
            *p /= count;
        }
    }
    pooled
}

#[async_trait]
impl EmbeddingService for OrtEmbedding {
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(BATCH_SIZE) {
            let text_refs: Vec<&str> = batch.iter().map(String::as_str).collect();
            all_embeddings.extend(self.run_batch(&text_refs)?);
        }

        debug!(
            "Embedded {} texts with {}",
            all_embeddings.len(),
            self.config.model_name()
        );

        Ok(all_embeddings)
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        self.run_batch(&[query])?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::embedding("Failed to generate query embedding"))
    }

    fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_pool_skips_masked_tokens() {
        let states = [1.0, 2.0, 3.0, 4.0, 100.0, 100.0];
        let pooled = mean_pool(&states, &[1, 1, 0], 3, 2);

        assert_eq!(pooled, vec![2.0, 3.0]);
    }

    #[test]
    fn test_padded_fills_short_rows() {
        let values = padded(&[Encoding::default()], 3, Encoding::get_ids);
        assert_eq!(values, vec![0, 0, 0]);
    }

    #[tokio::test]
    #[ignore = "Requires model download"]
    async fn test_ort_embedding_service() {
        let service = OrtEmbedding::new(None).expect("Failed to create service");

        let embedding = service.embed_query("How do I reset my password?").await.unwrap();

        assert_eq!(embedding.len(), DEFAULT_DIMENSIONS);

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.01);
    }
}
