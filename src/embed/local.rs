//! Local embedding model using candle + sentence-transformers.

use super::Embedder;
use crate::error::{BenchError, Result};
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use hf_hub::{Repo, RepoType, api::sync::Api};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

/// Fallback position limit for BERT-style models.
const DEFAULT_MAX_POSITIONS: usize = 512;

/// Sentence-transformers model running on the CPU.
pub struct LocalEmbedder {
    model_id: String,
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

fn model_err(context: &str, err: impl std::fmt::Display) -> BenchError {
    BenchError::Model(format!("{}: {}", context, err))
}

impl LocalEmbedder {
    /// Load a sentence-transformers model by name from the Hugging Face Hub.
    pub fn load(model_id: &str) -> Result<Self> {
        info!(model_id, "Loading local embedding model");
        let device = Device::Cpu;

        let api = Api::new().map_err(|e| model_err("Failed to create HF Hub API", e))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| model_err("Failed to get config.json", e))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| model_err("Failed to get tokenizer.json", e))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| model_err("Failed to get model.safetensors", e))?;

        let config_text =
            std::fs::read_to_string(&config_path).map_err(|e| BenchError::io(&config_path, e))?;
        let config: BertConfig = serde_json::from_str(&config_text)
            .map_err(|e| model_err("Failed to parse model config", e))?;

        // Shape information is read from the raw JSON; candle keeps its config fields private.
        let raw: serde_json::Value = serde_json::from_str(&config_text)?;
        let dimension = raw["hidden_size"]
            .as_u64()
            .ok_or_else(|| BenchError::Model("model config has no hidden_size".to_string()))?
            as usize;
        let max_positions = raw["max_position_embeddings"]
            .as_u64()
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_MAX_POSITIONS);

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| model_err("Failed to load tokenizer", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_positions,
                ..Default::default()
            }))
            .map_err(|e| model_err("Failed to configure truncation", e))?;

        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, &device)? };
        let model = BertModel::load(vb, &config)?;

        info!(model_id, dimension, "Local embedding model ready");

        Ok(Self {
            model_id: model_id.to_string(),
            model,
            tokenizer,
            device,
        })
    }

    /// Generate embeddings for a batch of texts.
    pub fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let encodings = self
            .tokenizer
            .encode_batch(inputs, true)
            .map_err(|e| model_err("Tokenization failed", e))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut input_ids_vec = Vec::with_capacity(texts.len() * max_len);
        let mut attention_mask_vec = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let mut padded_ids = encoding.get_ids().to_vec();
            let mut padded_mask = encoding.get_attention_mask().to_vec();

            padded_ids.resize(max_len, 0);
            padded_mask.resize(max_len, 0);

            input_ids_vec.extend(padded_ids);
            attention_mask_vec.extend(padded_mask);
        }

        let batch_size = texts.len();
        debug!(model_id = %self.model_id, batch_size, max_len, "Running local model");

        let input_ids = Tensor::from_vec(input_ids_vec, (batch_size, max_len), &self.device)?;
        let attention_mask =
            Tensor::from_vec(attention_mask_vec, (batch_size, max_len), &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;

        let output = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // Mean pooling over the sequence dimension, ignoring padding
        let mask = attention_mask
            .unsqueeze(2)?
            .to_dtype(output.dtype())?
            .broadcast_as(output.shape())?;

        let summed = (output * &mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
        let pooled = (summed / counts)?;

        let norms = pooled.sqr()?.sum_keepdim(1)?.sqrt()?;
        let pooled = pooled.broadcast_div(&norms)?;

        Ok(pooled.to_vec2::<f32>()?)
    }
}

impl Embedder for LocalEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.embed_batch(texts)
    }
}
