//! Gemini embedding API client.
//!
//! Embeds one text per `embedContent` call, in order, without retries.

use super::Embedder;
use crate::config::{API_KEY_ENV, ApiConfig};
use crate::error::{BenchError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body for `embedContent`.
#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response from `embedContent`.
#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Google API error response.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    #[allow(dead_code)]
    status: Option<String>,
}

/// Remote embedding provider backed by the Gemini API.
#[derive(Clone)]
pub struct GeminiEmbedder {
    client: Client,
    config: ApiConfig,
}

impl GeminiEmbedder {
    /// Create a client. Fails when no API key is configured.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(BenchError::Config(format!(
                "Gemini API key is required. Set the {} environment variable.",
                API_KEY_ENV
            )));
        }

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    /// Get the API endpoint URL.
    fn endpoint(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{}/v1beta/models/{}:embedContent", base, self.config.model)
    }

    /// Embed a single text.
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedContentRequest {
            model: format!("models/{}", self.config.model),
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return Err(BenchError::Provider(format!(
                    "API error ({}): {}",
                    status, api_error.error.message
                )));
            }
            return Err(BenchError::Provider(format!(
                "Request failed ({}): {}",
                status, body
            )));
        }

        parse_embedding(&body)
    }
}

fn parse_embedding(body: &str) -> Result<Vec<f32>> {
    let parsed: EmbedContentResponse =
        serde_json::from_str(body).map_err(|e| BenchError::ProviderParse(e.to_string()))?;

    if parsed.embedding.values.is_empty() {
        return Err(BenchError::ProviderParse(
            "response contained an empty embedding".to_string(),
        ));
    }

    Ok(parsed.embedding.values)
}

impl Embedder for GeminiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());

        for (i, text) in texts.iter().enumerate() {
            debug!(index = i, total = texts.len(), "Requesting Gemini embedding");
            embeddings.push(self.embed_one(text).await?);
        }

        Ok(embeddings)
    }
}
