//! Configuration for the embedding benchmark.
//!
//! The benchmark is described by a YAML file (dataset, models, output
//! settings). Environment variables take precedence over config file values
//! for the API settings and the output directory.

use crate::dataset::{Dataset, Query, generate_synthetic};
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "benchmark_config.yaml";

/// Environment variable holding the embedding API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Which kind of provider backs a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Locally hosted sentence-embedding model.
    Local,
    /// Remote embedding API.
    Api,
}

/// One model to benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Display name, also used for the cost lookup.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ModelKind,

    /// Hugging Face model id, only used for local models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

impl ModelSpec {
    pub fn local(name: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ModelKind::Local,
            model_id: Some(model_id.into()),
        }
    }

    pub fn api(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ModelKind::Api,
            model_id: None,
        }
    }
}

/// Parameters for a generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_samples() -> usize {
    100
}

/// The `dataset` section: literal documents and queries, or a synthetic spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<Query>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthetic: Option<SyntheticSpec>,
}

impl DatasetConfig {
    /// Materialize the dataset this section describes.
    pub fn build(&self) -> Result<Dataset> {
        let literal = !self.documents.is_empty() || !self.queries.is_empty();

        let dataset = match (&self.synthetic, literal) {
            (Some(_), true) => {
                return Err(BenchError::InvalidConfig(
                    "dataset must list documents/queries or request a synthetic dataset, not both"
                        .to_string(),
                ));
            }
            (Some(spec), false) => generate_synthetic(spec.samples, spec.seed),
            (None, _) => Dataset::new("config", self.documents.clone(), self.queries.clone()),
        };

        dataset.validate()?;
        Ok(dataset)
    }
}

/// Embedding API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the embedding API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Embedding model served by the API.
    #[serde(default = "default_api_model")]
    pub model: String,

    /// API key. Only ever taken from the environment.
    #[serde(skip)]
    pub api_key: String,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_model() -> String {
    "text-embedding-004".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_api_model(),
            api_key: String::new(),
        }
    }
}

/// Full benchmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,

    pub models: Vec<ModelSpec>,

    /// Directory receiving the report, charts and results dump.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Number of timed provider calls per model.
    #[serde(default = "default_latency_runs")]
    pub latency_runs: usize,

    /// Whether to render charts.
    #[serde(default = "default_charts")]
    pub charts: bool,

    #[serde(default)]
    pub api: ApiConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_latency_runs() -> usize {
    5
}

fn default_charts() -> bool {
    true
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (GEMINI_API_KEY, GEMINI_API_BASE, GEMINI_MODEL, BENCH_OUTPUT_DIR)
    /// 2. Config file
    /// 3. Default values
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific file path, without environment overrides.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| BenchError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| BenchError::Serialization(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Ok(api_key) = env::var(API_KEY_ENV) {
            self.api.api_key = api_key;
        }

        if let Ok(api_base) = env::var("GEMINI_API_BASE") {
            self.api.api_base = api_base;
        }

        if let Ok(model) = env::var("GEMINI_MODEL") {
            self.api.model = model;
        }

        if let Ok(output_dir) = env::var("BENCH_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }
    }

    /// Validate that the configuration describes a runnable benchmark.
    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(BenchError::InvalidConfig(
                "at least one model is required".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for model in &self.models {
            if model.name.trim().is_empty() {
                return Err(BenchError::InvalidConfig(
                    "model names must not be empty".to_string(),
                ));
            }
            if !names.insert(model.name.as_str()) {
                return Err(BenchError::InvalidConfig(format!(
                    "duplicate model name '{}'",
                    model.name
                )));
            }
            if model.kind == ModelKind::Local && !cfg!(feature = "local") {
                return Err(BenchError::InvalidConfig(format!(
                    "model '{}' is local, but this build has no local model support",
                    model.name
                )));
            }
            if model.kind == ModelKind::Local
                && model.model_id.as_deref().is_none_or(|id| id.trim().is_empty())
            {
                return Err(BenchError::InvalidConfig(format!(
                    "local model '{}' needs a model_id",
                    model.name
                )));
            }
        }

        if self.latency_runs == 0 {
            return Err(BenchError::InvalidConfig(
                "latency_runs must be at least 1".to_string(),
            ));
        }

        let uses_api = self.models.iter().any(|m| m.kind == ModelKind::Api);
        if uses_api && self.api.api_key.is_empty() {
            return Err(BenchError::Config(format!(
                "An API key is required for API models. Set the {} environment variable.",
                API_KEY_ENV
            )));
        }

        Ok(())
    }

    /// Config listing `dataset` literally, with the default model line-up.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            dataset: DatasetConfig {
                documents: dataset.documents.clone(),
                queries: dataset.queries.clone(),
                synthetic: None,
            },
            models: default_models(),
            output_dir: default_output_dir(),
            latency_runs: default_latency_runs(),
            charts: default_charts(),
            api: ApiConfig::default(),
        }
    }
}

/// The model line-up compared in the report.
pub fn default_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec::local("MiniLM", "sentence-transformers/all-MiniLM-L6-v2"),
        ModelSpec::local("BGE-Base", "BAAI/bge-base-en-v1.5"),
        ModelSpec::local("BGE-Large", "BAAI/bge-large-en-v1.5"),
        ModelSpec::api("Gemini"),
    ]
}
