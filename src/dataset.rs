//! Benchmark datasets.
//!
//! A dataset is an ordered list of documents plus queries that point at the
//! positions of their relevant documents. Datasets come either from the YAML
//! config or from the synthetic generator below.

use crate::error::{BenchError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Topic vocabulary used by the synthetic generator.
pub const TOPICS: [&str; 10] = [
    "machine learning",
    "deep learning",
    "natural language processing",
    "computer vision",
    "artificial intelligence",
    "neural networks",
    "transformers",
    "python programming",
    "data science",
    "embeddings",
];

/// A query with its ground-truth relevant documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// The query text.
    #[serde(rename = "query")]
    pub text: String,
    /// Positions of relevant documents.
    #[serde(default)]
    pub relevant_docs: Vec<usize>,
}

impl Query {
    pub fn new(text: impl Into<String>, relevant_docs: Vec<usize>) -> Self {
        Self {
            text: text.into(),
            relevant_docs,
        }
    }
}

/// A collection of documents and queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name.
    pub name: String,
    /// Documents, identified by position.
    pub documents: Vec<String>,
    /// Queries against the documents.
    pub queries: Vec<Query>,
}

/// Short description of a dataset, carried into the results and the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub documents: usize,
    pub queries: usize,
    pub avg_relevant_per_query: f64,
}

impl Dataset {
    /// Create a dataset from documents and queries.
    pub fn new(name: &str, documents: Vec<String>, queries: Vec<Query>) -> Self {
        Self {
            name: name.to_string(),
            documents,
            queries,
        }
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if there are no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Check that there is something to evaluate and that every relevant
    /// document index points at an existing document.
    pub fn validate(&self) -> Result<()> {
        if self.queries.is_empty() {
            return Err(BenchError::EmptyDataset(format!(
                "'{}' has no queries",
                self.name
            )));
        }

        for (qi, query) in self.queries.iter().enumerate() {
            if let Some(&index) = query.relevant_docs.iter().find(|&&i| i >= self.len()) {
                return Err(BenchError::RelevantDocOutOfRange {
                    query: qi,
                    index,
                    doc_count: self.len(),
                });
            }
        }

        Ok(())
    }

    pub fn summary(&self) -> DatasetSummary {
        let total_relevant: usize = self.queries.iter().map(|q| q.relevant_docs.len()).sum();
        let avg_relevant_per_query = if self.queries.is_empty() {
            0.0
        } else {
            total_relevant as f64 / self.queries.len() as f64
        };

        DatasetSummary {
            name: self.name.clone(),
            documents: self.documents.len(),
            queries: self.queries.len(),
            avg_relevant_per_query,
        }
    }
}

/// Capitalize the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Templated paragraph about `topic`.
pub fn generate_paragraph(topic: &str, idx: usize) -> String {
    format!(
        "{} is an important area in modern computing. \
         This paragraph {} explains core concepts of {}, \
         its applications, benefits, and challenges in real-world systems.",
        title_case(topic),
        idx,
        topic
    )
}

/// Templated question about `topic`.
pub fn generate_question(topic: &str) -> String {
    format!("What is {}?", topic)
}

/// Generate `samples` document/query pairs over [`TOPICS`].
///
/// Query `i` has exactly one relevant document, document `i`. Relevance holds
/// by construction, not by meaning: several documents share a topic, so other
/// documents may look just as relevant to an embedding model.
///
/// With a seed the output is reproducible.
pub fn generate_synthetic(samples: usize, seed: Option<u64>) -> Dataset {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut documents = Vec::with_capacity(samples);
    let mut queries = Vec::with_capacity(samples);

    for i in 0..samples {
        let topic = TOPICS[rng.gen_range(0..TOPICS.len())];
        documents.push(generate_paragraph(topic, i));
        queries.push(Query::new(generate_question(topic), vec![i]));
    }

    Dataset::new("synthetic", documents, queries)
}
