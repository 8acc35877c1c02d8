//! Embedding providers.
//!
//! A provider turns an ordered batch of texts into an ordered batch of
//! equal-length vectors, one per text. Local models and the remote API are
//! interchangeable behind [`Embedder`]; so is any plain closure with the
//! right signature, which is what the tests use.

mod gemini;
#[cfg(feature = "local")]
mod local;

pub use gemini::GeminiEmbedder;
#[cfg(feature = "local")]
pub use local::LocalEmbedder;

use crate::error::Result;

/// Capability of embedding a batch of texts.
#[allow(async_fn_in_trait)]
pub trait Embedder {
    /// Embed `texts`, returning one vector per text in the same order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

impl<F> Embedder for F
where
    F: Fn(&[String]) -> Result<Vec<Vec<f32>>>,
{
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self(texts)
    }
}
