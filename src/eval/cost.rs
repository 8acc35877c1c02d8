//! Static cost lookup per model.

use serde::{Deserialize, Serialize};

/// Model name whose cost comes from the hosted API tier.
const GEMINI: &str = "Gemini";

/// Cost of embedding with a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// USD per million input tokens.
    #[serde(rename = "cost_per_1M_tokens")]
    pub cost_per_1m_tokens: f64,
    pub note: String,
}

/// Look up the cost figure for `model_name`.
///
/// Local models are free to call; their hardware cost is not priced in.
pub fn estimate_cost(model_name: &str) -> CostEstimate {
    if model_name == GEMINI {
        return CostEstimate {
            cost_per_1m_tokens: 0.0,
            note: "Free tier Gemini API (rate-limited)".to_string(),
        };
    }

    CostEstimate {
        cost_per_1m_tokens: 0.0,
        note: "Open-source, self-hosted (CPU/GPU cost excluded)".to_string(),
    }
}
