use serde::{Deserialize, Serialize};

/// Inscription record as served by `/r/inscription/{id}`.
///
/// Pure passthrough of the endpoint schema; no cross-field invariants are
/// enforced. Fields the server omits for older inscriptions are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inscription {
    #[serde(default)]
    pub charms: Vec<String>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub fee: u64,
    pub height: u64,
    pub number: i64,
    pub output: String,
    pub sat: Option<u64>,
    pub satpoint: String,
    pub timestamp: i64,
    pub value: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
