use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Key for a `/r/blockinfo/{..}` lookup: either a height or a block hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockQuery {
    Height(u64),
    Hash(String),
}

impl From<u64> for BlockQuery {
    fn from(height: u64) -> Self {
        BlockQuery::Height(height)
    }
}

impl Display for BlockQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockQuery::Height(height) => write!(f, "{height}"),
            BlockQuery::Hash(hash) => write!(f, "{hash}"),
        }
    }
}

/// Block record as served by `/r/blockinfo/{heightOrHash}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub bits: u32,
    /// Accumulated work; exceeds u64 range on mainnet, kept as a raw number.
    pub chainwork: serde_json::Number,
    pub confirmations: i64,
    pub difficulty: f64,
    pub hash: String,
    pub height: u64,
    pub median_time: Option<i64>,
    pub merkle_root: String,
    pub next_block: Option<String>,
    pub nonce: u64,
    pub previous_block: Option<String>,
    pub target: String,
    pub timestamp: i64,
    pub transaction_count: u64,
    pub version: i64,
}
