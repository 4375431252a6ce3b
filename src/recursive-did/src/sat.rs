use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::inscription_id::InscriptionId;

/// A satoshi ordinal, used as the key for per-sat inscription listings.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Sat(pub u64);

impl From<u64> for Sat {
    fn from(value: u64) -> Self {
        Sat(value)
    }
}

impl Display for Sat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response of `/r/sat/{sat}/at/{index}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatInscription {
    pub id: InscriptionId,
}
