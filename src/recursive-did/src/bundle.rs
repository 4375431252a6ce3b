use serde::{Deserialize, Serialize};

use crate::inscription::Inscription;
use crate::inscription_id::InscriptionId;

/// Everything known about one inscription, assembled by the aggregate fetch.
///
/// `id` is always present. The remaining fields hold whatever the sequential
/// fetch chain managed to populate before its first failure; a half-filled
/// bundle is a valid result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InscriptionBundle {
    pub id: InscriptionId,
    pub inscription: Option<Inscription>,
    #[serde(default)]
    pub children: Vec<InscriptionId>,
    #[serde(default)]
    pub sat_ids: Vec<InscriptionId>,
    pub metadata: Option<serde_json::Value>,
}

impl InscriptionBundle {
    pub fn new(id: InscriptionId) -> Self {
        Self {
            id,
            inscription: None,
            children: Vec::new(),
            sat_ids: Vec::new(),
            metadata: None,
        }
    }
}
