use serde::{Deserialize, Serialize};

use crate::inscription_id::InscriptionId;

/// One slice of a paginated inscription listing, as returned by
/// `/r/sat/{sat}/{page}` and `/r/children/{id}/{page}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Page {
    pub ids: Vec<InscriptionId>,
    /// Whether a subsequent page index exists. This is the only field the
    /// pagination loop consults for continuation.
    pub more: bool,
    /// Server-reported page number. Echoed back to callers but never used to
    /// drive the walk; the requested index is incremented locally.
    pub page: u64,
}
