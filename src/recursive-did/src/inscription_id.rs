use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lazy_regex::{lazy_regex, Lazy, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Matches an inscription id embedded in a URL path segment, e.g.
/// `/content/<64 hex>i0/`. Hex is accepted case-insensitively; the index is
/// limited to three digits, as served by the `/content` and `/preview` routes.
static PATH_ID_REGEX: Lazy<Regex> = lazy_regex!(r"/([a-fA-F0-9]{64}i[0-9]{1,3})/?");

pub type ParseIdResult<T> = Result<T, ParseIdError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("inscription id must be 64 hex chars, 'i', then a decimal index; got `{0}`")]
    Malformed(String),
}

/// An inscription identifier: the reveal transaction id (64 lowercase hex
/// characters) followed by `i` and the input index.
///
/// The token is treated as an opaque unique key; it is validated against the
/// textual pattern but never decoded into its transaction components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InscriptionId(String);

impl InscriptionId {
    /// Extracts the first inscription id from a page path such as
    /// `/content/<id>` or `/preview/<id>`.
    ///
    /// Total replacement for an ambient URL lookup: returns `None` when the
    /// path carries no id instead of failing. The trailing slash is never
    /// part of the returned token.
    pub fn extract_from_path(path: &str) -> Option<InscriptionId> {
        let captures = PATH_ID_REGEX.captures(path)?;
        Some(InscriptionId(captures[1].to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for InscriptionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> ParseIdResult<Self> {
        let (txid, index) = s
            .split_once('i')
            .ok_or_else(|| ParseIdError::Malformed(s.to_string()))?;

        let txid_ok = txid.len() == 64 && txid.bytes().all(|b| b.is_ascii_hexdigit());
        let index_ok = !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit());

        if !txid_ok || !index_ok {
            return Err(ParseIdError::Malformed(s.to_string()));
        }

        Ok(InscriptionId(format!(
            "{}i{index}",
            txid.to_ascii_lowercase()
        )))
    }
}

impl Display for InscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
