use recursive_did::{
    BlockInfo, BlockQuery, Inscription, InscriptionBundle, InscriptionId, Page, Sat,
    SatInscription,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::metadata::decode_hex_metadata;
use crate::pagination::collect_pages;

/// What a non-success response means for an endpoint.
///
/// The recursive endpoints do not agree on a single convention, so each
/// wrapper picks its row from this table instead of special-casing inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Absence {
    /// Any non-success status reads as "not found".
    NullOnError,
    /// 404 reads as "not found"; other non-success statuses are errors.
    NullOnNotFound,
    /// Every non-success status is an error.
    Raise,
}

/// Client for the ord recursive endpoints of a single origin.
///
/// All requests are issued strictly sequentially; there is no caching, no
/// retry and no request fan-out.
#[derive(Debug, Clone)]
pub struct RecursiveClient {
    http: Client,
    origin: String,
}

impl RecursiveClient {
    /// Creates a client for the given origin, e.g. `https://ordinals.com`.
    ///
    /// The origin is a required parameter; deriving it from the hosting
    /// page is the job of the outermost entry point, via
    /// [`InscriptionId::extract_from_path`] and its surroundings.
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_client(Client::new(), origin)
    }

    pub fn with_client(http: Client, origin: impl Into<String>) -> Self {
        let origin = origin.into().trim_end_matches('/').to_string();
        Self { http, origin }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Fetches the inscription record. Any non-success status reads as
    /// absence.
    pub async fn inscription(&self, id: &InscriptionId) -> Result<Option<Inscription>> {
        self.get_json(&format!("/r/inscription/{id}"), Absence::NullOnError)
            .await
    }

    /// Fetches and decodes the CBOR metadata attached to an inscription.
    ///
    /// Absent metadata and undecodable blobs both come back as `None`; a
    /// bad blob is logged but never an error.
    pub async fn metadata(&self, id: &InscriptionId) -> Result<Option<serde_json::Value>> {
        let blob: Option<String> = self
            .get_json(&format!("/r/metadata/{id}"), Absence::NullOnError)
            .await?;
        let Some(blob) = blob else {
            return Ok(None);
        };

        match decode_hex_metadata(&blob) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                log::warn!("undecodable metadata for {id}: {err}");
                Ok(None)
            }
        }
    }

    /// Fetches the inscription at `index` on a sat. Negative indices count
    /// from the end; `-1` is the most recent.
    ///
    /// The response body is parsed without a status check; a non-success
    /// body that fails to parse surfaces as the parse error.
    pub async fn sat_at(&self, sat: Sat, index: i64) -> Result<SatInscription> {
        let url = format!("{}/r/sat/{sat}/at/{index}", self.origin);
        log::debug!("GET {url}");
        Ok(self.http.get(&url).send().await?.json().await?)
    }

    /// The most recent inscription on a sat.
    pub async fn sat_latest(&self, sat: Sat) -> Result<SatInscription> {
        self.sat_at(sat, -1).await
    }

    /// One page of the inscription listing for a sat. Non-success raises.
    pub async fn sat_page(&self, sat: Sat, page: u64) -> Result<Page> {
        self.get_json_required(&format!("/r/sat/{sat}/{page}")).await
    }

    /// All inscription ids on a sat, in page order. A failed page aborts
    /// the walk and propagates.
    pub async fn sat_all(&self, sat: Sat) -> Result<Vec<InscriptionId>> {
        let this = self;
        collect_pages(move |page| async move { this.sat_page(sat, page).await }).await
    }

    /// One page of an inscription's child listing.
    ///
    /// Failures are swallowed: the page comes back empty with
    /// `more == false`, which ends any surrounding walk early. Callers of
    /// [`Self::children_all`] therefore receive a silently truncated
    /// listing when the server misbehaves mid-walk.
    pub async fn children_page(&self, id: &InscriptionId, page: u64) -> Page {
        match self
            .get_json_required(&format!("/r/children/{id}/{page}"))
            .await
        {
            Ok(result) => result,
            Err(err) => {
                log::warn!("children page {page} of {id} failed, truncating listing: {err}");
                Page {
                    ids: Vec::new(),
                    more: false,
                    page,
                }
            }
        }
    }

    /// All child inscription ids, in page order. Never fails; see
    /// [`Self::children_page`] for the truncation caveat.
    pub async fn children_all(&self, id: &InscriptionId) -> Vec<InscriptionId> {
        let this = self;
        let ids = collect_pages(move |page| {
            let id = id.clone();
            async move { Ok(this.children_page(&id, page).await) }
        })
        .await;
        // The page closure is infallible, so the walk is too.
        ids.unwrap_or_default()
    }

    /// Block record by height or hash. 404 reads as absence; other
    /// non-success statuses raise.
    pub async fn block_info(&self, query: &BlockQuery) -> Result<Option<BlockInfo>> {
        self.get_json(&format!("/r/blockinfo/{query}"), Absence::NullOnNotFound)
            .await
    }

    /// Hash of the block at `height`, or `None` past the chain tip.
    ///
    /// ord servers quote the hash as a JSON string; the quotes are stripped
    /// here, with a fallback to the raw body for servers that send bare
    /// text.
    pub async fn block_hash(&self, height: u64) -> Result<Option<String>> {
        let body = self
            .get_text(&format!("/r/blockhash/{height}"), Absence::NullOnNotFound)
            .await?;
        Ok(body.map(|text| {
            serde_json::from_str::<String>(&text).unwrap_or_else(|_| text.trim().to_string())
        }))
    }

    /// Latest block height.
    pub async fn block_height(&self) -> Result<u64> {
        let text = self.get_text_required("/r/blockheight").await?;
        parse_integer_body(&text, "block height")
    }

    /// UNIX timestamp of the latest block.
    pub async fn block_time(&self) -> Result<u64> {
        let text = self.get_text_required("/r/blocktime").await?;
        parse_integer_body(&text, "block time")
    }

    /// Fetches `/content/{id}` as JSON. Used for inscriptions whose content
    /// is itself a structured document, such as compositor cartridges.
    pub async fn content_json(&self, id: &InscriptionId) -> Result<serde_json::Value> {
        let url = format!("{}/content/{id}", self.origin);
        log::debug!("GET {url}");
        Ok(self.http.get(&url).send().await?.json().await?)
    }

    /// Fetches everything known about an inscription, sequentially: the
    /// record, all children, the full listing of its sat, and the decoded
    /// metadata.
    ///
    /// The first failure aborts the remaining steps, but the bundle built
    /// so far is still returned; `id` is always set.
    pub async fn all(&self, id: &InscriptionId) -> InscriptionBundle {
        let mut bundle = InscriptionBundle::new(id.clone());
        if let Err(err) = self.fill_bundle(&mut bundle).await {
            log::warn!("aggregate fetch for {id} aborted: {err}");
        }
        bundle
    }

    async fn fill_bundle(&self, bundle: &mut InscriptionBundle) -> Result<()> {
        let id = bundle.id.clone();

        bundle.inscription = self.inscription(&id).await?;
        bundle.children = self.children_all(&id).await;

        let sat = bundle
            .inscription
            .as_ref()
            .and_then(|inscription| inscription.sat)
            .ok_or_else(|| ClientError::UnexpectedValue(format!("no sat recorded for {id}")))?;
        bundle.sat_ids = self.sat_all(Sat(sat)).await?;

        bundle.metadata = self.metadata(&id).await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        absence: Absence,
    ) -> Result<Option<T>> {
        let url = format!("{}{path}", self.origin);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return match absence {
                Absence::NullOnError => Ok(None),
                Absence::NullOnNotFound if status == StatusCode::NOT_FOUND => Ok(None),
                _ => Err(ClientError::Status { status, url }),
            };
        }

        Ok(Some(response.json().await?))
    }

    async fn get_json_required<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        match self.get_json(path, Absence::Raise).await? {
            Some(value) => Ok(value),
            None => Err(ClientError::UnexpectedValue(format!(
                "empty response from {path}"
            ))),
        }
    }

    async fn get_text(&self, path: &str, absence: Absence) -> Result<Option<String>> {
        let url = format!("{}{path}", self.origin);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return match absence {
                Absence::NullOnError => Ok(None),
                Absence::NullOnNotFound if status == StatusCode::NOT_FOUND => Ok(None),
                _ => Err(ClientError::Status { status, url }),
            };
        }

        Ok(Some(response.text().await?))
    }

    async fn get_text_required(&self, path: &str) -> Result<String> {
        match self.get_text(path, Absence::Raise).await? {
            Some(text) => Ok(text),
            None => Err(ClientError::UnexpectedValue(format!(
                "empty response from {path}"
            ))),
        }
    }
}

fn parse_integer_body(text: &str, what: &str) -> Result<u64> {
    text.trim().parse().map_err(|_| {
        ClientError::UnexpectedValue(format!("expected integer {what}, got `{}`", text.trim()))
    })
}
