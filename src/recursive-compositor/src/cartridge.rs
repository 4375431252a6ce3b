use recursive_client::{ClientError, RecursiveClient};
use recursive_did::{InscriptionId, Sat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::{Panel, Session};

const SEPARATOR: &str = "==============================";

/// Content schema of a cartridge inscription: interactive panels plus an
/// optional navigation override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cartridge {
    #[serde(default)]
    pub functions: Vec<Panel>,
    #[serde(rename = "newLink", default)]
    pub new_link: Option<InscriptionId>,
}

/// Builds the TRAITS panel shown for a logged-in piece.
///
/// Returns `None` when the metadata carries no `Title`; such pieces get no
/// panels at all.
pub fn traits_panel(metadata: &Value) -> Option<Panel> {
    let title = metadata.get("Title")?.as_str()?;

    let mut lines = vec![
        "LOGGED IN AS".to_string(),
        title.to_string(),
        SEPARATOR.to_string(),
        "TRAITS ".to_string(),
        SEPARATOR.to_string(),
    ];

    if let Some(attributes) = metadata.get("Attributes").and_then(Value::as_object) {
        lines.extend(
            attributes
                .iter()
                .map(|(category, value)| match value.as_str() {
                    Some(text) => format!("{category}: {text}"),
                    None => format!("{category}: {value}"),
                }),
        );
        lines.push(SEPARATOR.to_string());
    }

    Some(Panel {
        name: "TRAITS".to_string(),
        lines,
    })
}

/// Loads the latest cartridge inscribed on `cartridge_sat` into the session.
///
/// On success the TRAITS panel is prepended to the cartridge's panels and a
/// `newLink` override replaces the session link. Any failure along the way
/// is logged and the session falls back to the TRAITS panel alone; the
/// caller never sees the error.
pub async fn load_cartridge(
    client: &RecursiveClient,
    metadata: &Value,
    cartridge_sat: Sat,
    session: &mut Session,
) {
    let Some(panel) = traits_panel(metadata) else {
        return;
    };

    match fetch_remote_cartridge(client, cartridge_sat).await {
        Ok(cartridge) => {
            let mut panels = cartridge.functions;
            panels.insert(0, panel);
            session.set_panels(panels);
            if let Some(link) = cartridge.new_link {
                session.set_link(link);
            }
        }
        Err(err) => {
            log::warn!("cartridge on sat {cartridge_sat} unavailable: {err}");
            session.set_panels(vec![panel]);
        }
    }
}

async fn fetch_remote_cartridge(
    client: &RecursiveClient,
    sat: Sat,
) -> Result<Cartridge, ClientError> {
    let latest = client.sat_latest(sat).await?;
    let content = client.content_json(&latest.id).await?;
    serde_json::from_value(content)
        .map_err(|err| ClientError::UnexpectedValue(format!("bad cartridge content: {err}")))
}
