use recursive_client::RecursiveClient;
use recursive_did::{InscriptionId, Sat};
use serde_json::Value;

use crate::cartridge::load_cartridge;
use crate::collection::load_collection;
use crate::dictionary::TraitDictionary;
use crate::error::CompositorError;
use crate::session::Session;

/// Builds the ordered layer plan for a piece from its decoded metadata.
///
/// Reads the `Attributes` map, resolves each category/trait pair through
/// the dictionary and returns the `/content/{id}` URL of every layer,
/// bottom first. Layers follow the dictionary's category order; dictionary
/// categories the piece has no attribute for are skipped. Unknown
/// categories or trait names are explicit errors rather than missing
/// lookups.
pub fn composite_plan(
    dictionary: &TraitDictionary,
    metadata: &Value,
) -> Result<Vec<String>, CompositorError> {
    let attributes = metadata
        .get("Attributes")
        .and_then(Value::as_object)
        .ok_or(CompositorError::MissingAttributes)?;

    for category in attributes.keys() {
        if !dictionary.has_category(category) {
            return Err(CompositorError::UnknownCategory(category.clone()));
        }
    }

    let mut layers = Vec::new();
    let order: Vec<String> = dictionary.layer_order().map(str::to_string).collect();
    for category in order {
        let Some(value) = attributes.get(&category) else {
            continue;
        };
        let trait_name = value
            .as_str()
            .ok_or_else(|| CompositorError::InvalidAttribute {
                category: category.clone(),
                value: value.clone(),
            })?;
        let id = dictionary.lookup(&category, trait_name).ok_or_else(|| {
            CompositorError::UnknownTrait {
                category: category.clone(),
                trait_name: trait_name.to_string(),
            }
        })?;
        layers.push(format!("/content/{id}"));
    }

    Ok(layers)
}

/// Runs the whole compositor pass for one piece.
///
/// Sequentially: fetch and decode the piece's metadata, load the cartridge
/// panels, build the layer plan, and assemble the collection roster — each
/// step writing its output into the session. Cartridge and roster failures
/// degrade as documented on their functions; a piece without usable
/// metadata cannot be composed and is an error.
pub async fn compose_piece(
    client: &RecursiveClient,
    dictionary: &TraitDictionary,
    piece: &InscriptionId,
    cartridge_sat: Sat,
    parent: &InscriptionId,
    base_roster: &[InscriptionId],
    session: &mut Session,
) -> Result<(), CompositorError> {
    let metadata = client.metadata(piece).await?.unwrap_or(Value::Null);

    load_cartridge(client, &metadata, cartridge_sat, session).await;
    session.set_layers(composite_plan(dictionary, &metadata)?);
    load_collection(client, parent, base_roster, session).await;

    Ok(())
}
