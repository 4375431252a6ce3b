use recursive_client::RecursiveClient;
use recursive_did::InscriptionId;

use crate::session::{RosterEntry, Session};

/// Loads the collection roster into the session: the fixed base entries
/// followed by every child of `parent`, numbered from 1.
///
/// The child listing shares the truncation behavior of
/// `RecursiveClient::children_all`; a mid-walk failure yields a shorter
/// roster, not an error.
pub async fn load_collection(
    client: &RecursiveClient,
    parent: &InscriptionId,
    base: &[InscriptionId],
    session: &mut Session,
) {
    let children = client.children_all(parent).await;
    session.set_roster(build_roster(base, children));
}

fn build_roster(base: &[InscriptionId], children: Vec<InscriptionId>) -> Vec<RosterEntry> {
    base.iter()
        .cloned()
        .chain(children)
        .enumerate()
        .map(|(index, id)| RosterEntry {
            number: index as u64 + 1,
            id,
        })
        .collect()
}
