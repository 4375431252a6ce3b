use std::str::FromStr;

use mockito::{Matcher, Server, ServerGuard};
use recursive_client::{ClientError, RecursiveClient};
use recursive_did::{BlockQuery, InscriptionId, Sat};
use serde_json::json;

const SAT: Sat = Sat(1932536250000000);
const FIRST_ID: &str = "025107e06ac442f014c09a73cd97372f69619edd00dbeacca0aac55c75efe3ffi0";
const SECOND_ID: &str = "0974de6e963752b9e54215038188f8c9ad35df909db8688d69ad018320d0de9ai0";
const GENESIS_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

async fn test_server() -> (ServerGuard, RecursiveClient) {
    init_logs();
    let server = Server::new_async().await;
    let client = RecursiveClient::new(server.url());
    (server, client)
}

fn id(s: &str) -> InscriptionId {
    InscriptionId::from_str(s).unwrap()
}

fn page_body(ids: &[&str], more: bool, page: u64) -> String {
    json!({ "ids": ids, "more": more, "page": page }).to_string()
}

fn inscription_body(sat: Option<u64>) -> String {
    json!({
        "charms": [],
        "content_type": "image/png",
        "content_length": 793,
        "fee": 322,
        "height": 801029,
        "number": 21000000,
        "output": format!("{}:0", &FIRST_ID[..64]),
        "sat": sat,
        "satpoint": format!("{}:0:0", &FIRST_ID[..64]),
        "timestamp": 1691404800,
        "value": 546
    })
    .to_string()
}

/// CBOR-encodes the metadata fixture and returns it as the JSON-quoted hex
/// string the `/r/metadata` endpoint serves.
fn metadata_blob() -> String {
    let mut encoder = minicbor::Encoder::new(Vec::new());
    encoder
        .map(3)
        .unwrap()
        .str("title")
        .unwrap()
        .str("Cypherpunk Ghost Honoary Eloc")
        .unwrap()
        .str("description")
        .unwrap()
        .str("Cypherpunk legends of past, present and future")
        .unwrap()
        .str("collection")
        .unwrap()
        .str("Cypherpunk Ghost Honoarys")
        .unwrap();
    format!("\"{}\"", hex::encode(encoder.into_writer()))
}

#[tokio::test]
async fn test_sat_all_concatenates_pages() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/sat/1932536250000000/0")
        .with_body(page_body(&[FIRST_ID], true, 0))
        .create_async()
        .await;
    server
        .mock("GET", "/r/sat/1932536250000000/1")
        .with_body(page_body(&[SECOND_ID], false, 1))
        .create_async()
        .await;

    let ids = client.sat_all(SAT).await.unwrap();
    assert_eq!(ids, vec![id(FIRST_ID), id(SECOND_ID)]);
}

#[tokio::test]
async fn test_sat_page_raises_on_server_error() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/sat/1932536250000000/0")
        .with_status(500)
        .create_async()
        .await;

    let err = client.sat_page(SAT, 0).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn test_sat_all_propagates_page_failure() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/sat/1932536250000000/0")
        .with_body(page_body(&[FIRST_ID], true, 0))
        .create_async()
        .await;
    server
        .mock("GET", "/r/sat/1932536250000000/1")
        .with_status(502)
        .create_async()
        .await;

    assert!(client.sat_all(SAT).await.is_err());
}

#[tokio::test]
async fn test_sat_at_parses_the_id() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/sat/1932536250000000/at/1")
        .with_body(json!({ "id": SECOND_ID }).to_string())
        .create_async()
        .await;

    let inscription = client.sat_at(SAT, 1).await.unwrap();
    assert_eq!(inscription.id, id(SECOND_ID));
}

#[tokio::test]
async fn test_sat_latest_uses_negative_index() {
    let (mut server, client) = test_server().await;

    let mock = server
        .mock("GET", "/r/sat/1932536250000000/at/-1")
        .with_body(json!({ "id": SECOND_ID }).to_string())
        .create_async()
        .await;

    client.sat_latest(SAT).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_children_failure_truncates_silently() {
    let (mut server, client) = test_server().await;
    let parent = id(FIRST_ID);

    server
        .mock("GET", format!("/r/children/{parent}/0").as_str())
        .with_body(page_body(&[SECOND_ID], true, 0))
        .create_async()
        .await;
    server
        .mock("GET", format!("/r/children/{parent}/1").as_str())
        .with_status(500)
        .create_async()
        .await;

    // Page 1 fails; the listing silently ends after page 0.
    let children = client.children_all(&parent).await;
    assert_eq!(children, vec![id(SECOND_ID)]);
}

#[tokio::test]
async fn test_children_all_walks_every_page() {
    let (mut server, client) = test_server().await;
    let parent = id(FIRST_ID);

    server
        .mock("GET", format!("/r/children/{parent}/0").as_str())
        .with_body(page_body(&[SECOND_ID], true, 0))
        .create_async()
        .await;
    server
        .mock("GET", format!("/r/children/{parent}/1").as_str())
        .with_body(page_body(&[FIRST_ID], false, 1))
        .create_async()
        .await;

    let children = client.children_all(&parent).await;
    assert_eq!(children, vec![id(SECOND_ID), id(FIRST_ID)]);
}

#[tokio::test]
async fn test_inscription_not_found_is_none() {
    let (mut server, client) = test_server().await;
    let missing = id(SECOND_ID);

    server
        .mock("GET", format!("/r/inscription/{missing}").as_str())
        .with_status(404)
        .create_async()
        .await;

    assert_eq!(client.inscription(&missing).await.unwrap(), None);
}

#[tokio::test]
async fn test_inscription_server_error_is_none() {
    // The inscription endpoint treats every non-success as absence.
    let (mut server, client) = test_server().await;
    let target = id(FIRST_ID);

    server
        .mock("GET", format!("/r/inscription/{target}").as_str())
        .with_status(500)
        .create_async()
        .await;

    assert_eq!(client.inscription(&target).await.unwrap(), None);
}

#[tokio::test]
async fn test_metadata_decodes_to_plain_json() {
    let (mut server, client) = test_server().await;
    let target = id(FIRST_ID);

    server
        .mock("GET", format!("/r/metadata/{target}").as_str())
        .with_body(metadata_blob())
        .create_async()
        .await;

    let metadata = client.metadata(&target).await.unwrap().unwrap();
    assert_eq!(
        metadata,
        json!({
            "title": "Cypherpunk Ghost Honoary Eloc",
            "description": "Cypherpunk legends of past, present and future",
            "collection": "Cypherpunk Ghost Honoarys",
        })
    );
}

#[tokio::test]
async fn test_metadata_not_found_is_none() {
    let (mut server, client) = test_server().await;
    let target = id(SECOND_ID);

    server
        .mock("GET", format!("/r/metadata/{target}").as_str())
        .with_status(404)
        .create_async()
        .await;

    assert_eq!(client.metadata(&target).await.unwrap(), None);
}

#[tokio::test]
async fn test_undecodable_metadata_is_none() {
    let (mut server, client) = test_server().await;
    let target = id(FIRST_ID);

    server
        .mock("GET", format!("/r/metadata/{target}").as_str())
        .with_body("\"not hex at all\"")
        .create_async()
        .await;

    assert_eq!(client.metadata(&target).await.unwrap(), None);
}

#[tokio::test]
async fn test_block_info_genesis() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/blockinfo/0")
        .with_body(
            json!({
                "bits": 486604799u32,
                "chainwork": 4295032833u64,
                "confirmations": 832757,
                "difficulty": 1.0,
                "hash": GENESIS_HASH,
                "height": 0,
                "median_time": 1231006505,
                "merkle_root": "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b",
                "next_block": "00000000839a8e6886ab5951d76f411475428afc90947ee320161bbf18eb6048",
                "nonce": 2083236893u64,
                "previous_block": null,
                "target": "00000000ffff0000000000000000000000000000000000000000000000000000",
                "timestamp": 1231006505,
                "transaction_count": 1,
                "version": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let info = client
        .block_info(&BlockQuery::Height(0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(info.height, 0);
    assert_eq!(info.previous_block, None);
    assert_eq!(info.hash, GENESIS_HASH);
}

#[tokio::test]
async fn test_block_info_not_found_is_none() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/blockinfo/888888888")
        .with_status(404)
        .create_async()
        .await;

    let info = client.block_info(&BlockQuery::Height(888888888)).await.unwrap();
    assert_eq!(info, None);
}

#[tokio::test]
async fn test_block_info_server_error_raises() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/blockinfo/0")
        .with_status(500)
        .create_async()
        .await;

    assert!(client.block_info(&BlockQuery::Height(0)).await.is_err());
}

#[tokio::test]
async fn test_block_hash_strips_json_quotes() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/blockhash/0")
        .with_body(format!("\"{GENESIS_HASH}\""))
        .create_async()
        .await;

    let hash = client.block_hash(0).await.unwrap();
    assert_eq!(hash.as_deref(), Some(GENESIS_HASH));
}

#[tokio::test]
async fn test_block_hash_past_tip_is_none() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/blockhash/888888888")
        .with_status(404)
        .create_async()
        .await;

    assert_eq!(client.block_hash(888888888).await.unwrap(), None);
}

#[tokio::test]
async fn test_block_height_and_time_parse_text() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/blockheight")
        .with_body("840000")
        .create_async()
        .await;
    server
        .mock("GET", "/r/blocktime")
        .with_body("1713571767")
        .create_async()
        .await;

    assert_eq!(client.block_height().await.unwrap(), 840000);
    assert_eq!(client.block_time().await.unwrap(), 1713571767);
}

#[tokio::test]
async fn test_block_height_raises_on_server_error() {
    let (mut server, client) = test_server().await;

    server
        .mock("GET", "/r/blockheight")
        .with_status(503)
        .create_async()
        .await;

    assert!(client.block_height().await.is_err());
}

#[tokio::test]
async fn test_content_json() {
    let (mut server, client) = test_server().await;
    let target = id(FIRST_ID);

    server
        .mock("GET", Matcher::Exact(format!("/content/{target}")))
        .with_body(json!({ "functions": [] }).to_string())
        .create_async()
        .await;

    let content = client.content_json(&target).await.unwrap();
    assert_eq!(content, json!({ "functions": [] }));
}

#[tokio::test]
async fn test_all_assembles_the_full_bundle() {
    let (mut server, client) = test_server().await;
    let target = id(FIRST_ID);

    server
        .mock("GET", format!("/r/inscription/{target}").as_str())
        .with_body(inscription_body(Some(SAT.0)))
        .create_async()
        .await;
    server
        .mock("GET", format!("/r/children/{target}/0").as_str())
        .with_body(page_body(&[SECOND_ID], false, 0))
        .create_async()
        .await;
    server
        .mock("GET", "/r/sat/1932536250000000/0")
        .with_body(page_body(&[FIRST_ID, SECOND_ID], false, 0))
        .create_async()
        .await;
    server
        .mock("GET", format!("/r/metadata/{target}").as_str())
        .with_body(metadata_blob())
        .create_async()
        .await;

    let bundle = client.all(&target).await;
    assert_eq!(bundle.id, target);
    assert_eq!(bundle.inscription.unwrap().sat, Some(SAT.0));
    assert_eq!(bundle.children, vec![id(SECOND_ID)]);
    assert_eq!(bundle.sat_ids, vec![id(FIRST_ID), id(SECOND_ID)]);
    assert!(bundle.metadata.is_some());
}

#[tokio::test]
async fn test_all_returns_partial_bundle_on_failure() {
    let (mut server, client) = test_server().await;
    let target = id(FIRST_ID);

    // Record fetch reads as absent, children still load, then the missing
    // sat aborts the chain before sat ids and metadata.
    server
        .mock("GET", format!("/r/inscription/{target}").as_str())
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", format!("/r/children/{target}/0").as_str())
        .with_body(page_body(&[SECOND_ID], false, 0))
        .create_async()
        .await;

    let bundle = client.all(&target).await;
    assert_eq!(bundle.id, target);
    assert_eq!(bundle.inscription, None);
    assert_eq!(bundle.children, vec![id(SECOND_ID)]);
    assert!(bundle.sat_ids.is_empty());
    assert_eq!(bundle.metadata, None);
}
