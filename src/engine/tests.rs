use super::async_engine::fingerprint;
use super::{AsyncEngine, InputRecord};

use anyhow::{anyhow, Result};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tokio::time::sleep;

use crate::actors::FeedEvent;
use crate::models::{FeedScope, TransactionDetails, TransactionStatus, TransactionTypeInfo};
use crate::storage::{ActivityStorage, FeedStorage};
use crate::types::{Address, Chain};

const WALLET_1: &str = "0x1111111111111111111111111111111111111111";
const WALLET_2: &str = "0x2222222222222222222222222222222222222222";
const HASH_5: &str = "0x5555555555555555555555555555555555555555555555555555555555555555";

fn create_temporary_jsonl(lines: &[String]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    for line in lines {
        writeln!(file, "{line}")?;
    }

    Ok(file)
}

fn activity_send(owner: &str, hash: &str, nonce: u64, status: &str, timestamp: u64) -> String {
    json!({
        "source": "activity",
        "ownerAddress": owner,
        "node": {
            "id": format!("node-{nonce}"),
            "chain": "ETHEREUM",
            "timestamp": timestamp,
            "details": {
                "__typename": "TransactionDetails",
                "type": "SEND",
                "status": status,
                "hash": hash,
                "from": owner,
                "to": WALLET_2,
                "nonce": nonce,
                "assetChanges": [{
                    "__typename": "TokenTransfer",
                    "tokenStandard": "NATIVE",
                    "recipient": WALLET_2,
                    "asset": { "decimals": 18 },
                    "quantity": "0.1"
                }]
            }
        }
    }).to_string()
}

fn local_pending(owner: &str, id: &str, nonce: u64, added_time: u64) -> String {
    json!({
        "source": "local",
        "id": id,
        "chainId": 1,
        "ownerAddress": owner,
        "from": owner,
        "nonce": nonce,
        "addedTime": added_time,
        "status": "Pending",
        "typeInfo": { "type": "Unknown", "tokenAddress": null },
        "options": { "request": { "to": WALLET_2, "value": "0x1" } }
    }).to_string()
}

fn mainnet(owner: &str) -> Result<FeedScope> {
    let owner = Address::parse(owner).ok_or_else(|| anyhow!("invalid owner [{owner}]"))?;
    Ok(FeedScope::new(owner, Chain::Mainnet))
}

fn feed_records(storage: &ActivityStorage, scope: &FeedScope) -> Result<Vec<TransactionDetails>> {
    let feed = storage.take(scope).ok_or_else(|| anyhow!("Feed [{scope}] missing from storage"))?;
    Ok(feed.records())
}

fn path_of(file: &NamedTempFile) -> Result<&str> {
    file.path().to_str().ok_or_else(|| anyhow!("temporary path is not valid UTF-8"))
}

#[tokio::test]
async fn test_engine_processes_valid_jsonl_stream_successfully() -> Result<()> {
    let file = create_temporary_jsonl(&[
        activity_send(WALLET_1, "0x1111111111111111111111111111111111111111111111111111111111111111", 1, "CONFIRMED", 1_000),
        activity_send(WALLET_2, "0x2222222222222222222222222222222222222222222222222222222222222222", 1, "CONFIRMED", 2_000),
        activity_send(WALLET_1, "0x3333333333333333333333333333333333333333333333333333333333333333", 2, "PENDING", 3_000),
    ])?;

    let storage = Arc::new(ActivityStorage::new());
    let engine = AsyncEngine::new(storage.clone());
    engine.run(path_of(&file)?).await?;

    assert_eq!(storage.len(), 2);

    let wallet_1 = feed_records(&storage, &mainnet(WALLET_1)?)?;
    let wallet_2 = feed_records(&storage, &mainnet(WALLET_2)?)?;

    assert_eq!(wallet_1.len(), 2);
    assert_eq!(wallet_1[0].status, TransactionStatus::Pending);
    assert_eq!(wallet_1[0].added_time, 3_000_000);
    assert_eq!(wallet_2.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_engine_gracefully_skips_malformed_input() -> Result<()> {
    let file = create_temporary_jsonl(&[
        activity_send(WALLET_1, "0x1111111111111111111111111111111111111111111111111111111111111111", 1, "CONFIRMED", 1_000),
        "this is not json".to_string(),
        json!({ "source": "carrierPigeon", "id": "x" }).to_string(),
        json!({ "source": "activity", "ownerAddress": WALLET_1, "node": { "id": "n", "chain": "FANTOM", "timestamp": 1, "details": {} } }).to_string(),
        String::new(),
        activity_send(WALLET_1, "0x2222222222222222222222222222222222222222222222222222222222222222", 2, "CONFIRMED", 2_000),
    ])?;

    let storage = Arc::new(ActivityStorage::new());
    let engine = AsyncEngine::new(storage.clone());
    engine.run(path_of(&file)?).await?;

    let records = feed_records(&storage, &mainnet(WALLET_1)?)?;

    assert_eq!(records.len(), 2);
    assert_eq!(storage.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_engine_handles_missing_input_file_without_error() -> Result<()> {
    let storage = Arc::new(ActivityStorage::new());
    let engine = AsyncEngine::new(storage.clone());

    assert!(engine.run("missing.jsonl").await.is_ok());
    assert_eq!(storage.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_engine_reconciles_local_placeholder_with_provider_record() -> Result<()> {
    let file = create_temporary_jsonl(&[
        local_pending(WALLET_1, "local-5", 5, 1_700_000_000_500),
        local_pending(WALLET_1, "local-6", 6, 1_700_000_001_000),
        activity_send(WALLET_1, HASH_5, 5, "CONFIRMED", 1_700_000_000),
    ])?;

    let storage = Arc::new(ActivityStorage::new());
    let engine = AsyncEngine::new(storage.clone()).with_backpressure(1);
    engine.run(path_of(&file)?).await?;

    let records = feed_records(&storage, &mainnet(WALLET_1)?)?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "local-6");
    assert!(records[0].is_resubmittable());
    assert_eq!(records[1].id, HASH_5);
    assert_eq!(records[1].status, TransactionStatus::Success);
    assert_eq!(records[1].added_time, 1_700_000_000_500);
    assert!(matches!(records[1].type_info, TransactionTypeInfo::Send { .. }));

    Ok(())
}

#[tokio::test]
async fn test_engine_never_regresses_a_final_status() -> Result<()> {
    let file = create_temporary_jsonl(&[
        activity_send(WALLET_1, HASH_5, 5, "CONFIRMED", 2_000),
        activity_send(WALLET_1, HASH_5, 5, "PENDING", 1_000),
        activity_send(WALLET_1, HASH_5, 5, "GARBAGE", 3_000),
    ])?;

    let storage = Arc::new(ActivityStorage::new());
    let engine = AsyncEngine::new(storage.clone());
    engine.run(path_of(&file)?).await?;

    let records = feed_records(&storage, &mainnet(WALLET_1)?)?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, TransactionStatus::Success);

    Ok(())
}

#[tokio::test]
async fn test_dedup_capacity_eviction() -> Result<()> {
    // Capacity 1 forgets earlier deliveries; the feed still rejects the repeats.
    let storage = Arc::new(ActivityStorage::new());
    let engine = AsyncEngine::new(storage.clone())
        .with_dedup_capacity(1);

    let line = activity_send(WALLET_1, HASH_5, 5, "CONFIRMED", 1_000);
    let other = activity_send(WALLET_2, HASH_5, 5, "CONFIRMED", 1_000);
    let file = create_temporary_jsonl(&[line.clone(), other, line])?;

    engine.run(path_of(&file)?).await?;

    assert_eq!(feed_records(&storage, &mainnet(WALLET_1)?)?.len(), 1);
    assert_eq!(feed_records(&storage, &mainnet(WALLET_2)?)?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_dedup_time_eviction() -> Result<()> {
    // Timeout 100ms. Run once, sleep 200ms, run the same delivery plus an update.
    let storage = Arc::new(ActivityStorage::new());
    let engine = AsyncEngine::new(storage.clone())
        .with_dedup_timeout(Duration::from_millis(100));

    let file1 = create_temporary_jsonl(&[activity_send(WALLET_1, HASH_5, 5, "PENDING", 1_000)])?;
    engine.run(path_of(&file1)?).await?;

    sleep(Duration::from_millis(200)).await;

    let file2 = create_temporary_jsonl(&[
        activity_send(WALLET_1, HASH_5, 5, "PENDING", 1_000),
        activity_send(WALLET_1, HASH_5, 5, "FAILED", 1_500),
    ])?;
    engine.run(path_of(&file2)?).await?;

    let records = feed_records(&storage, &mainnet(WALLET_1)?)?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, TransactionStatus::Failed);
    assert_eq!(records[0].added_time, 1_500_000);

    Ok(())
}

#[test]
fn test_fingerprint_distinguishes_status_and_origin() -> Result<()> {
    let record: InputRecord = serde_json::from_str(&local_pending(WALLET_1, "local-1", 1, 10))?;
    let event = record.into_event().ok_or_else(|| anyhow!("local record was dropped"))?;

    let mut cancelling = event.details.clone();
    cancelling.status = TransactionStatus::Cancelling;

    assert_eq!(fingerprint(&event), fingerprint(&event.clone()));
    assert_ne!(fingerprint(&event), fingerprint(&FeedEvent::local(cancelling)));
    assert_ne!(fingerprint(&event), fingerprint(&FeedEvent::remote(event.details.clone())));

    Ok(())
}

#[test]
fn test_input_record_dispatches_on_source() -> Result<()> {
    let fiat: Value = json!({
        "source": "fiatOnRamp",
        "externalSessionId": "session-1",
        "status": "SETTLED",
        "createdAt": "2024-01-01T00:00:00Z",
        "serviceProvider": "MOONPAY",
        "cryptoDetails": { "walletAddress": WALLET_1, "chainId": "8453" }
    });

    let record: InputRecord = serde_json::from_value(fiat)?;
    assert!(matches!(record, InputRecord::FiatOnRamp(_)));

    let event = record.into_event().ok_or_else(|| anyhow!("fiat record was dropped"))?;
    assert_eq!(event.details.chain_id, Chain::Base);
    assert_eq!(event.details.status, TransactionStatus::Success);

    let order: InputRecord = serde_json::from_value(json!({ "source": "tradingApi", "orderId": "o-1", "chainId": 1 }))?;
    assert!(order.into_event().is_none(), "an order without a swapper cannot be shown");

    Ok(())
}
