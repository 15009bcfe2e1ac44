use super::{
    reconcile, ActivityFeed, FeedError, Origin, TransactionDetails, TransactionOptions, TransactionStatus,
    TransactionTypeInfo, TransferredAsset
};

use anyhow::{anyhow, Result};
use serde_json::json;

use crate::types::{Address, Chain};

const OWNER: &str = "0x1111111111111111111111111111111111111111";
const RECIPIENT: &str = "0x2222222222222222222222222222222222222222";
const TOKEN: &str = "0x3333333333333333333333333333333333333333";

fn address(value: &str) -> Result<Address> {
    Address::parse(value).ok_or_else(|| anyhow!("invalid address {value}"))
}

fn create_details(id: &str, nonce: Option<u64>, status: TransactionStatus, added_time: u64) -> Result<TransactionDetails> {
    Ok(TransactionDetails {
        id: id.to_string(),
        chain_id: Chain::Mainnet,
        hash: Some(id.to_string()),
        owner_address: address(OWNER)?,
        from: address(OWNER)?,
        nonce,
        added_time,
        status,
        type_info: TransactionTypeInfo::Send {
            recipient: address(RECIPIENT)?,
            asset: TransferredAsset::Currency {
                token_address: address(TOKEN)?,
                currency_amount_raw: "1000000".to_string()
            }
        },
        options: TransactionOptions::default(),
        network_fee: None,
        transaction_fee: None,
        total_fee: None
    })
}

#[test]
fn test_final_status_never_regresses() {
    use TransactionStatus::*;

    for existing in [Success, Failed, Cancelled] {
        for incoming in [Pending, Cancelling, Unknown] {
            assert!(!incoming.may_replace(existing), "{incoming:?} replaced {existing:?}");
        }
    }

    assert!(Success.may_replace(Pending));
    assert!(Failed.may_replace(Cancelling));
    assert!(Pending.may_replace(Unknown));
    assert!(!Unknown.may_replace(Pending));
    assert!(!Pending.may_replace(Cancelling));
    assert!(Cancelling.may_replace(Pending));
}

#[test]
fn test_remote_success_supersedes_local_pending_with_same_nonce() -> Result<()> {
    let local = create_details("0xlocal", Some(5), TransactionStatus::Pending, 1_000)?;
    let remote = create_details("0xremote", Some(5), TransactionStatus::Success, 2_000)?;

    let merged = reconcile(vec![local], vec![remote.clone()]);

    assert_eq!(merged, vec![remote]);

    Ok(())
}

#[test]
fn test_local_placeholder_is_retained_until_matched() -> Result<()> {
    let local = create_details("0xlocal", Some(6), TransactionStatus::Pending, 3_000)?;
    let remote = create_details("0xremote", Some(5), TransactionStatus::Success, 2_000)?;

    let merged = reconcile(vec![local.clone()], vec![remote.clone()]);

    assert_eq!(merged, vec![local, remote]);

    Ok(())
}

#[test]
fn test_records_without_nonce_match_by_hash() -> Result<()> {
    let mut local = create_details("0xabc", None, TransactionStatus::Pending, 1_000)?;
    local.id = "local-session".to_string();
    let remote = create_details("0xabc", None, TransactionStatus::Failed, 1_500)?;

    let merged = reconcile(vec![local], vec![remote.clone()]);

    assert_eq!(merged, vec![remote]);

    Ok(())
}

#[test]
fn test_receive_nonce_from_another_sender_does_not_collide() -> Result<()> {
    let local = create_details("0xlocal", Some(5), TransactionStatus::Pending, 1_000)?;
    let mut incoming = create_details("0xincoming", Some(5), TransactionStatus::Success, 2_000)?;
    incoming.from = address(RECIPIENT)?;

    let merged = reconcile(vec![local], vec![incoming]);

    assert_eq!(merged.len(), 2);

    Ok(())
}

#[test]
fn test_late_pending_update_does_not_revert_success() -> Result<()> {
    let mut feed = ActivityFeed::new();
    feed.apply(Origin::Remote, create_details("0xabc", Some(1), TransactionStatus::Success, 2_000)?)?;

    let result = feed.apply(Origin::Remote, create_details("0xabc", Some(1), TransactionStatus::Pending, 3_000)?);

    assert!(matches!(result, Err(FeedError::StaleStatus { .. })));
    assert_eq!(feed.records()[0].status, TransactionStatus::Success);

    Ok(())
}

#[test]
fn test_status_outcome_is_independent_of_arrival_order() -> Result<()> {
    let records = vec![
        create_details("0xabc", Some(1), TransactionStatus::Unknown, 1_000)?,
        create_details("0xabc", Some(1), TransactionStatus::Pending, 2_000)?,
        create_details("0xabc", Some(1), TransactionStatus::Success, 3_000)?,
    ];

    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    for order in orders {
        let remote = order.iter().map(|&i| records[i].clone()).collect();
        let merged = reconcile(Vec::new(), remote);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status, TransactionStatus::Success, "order {order:?}");
    }

    Ok(())
}

#[test]
fn test_replacement_never_moves_added_time_backwards() -> Result<()> {
    let mut feed = ActivityFeed::new();
    feed.apply(Origin::Local, create_details("0xabc", Some(1), TransactionStatus::Pending, 5_000)?)?;
    feed.apply(Origin::Remote, create_details("0xabc", Some(1), TransactionStatus::Success, 4_000)?)?;

    let records = feed.records();

    assert_eq!(records[0].added_time, 5_000);
    assert_eq!(records[0].status, TransactionStatus::Success);
    assert_eq!(feed.pending_local().count(), 0);

    Ok(())
}

#[test]
fn test_duplicate_delivery_is_rejected() -> Result<()> {
    let mut feed = ActivityFeed::new();
    let details = create_details("0xabc", None, TransactionStatus::Pending, 1_000)?;
    feed.apply(Origin::Remote, details.clone())?;

    assert!(matches!(feed.apply(Origin::Remote, details), Err(FeedError::DuplicateRecord { .. })));
    assert_eq!(feed.len(), 1);

    Ok(())
}

#[test]
fn test_local_record_does_not_override_equivalent_remote_record() -> Result<()> {
    let mut feed = ActivityFeed::new();
    feed.apply(Origin::Remote, create_details("0xabc", Some(2), TransactionStatus::Pending, 1_000)?)?;

    let stale_local = feed.apply(Origin::Local, create_details("0xabc", Some(2), TransactionStatus::Pending, 900)?);
    assert!(matches!(stale_local, Err(FeedError::RemoteAlreadyPresent { .. })));

    feed.apply(Origin::Local, create_details("0xabc", Some(2), TransactionStatus::Cancelling, 1_100)?)?;
    assert_eq!(feed.records()[0].status, TransactionStatus::Cancelling);

    Ok(())
}

#[test]
fn test_type_info_serializes_only_its_own_fields() -> Result<()> {
    let details = create_details("0xabc", None, TransactionStatus::Success, 1_000)?;
    let value = serde_json::to_value(&details.type_info)?;

    assert_eq!(value, json!({
        "type": "Send",
        "recipient": RECIPIENT,
        "asset": {
            "assetType": "Currency",
            "tokenAddress": TOKEN,
            "currencyAmountRaw": "1000000"
        }
    }));

    Ok(())
}

#[test]
fn test_local_transaction_deserializes_from_client_state() -> Result<()> {
    let details: TransactionDetails = serde_json::from_value(json!({
        "id": "0xABC",
        "chainId": 10,
        "hash": "0xABC",
        "ownerAddress": "0x1111111111111111111111111111111111111111",
        "from": "0x1111111111111111111111111111111111111111",
        "nonce": 7,
        "addedTime": 1700000000000u64,
        "status": "Pending",
        "typeInfo": { "type": "Unknown", "tokenAddress": null },
        "options": { "request": { "to": "0x2222222222222222222222222222222222222222", "value": "0x0" } }
    }))?;

    assert_eq!(details.chain_id, Chain::Optimism);
    assert!(details.type_info.is_unknown());
    assert!(details.is_resubmittable());

    assert!(serde_json::from_value::<TransactionDetails>(json!({ "id": "x", "chainId": 250 })).is_err());

    Ok(())
}

const MINED_HASH: &str = "0x9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a9a";

#[test]
fn test_record_matching_several_entries_merges_them() -> Result<()> {
    let mut local = create_details("local-5", Some(5), TransactionStatus::Pending, 1_000)?;
    local.hash = None;
    let mut order = create_details("order-1", None, TransactionStatus::Pending, 1_100)?;
    order.hash = Some(MINED_HASH.to_string());
    let mined = create_details(MINED_HASH, Some(5), TransactionStatus::Success, 1_200)?;

    for remote in [vec![order.clone(), mined.clone()], vec![mined.clone(), order.clone()]] {
        let merged = reconcile(vec![local.clone()], remote);

        assert_eq!(merged.len(), 1, "{merged:?}");
        assert_eq!(merged[0].id, MINED_HASH);
        assert_eq!(merged[0].status, TransactionStatus::Success);
        assert_eq!(merged[0].added_time, 1_200);
    }

    Ok(())
}

#[test]
fn test_merged_entry_still_matches_every_absorbed_key() -> Result<()> {
    let mut local = create_details("local-5", Some(5), TransactionStatus::Pending, 1_000)?;
    local.hash = None;
    let mut order = create_details("order-1", None, TransactionStatus::Pending, 1_100)?;
    order.hash = Some(MINED_HASH.to_string());
    let mined = create_details(MINED_HASH, Some(5), TransactionStatus::Failed, 1_200)?;

    let mut feed = ActivityFeed::new();
    feed.apply(Origin::Local, local.clone())?;
    feed.apply(Origin::Remote, order.clone())?;
    assert_eq!(feed.len(), 2);

    feed.apply(Origin::Remote, mined)?;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed.pending_local().count(), 0);

    let mut order_without_hash = order;
    order_without_hash.hash = None;

    assert!(matches!(feed.apply(Origin::Remote, order_without_hash), Err(FeedError::StaleStatus { .. })));
    assert!(matches!(feed.apply(Origin::Local, local), Err(FeedError::StaleStatus { .. })));
    assert_eq!(feed.records()[0].status, TransactionStatus::Failed);

    Ok(())
}

#[test]
fn test_remote_record_with_unmapped_status_replaces_local_placeholder() -> Result<()> {
    let local = create_details("local-5", Some(5), TransactionStatus::Pending, 1_000)?;
    let remote = create_details("remote-5", Some(5), TransactionStatus::Unknown, 900)?;

    let merged = reconcile(vec![local], vec![remote]);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, "remote-5");
    assert_eq!(merged[0].status, TransactionStatus::Unknown);
    assert_eq!(merged[0].added_time, 1_000);

    Ok(())
}

#[test]
fn test_unknown_provider_update_never_overrides_known_provider_status() -> Result<()> {
    let mut feed = ActivityFeed::new();
    feed.apply(Origin::Local, create_details("local-5", Some(5), TransactionStatus::Pending, 1_000)?)?;
    feed.apply(Origin::Remote, create_details("remote-5", Some(5), TransactionStatus::Pending, 1_100)?)?;

    let result = feed.apply(Origin::Remote, create_details("remote-5", Some(5), TransactionStatus::Unknown, 1_200)?);

    assert!(matches!(result, Err(FeedError::StaleStatus { .. })));
    assert_eq!(feed.records()[0].status, TransactionStatus::Pending);

    Ok(())
}

#[test]
fn test_only_unmatched_local_requests_are_resubmittable() -> Result<()> {
    let request = json!({ "to": RECIPIENT, "value": "0x1" });
    let request = request.as_object().cloned().ok_or_else(|| anyhow!("request is not an object"))?;

    let mut matched = create_details("local-1", Some(1), TransactionStatus::Pending, 1_000)?;
    matched.options = TransactionOptions { request: request.clone(), submitted_at: Some(990) };
    let mut unmatched = create_details("local-2", Some(2), TransactionStatus::Pending, 2_000)?;
    unmatched.options = TransactionOptions { request, submitted_at: Some(1_990) };
    let bare = create_details("local-3", Some(3), TransactionStatus::Pending, 3_000)?;

    let mut feed = ActivityFeed::new();
    feed.apply(Origin::Local, matched)?;
    feed.apply(Origin::Local, unmatched)?;
    feed.apply(Origin::Local, bare)?;
    feed.apply(Origin::Remote, create_details("remote-1", Some(1), TransactionStatus::Success, 1_100)?)?;

    let ids: Vec<_> = feed.resubmittable().map(|details| details.id.as_str()).collect();

    assert_eq!(ids, vec!["local-2"]);

    Ok(())
}
