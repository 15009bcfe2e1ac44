use std::str::FromStr;

use chrono::DateTime;
use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::models::{TransactionDetails, TransactionOptions, TransactionTypeInfo};
use crate::parsing::errors::{AssemblyError, RecordSource};
use crate::parsing::extractors::{
    extract_approve, extract_fiat_purchase, extract_nft_mint, extract_on_ramp, extract_receive, extract_send,
    extract_swap, extract_trading_api_swap, ExtractionContext
};
use crate::parsing::payload::{ActivityDetails, ActivityNode, ActivityRecord, FiatOnRampTransaction, TradingApiOrder};
use crate::parsing::status::{activity_status, fiat_on_ramp_status, trading_api_status};
use crate::types::{canonical_hash, Address, Chain, Timestamp};

const ON_CHAIN_TYPENAME: &str = "TransactionDetails";
const ON_RAMP_TYPENAME: &str = "OnRampTransactionDetails";

/// One record as returned by any of the activity providers.
#[derive(Debug, Clone)]
pub enum ProviderRecord {
    Activity(ActivityRecord),
    TradingApi(TradingApiOrder),
    FiatOnRamp(FiatOnRampTransaction)
}

impl ProviderRecord {
    pub fn source(&self) -> RecordSource {
        match self {
            ProviderRecord::Activity(_) => RecordSource::Activity,
            ProviderRecord::TradingApi(_) => RecordSource::TradingApi,
            ProviderRecord::FiatOnRamp(_) => RecordSource::FiatOnRamp
        }
    }
}

/// Converts a provider record into a `TransactionDetails`.
///
/// Returns `None` when the record has to be dropped. Records of an unrecognized
/// kind, or whose category is missing data, are still returned with an
/// `Unknown` type. Each record is independent, so a dropped record never
/// affects the rest of its batch.
pub fn assemble(record: &ProviderRecord) -> Option<TransactionDetails> {
    match try_assemble(record) {
        Ok(details) => Some(details),
        Err(error) => {
            error!("Dropping [{}] record: {error}", record.source());
            None
        }
    }
}

pub fn try_assemble(record: &ProviderRecord) -> Result<TransactionDetails, AssemblyError> {
    match record {
        ProviderRecord::Activity(activity) => assemble_activity(activity),
        ProviderRecord::TradingApi(order) => assemble_trading_api_order(order),
        ProviderRecord::FiatOnRamp(transaction) => assemble_fiat_on_ramp(transaction)
    }
}

fn assemble_activity(record: &ActivityRecord) -> Result<TransactionDetails, AssemblyError> {
    let node = &record.node;
    let label = node.id.as_deref();
    let missing = |field| AssemblyError::missing_field(RecordSource::Activity, label, field);

    let details = node.details.as_ref().ok_or_else(|| missing("details"))?;
    let chain_name = node.chain.as_deref().ok_or_else(|| missing("chain"))?;
    let chain = Chain::from_str(chain_name)
        .map_err(|_| AssemblyError::unsupported_chain(RecordSource::Activity, label, chain_name))?;
    let owner_address = record.owner_address.as_deref().and_then(Address::parse)
        .ok_or_else(|| missing("ownerAddress"))?;
    let timestamp = node.timestamp.ok_or_else(|| missing("timestamp"))?;
    let added_time = seconds_to_millis(timestamp)
        .ok_or_else(|| AssemblyError::invalid_timestamp(RecordSource::Activity, label, timestamp))?;

    let context = ExtractionContext { chain, owner: &owner_address };

    let (id, type_info, fees) = match details.typename.as_deref() {
        Some(ON_CHAIN_TYPENAME) => {
            let id = details.hash.as_deref().and_then(canonical_hash).or_else(|| node.id.clone())
                .ok_or_else(|| missing("hash"))?;
            (id, on_chain_type_info(node, details, &context), on_chain_fees(details))
        },
        Some(ON_RAMP_TYPENAME) => {
            let transfer = details.on_ramp_transfer.as_ref();
            let id = transfer.and_then(|transfer| transfer.external_session_id.clone())
                .or_else(|| transfer.and_then(|transfer| transfer.transaction_reference_id.clone()))
                .or_else(|| node.id.clone())
                .ok_or_else(|| missing("onRampTransfer.externalSessionId"))?;
            let type_info = transfer.and_then(|transfer| extract_on_ramp(transfer, &context))
                .unwrap_or_else(|| {
                    let token = transfer.and_then(|transfer| transfer.token.as_ref()).and_then(|token| token.address.as_deref());
                    TransactionTypeInfo::unknown(token.and_then(Address::parse))
                });
            let fees = transfer.map(|transfer| (transfer.network_fee, transfer.transaction_fee, transfer.total_fee))
                .unwrap_or_default();
            (id, type_info, fees)
        },
        typename => {
            debug!("Record [{label:?}] has unrecognized typename [{typename:?}], showing as unknown");
            let id = details.hash.as_deref().and_then(canonical_hash).or_else(|| node.id.clone())
                .ok_or_else(|| missing("id"))?;
            (id, unknown_type_info(details), (None, None, None))
        }
    };

    // A nonce only identifies a transaction together with its real sender.
    let sender = details.from.as_deref().and_then(Address::parse);
    let nonce = sender.as_ref().and(details.nonce);

    let from = sender
        .or_else(|| details.receiver_address.as_deref().and_then(Address::parse))
        .unwrap_or_else(|| owner_address.clone());

    let (network_fee, transaction_fee, total_fee) = fees;

    Ok(TransactionDetails {
        id,
        chain_id: chain,
        hash: details.hash.as_deref().and_then(canonical_hash),
        owner_address,
        from,
        nonce,
        added_time,
        status: activity_status(details.transaction_type.as_deref(), details.status.as_deref()),
        type_info,
        options: TransactionOptions::default(),
        network_fee,
        transaction_fee,
        total_fee
    })
}

fn on_chain_type_info(node: &ActivityNode, details: &ActivityDetails, context: &ExtractionContext) -> TransactionTypeInfo {
    let changes = details.changes();
    let kind = details.transaction_type.as_deref().map(|kind| kind.trim().to_ascii_uppercase());

    let extracted = match kind.as_deref() {
        Some("SEND") => extract_send(&changes, context),
        Some("RECEIVE") => extract_receive(&changes, context),
        Some("APPROVE") => extract_approve(&changes, context),
        Some("SWAP") => extract_swap(&changes, context),
        Some("MINT") => extract_nft_mint(&changes, context),
        _ => None
    };

    extracted.unwrap_or_else(|| {
        debug!("Record [{:?}] of kind [{kind:?}] has no usable asset change, showing as unknown", node.id);
        unknown_type_info(details)
    })
}

fn unknown_type_info(details: &ActivityDetails) -> TransactionTypeInfo {
    TransactionTypeInfo::unknown(details.to.as_deref().and_then(Address::parse))
}

fn on_chain_fees(details: &ActivityDetails) -> (Option<Decimal>, Option<Decimal>, Option<Decimal>) {
    let network_fee = details.network_fee.as_ref()
        .and_then(|fee| fee.quantity.as_deref())
        .and_then(|quantity| Decimal::from_str(quantity.trim()).ok());

    (network_fee, None, network_fee)
}

fn assemble_trading_api_order(order: &TradingApiOrder) -> Result<TransactionDetails, AssemblyError> {
    let label = order.order_id.as_deref();
    let missing = |field| AssemblyError::missing_field(RecordSource::TradingApi, label, field);

    let id = order.order_id.clone().ok_or_else(|| missing("orderId"))?;
    let chain_id = order.chain_id.ok_or_else(|| missing("chainId"))?;
    let chain = Chain::from_id(chain_id)
        .ok_or_else(|| AssemblyError::unsupported_chain(RecordSource::TradingApi, label, chain_id))?;
    let owner_address = order.swapper.as_deref().and_then(Address::parse).ok_or_else(|| missing("swapper"))?;
    let created_at = order.created_at.ok_or_else(|| missing("createdAt"))?;
    let added_time = seconds_to_millis(created_at)
        .ok_or_else(|| AssemblyError::invalid_timestamp(RecordSource::TradingApi, label, created_at))?;

    let context = ExtractionContext { chain, owner: &owner_address };
    let type_info = extract_trading_api_swap(order, &context).unwrap_or_else(|| {
        let input_token = order.input.as_ref().and_then(|input| input.token.as_deref());
        TransactionTypeInfo::unknown(input_token.and_then(Address::parse))
    });

    Ok(TransactionDetails {
        id,
        chain_id: chain,
        hash: order.tx_hash.as_deref().and_then(canonical_hash),
        from: owner_address.clone(),
        owner_address,
        nonce: None,
        added_time,
        status: trading_api_status(order.order_status.as_deref()),
        type_info,
        options: TransactionOptions::default(),
        network_fee: None,
        transaction_fee: None,
        total_fee: None
    })
}

fn assemble_fiat_on_ramp(transaction: &FiatOnRampTransaction) -> Result<TransactionDetails, AssemblyError> {
    let label = transaction.external_session_id.as_deref();
    let missing = |field| AssemblyError::missing_field(RecordSource::FiatOnRamp, label, field);

    let id = transaction.external_session_id.clone().ok_or_else(|| missing("externalSessionId"))?;
    let crypto = transaction.crypto_details.as_ref().ok_or_else(|| missing("cryptoDetails"))?;
    let chain_id = crypto.chain_id.as_deref().ok_or_else(|| missing("cryptoDetails.chainId"))?;
    let chain = Chain::from_str(chain_id)
        .map_err(|_| AssemblyError::unsupported_chain(RecordSource::FiatOnRamp, label, chain_id))?;
    let owner_address = crypto.wallet_address.as_deref().and_then(Address::parse)
        .ok_or_else(|| missing("cryptoDetails.walletAddress"))?;
    let created_at = transaction.created_at.as_deref().ok_or_else(|| missing("createdAt"))?;
    let added_time = rfc3339_to_millis(created_at)
        .ok_or_else(|| AssemblyError::invalid_timestamp(RecordSource::FiatOnRamp, label, created_at))?;

    let context = ExtractionContext { chain, owner: &owner_address };
    let type_info = extract_fiat_purchase(transaction, &context)
        .unwrap_or_else(|| TransactionTypeInfo::unknown(None));

    let total_fee = match (crypto.network_fee, crypto.transaction_fee) {
        (Some(network_fee), Some(transaction_fee)) => network_fee.checked_add(transaction_fee),
        (network_fee, transaction_fee) => network_fee.or(transaction_fee)
    };

    Ok(TransactionDetails {
        id,
        chain_id: chain,
        hash: crypto.blockchain_transaction_id.as_deref().and_then(canonical_hash),
        from: owner_address.clone(),
        owner_address,
        nonce: None,
        added_time,
        status: fiat_on_ramp_status(transaction.status.as_deref()),
        type_info,
        options: TransactionOptions::default(),
        network_fee: crypto.network_fee,
        transaction_fee: crypto.transaction_fee,
        total_fee
    })
}

fn seconds_to_millis(seconds: u64) -> Option<Timestamp> {
    seconds.checked_mul(1_000)
}

fn rfc3339_to_millis(value: &str) -> Option<Timestamp> {
    let parsed = DateTime::parse_from_rfc3339(value.trim()).ok()?;
    Timestamp::try_from(parsed.timestamp_millis()).ok()
}
