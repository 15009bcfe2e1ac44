//! Provider response shapes consumed by the assembler.
//!
//! Every field is optional: providers add, drop and rename fields over time and
//! a missing field must degrade a record, not reject it.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One node of the GraphQL activity feed, paired with the wallet it was queried for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityRecord {
    pub owner_address: Option<String>,
    pub node: ActivityNode
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityNode {
    pub id: Option<String>,
    /// Backend chain name, e.g. `ETHEREUM`.
    pub chain: Option<String>,
    /// Seconds since the unix epoch.
    pub timestamp: Option<u64>,
    pub details: Option<ActivityDetails>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityDetails {
    #[serde(rename = "__typename")]
    pub typename: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub status: Option<String>,
    pub hash: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub nonce: Option<u64>,
    pub asset_changes: Option<Vec<Option<AssetChange>>>,
    pub network_fee: Option<NetworkFee>,
    pub receiver_address: Option<String>,
    pub on_ramp_transfer: Option<OnRampTransfer>
}

impl ActivityDetails {
    pub fn changes(&self) -> Vec<&AssetChange> {
        self.asset_changes.iter().flatten().flatten().collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetChange {
    /// `TokenTransfer`, `NftTransfer`, `TokenApproval`, ...
    #[serde(rename = "__typename")]
    pub typename: Option<String>,
    pub token_standard: Option<String>,
    pub nft_standard: Option<String>,
    pub asset: Option<Asset>,
    pub quantity: Option<String>,
    /// `IN` or `OUT` relative to the queried wallet.
    pub direction: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub approved_address: Option<String>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Asset {
    pub address: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<u8>,
    pub token_id: Option<String>,
    pub collection: Option<Collection>,
    pub image: Option<Image>,
    pub nft_contract: Option<NftContract>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub name: Option<String>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: Option<String>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NftContract {
    pub address: Option<String>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkFee {
    pub quantity: Option<String>,
    pub token_symbol: Option<String>,
    pub token_address: Option<String>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnRampTransfer {
    pub transaction_reference_id: Option<String>,
    pub external_session_id: Option<String>,
    pub token: Option<Asset>,
    pub token_standard: Option<String>,
    pub amount: Option<Decimal>,
    pub source_currency: Option<String>,
    pub source_amount: Option<Decimal>,
    pub service_provider: Option<ServiceProviderInfo>,
    pub network_fee: Option<Decimal>,
    pub transaction_fee: Option<Decimal>,
    pub total_fee: Option<Decimal>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceProviderInfo {
    pub service_provider: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo_light_url: Option<String>,
    pub logo_dark_url: Option<String>,
    pub support_url: Option<String>
}

/// Order returned by the REST trading API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingApiOrder {
    pub order_id: Option<String>,
    pub order_status: Option<String>,
    pub chain_id: Option<u64>,
    pub swapper: Option<String>,
    pub tx_hash: Option<String>,
    /// Seconds since the unix epoch.
    pub created_at: Option<u64>,
    pub input: Option<OrderInput>,
    pub outputs: Option<Vec<OrderOutput>>,
    pub settled_amounts: Option<Vec<SettledAmount>>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderInput {
    pub token: Option<String>,
    pub start_amount: Option<String>,
    pub end_amount: Option<String>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderOutput {
    pub token: Option<String>,
    pub start_amount: Option<String>,
    pub end_amount: Option<String>,
    pub recipient: Option<String>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettledAmount {
    pub token_in: Option<String>,
    pub amount_in: Option<String>,
    pub token_out: Option<String>,
    pub amount_out: Option<String>
}

/// Transaction reported by the fiat on-ramp provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiatOnRampTransaction {
    pub external_session_id: Option<String>,
    pub status: Option<String>,
    /// RFC 3339 timestamp.
    pub created_at: Option<String>,
    pub source_amount: Option<Decimal>,
    pub source_currency_code: Option<String>,
    pub destination_amount: Option<Decimal>,
    pub destination_currency_code: Option<String>,
    pub destination_contract_address: Option<String>,
    pub service_provider: Option<String>,
    pub crypto_details: Option<CryptoDetails>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CryptoDetails {
    pub wallet_address: Option<String>,
    pub chain_id: Option<String>,
    pub blockchain_transaction_id: Option<String>,
    pub network_fee: Option<Decimal>,
    pub transaction_fee: Option<Decimal>
}
