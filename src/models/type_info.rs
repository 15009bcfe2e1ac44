use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Address, CurrencyId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftSummary {
    pub name: Option<String>,
    pub collection_name: Option<String>,
    pub image_url: Option<String>,
    pub token_id: String,
    pub address: Address
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    /// Provider code, e.g. `MOONPAY`.
    pub id: String,
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo_light_url: Option<String>,
    pub logo_dark_url: Option<String>,
    pub support_url: Option<String>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Buy,
    Sell
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    Currency,
    #[serde(rename = "ERC721")]
    Erc721,
    #[serde(rename = "ERC1155")]
    Erc1155
}

/// What moved in a send or receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "assetType")]
pub enum TransferredAsset {
    #[serde(rename_all = "camelCase")]
    Currency {
        token_address: Address,
        currency_amount_raw: String
    },
    #[serde(rename = "ERC721", rename_all = "camelCase")]
    Erc721 {
        token_address: Address,
        nft_summary: NftSummary
    },
    #[serde(rename = "ERC1155", rename_all = "camelCase")]
    Erc1155 {
        token_address: Address,
        nft_summary: NftSummary
    }
}

impl TransferredAsset {
    pub fn asset_type(&self) -> AssetType {
        match self {
            TransferredAsset::Currency { .. } => AssetType::Currency,
            TransferredAsset::Erc721 { .. } => AssetType::Erc721,
            TransferredAsset::Erc1155 { .. } => AssetType::Erc1155
        }
    }

    pub fn token_address(&self) -> &Address {
        match self {
            TransferredAsset::Currency { token_address, .. }
            | TransferredAsset::Erc721 { token_address, .. }
            | TransferredAsset::Erc1155 { token_address, .. } => token_address
        }
    }
}

/// Category-specific part of an activity record.
///
/// Exactly one variant is active per record and each variant carries only the
/// fields meaningful to its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionTypeInfo {
    #[serde(rename_all = "camelCase")]
    Send {
        recipient: Address,
        asset: TransferredAsset
    },
    #[serde(rename_all = "camelCase")]
    Receive {
        sender: Address,
        asset: TransferredAsset
    },
    #[serde(rename_all = "camelCase")]
    Approve {
        token_address: Address,
        spender: Address,
        /// `INF` for unlimited approvals.
        approval_amount: Option<String>
    },
    #[serde(rename_all = "camelCase")]
    Swap {
        input_currency_id: CurrencyId,
        output_currency_id: CurrencyId,
        input_currency_amount_raw: String,
        output_currency_amount_raw: String
    },
    #[serde(rename_all = "camelCase")]
    Wrap {
        unwrapped: bool,
        currency_amount_raw: String
    },
    #[serde(rename = "NFTMint", rename_all = "camelCase")]
    NftMint {
        nft_summary: NftSummary,
        purchase_currency_id: Option<CurrencyId>,
        purchase_currency_amount_raw: Option<String>
    },
    #[serde(rename = "NFTTrade", rename_all = "camelCase")]
    NftTrade {
        trade_type: TradeType,
        nft_summary: NftSummary,
        purchase_currency_id: CurrencyId,
        purchase_currency_amount_raw: String
    },
    #[serde(rename_all = "camelCase")]
    OnRampPurchase {
        id: String,
        destination_token_symbol: Option<String>,
        destination_token_address: Address,
        destination_token_amount: Decimal,
        service_provider: ServiceProvider,
        source_currency: String,
        source_amount: Decimal
    },
    #[serde(rename_all = "camelCase")]
    OnRampTransfer {
        id: String,
        destination_token_symbol: Option<String>,
        destination_token_address: Address,
        destination_token_amount: Decimal,
        service_provider: ServiceProvider
    },
    #[serde(rename_all = "camelCase")]
    FiatPurchase {
        id: String,
        input_currency_code: Option<String>,
        input_currency_amount: Option<Decimal>,
        output_currency_id: Option<CurrencyId>,
        output_currency_amount: Option<Decimal>,
        service_provider: String,
        synced_with_backend: bool
    },
    #[serde(rename_all = "camelCase")]
    Unknown {
        token_address: Option<Address>
    }
}

impl TransactionTypeInfo {
    pub fn unknown(token_address: Option<Address>) -> Self {
        TransactionTypeInfo::Unknown { token_address }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransactionTypeInfo::Send { .. } => "Send",
            TransactionTypeInfo::Receive { .. } => "Receive",
            TransactionTypeInfo::Approve { .. } => "Approve",
            TransactionTypeInfo::Swap { .. } => "Swap",
            TransactionTypeInfo::Wrap { .. } => "Wrap",
            TransactionTypeInfo::NftMint { .. } => "NFTMint",
            TransactionTypeInfo::NftTrade { .. } => "NFTTrade",
            TransactionTypeInfo::OnRampPurchase { .. } => "OnRampPurchase",
            TransactionTypeInfo::OnRampTransfer { .. } => "OnRampTransfer",
            TransactionTypeInfo::FiatPurchase { .. } => "FiatPurchase",
            TransactionTypeInfo::Unknown { .. } => "Unknown"
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TransactionTypeInfo::Unknown { .. })
    }
}
