use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::feed::{ExternalKey, FeedScope};
use crate::models::{TransactionStatus, TransactionTypeInfo};
use crate::types::{canonical_hash, Address, Chain, Nonce, Timestamp};

/// Request metadata kept alongside locally-submitted transactions.
///
/// The pipeline carries it through untouched; it is only read to decide whether
/// a pending transaction can be resubmitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionOptions {
    pub request: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<Timestamp>
}

/// One monetary action visible to the user, on-chain or off-chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    /// Provider-specific identifier, unique within an owner and chain.
    pub id: String,
    pub chain_id: Chain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Wallet whose activity list the record belongs to.
    pub owner_address: Address,
    pub from: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Nonce>,
    pub added_time: Timestamp,
    pub status: TransactionStatus,
    pub type_info: TransactionTypeInfo,
    #[serde(default)]
    pub options: TransactionOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fee: Option<Decimal>
}

impl TransactionDetails {
    pub fn scope(&self) -> FeedScope {
        FeedScope::new(self.owner_address.clone(), self.chain_id)
    }

    /// External keys in matching precedence: sender nonce, hash, then id.
    pub fn keys(&self) -> Vec<ExternalKey> {
        let mut keys = Vec::with_capacity(3);

        if let Some(nonce) = self.nonce {
            keys.push(ExternalKey::Nonce(self.chain_id, self.from.clone(), nonce));
        }

        if let Some(hash) = self.hash.as_deref().and_then(canonical_hash) {
            keys.push(ExternalKey::Hash(self.chain_id, hash));
        }

        keys.push(ExternalKey::Id(self.chain_id, self.id.clone()));

        keys
    }

    /// The most specific key, used to identify the record in logs and errors.
    pub fn primary_key(&self) -> ExternalKey {
        let mut keys = self.keys();
        keys.swap_remove(0)
    }

    pub fn is_resubmittable(&self) -> bool {
        self.status == TransactionStatus::Pending && !self.options.request.is_empty()
    }
}
