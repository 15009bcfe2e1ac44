mod details;
mod errors;
mod feed;
#[cfg(test)]
mod tests;
mod type_info;

use serde::{Deserialize, Serialize};

pub use details::{TransactionDetails, TransactionOptions};
pub use errors::FeedError;
pub use feed::{reconcile, ActivityFeed, ExternalKey, FeedScope};
pub use type_info::{AssetType, NftSummary, ServiceProvider, TradeType, TransactionTypeInfo, TransferredAsset};

/// Lifecycle status shared by every kind of activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
    Cancelling,
    Unknown
}

impl TransactionStatus {
    /// Final statuses never regress once displayed.
    pub fn is_final(self) -> bool {
        matches!(self, TransactionStatus::Success | TransactionStatus::Failed | TransactionStatus::Cancelled)
    }

    /// Whether a record carrying `self` may replace one of the same origin currently showing `existing`.
    pub fn may_replace(self, existing: TransactionStatus) -> bool {
        if existing.is_final() {
            return self.is_final();
        }

        match (self, existing) {
            (TransactionStatus::Unknown, TransactionStatus::Unknown) => true,
            (TransactionStatus::Unknown, _) => false,
            (TransactionStatus::Pending, TransactionStatus::Cancelling) => false,
            _ => true
        }
    }
}

/// Where a record entered the feed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Submitted by this client and not yet confirmed by a provider.
    Local,
    /// Reported by a provider.
    Remote
}
