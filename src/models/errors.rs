use crate::models::feed::ExternalKey;
use crate::models::{TransactionDetails, TransactionStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Record [{key}] already shows [{existing:?}], ignoring update to [{incoming:?}]")]
    StaleStatus {
        key: ExternalKey,
        existing: TransactionStatus,
        incoming: TransactionStatus
    },
    #[error("Record [{key}] was delivered twice")]
    DuplicateRecord {
        key: ExternalKey
    },
    #[error("Local record [{key}] adds nothing over the provider record already shown")]
    RemoteAlreadyPresent {
        key: ExternalKey
    }
}

impl FeedError {
    pub fn stale_status(existing: &TransactionDetails, incoming: &TransactionDetails) -> Self {
        Self::StaleStatus {
            key: incoming.primary_key(),
            existing: existing.status,
            incoming: incoming.status
        }
    }

    pub fn duplicate_record(incoming: &TransactionDetails) -> Self {
        Self::DuplicateRecord { key: incoming.primary_key() }
    }

    pub fn remote_already_present(incoming: &TransactionDetails) -> Self {
        Self::RemoteAlreadyPresent { key: incoming.primary_key() }
    }
}
