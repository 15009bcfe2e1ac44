use crate::models::TransactionStatus;
use crate::models::TransactionStatus::{Cancelled, Cancelling, Failed, Pending, Success, Unknown};

/// Provider status vocabulary mapped onto `TransactionStatus`.
///
/// Lookups are case-insensitive. Strings missing from the table map to `default`.
#[derive(Debug)]
pub struct StatusTable {
    entries: &'static [(&'static str, TransactionStatus)],
    default: TransactionStatus
}

impl StatusTable {
    pub const fn new(entries: &'static [(&'static str, TransactionStatus)], default: TransactionStatus) -> Self {
        Self { entries, default }
    }

    pub fn map(&self, status: Option<&str>) -> TransactionStatus {
        let Some(status) = status.map(str::trim) else {
            return self.default;
        };

        self.entries.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(status))
            .map(|(_, mapped)| *mapped)
            .unwrap_or(self.default)
    }
}

pub const ACTIVITY_STATUSES: StatusTable = StatusTable::new(&[
    ("CONFIRMED", Success),
    ("FAILED", Failed),
    ("PENDING", Pending)
], Unknown);

/// Statuses of a cancellation transaction describe the cancelled transaction.
pub const CANCELLATION_STATUSES: StatusTable = StatusTable::new(&[
    ("CONFIRMED", Cancelled),
    ("FAILED", Failed),
    ("PENDING", Cancelling)
], Unknown);

/// Unrecognized purchase statuses stay `Pending` so an in-flight purchase is never hidden as failed.
pub const FIAT_ON_RAMP_STATUSES: StatusTable = StatusTable::new(&[
    ("FAILED", Failed),
    ("ERROR", Failed),
    ("VOIDED", Failed),
    ("SETTLED", Success)
], Pending);

pub const TRADING_API_STATUSES: StatusTable = StatusTable::new(&[
    ("open", Pending),
    ("unverified", Pending),
    ("filled", Success),
    ("error", Failed),
    ("expired", Failed),
    ("insufficient-funds", Failed),
    ("cancelled", Cancelled)
], Unknown);

pub fn activity_status(transaction_type: Option<&str>, status: Option<&str>) -> TransactionStatus {
    let is_cancellation = transaction_type.is_some_and(|kind| kind.trim().eq_ignore_ascii_case("CANCEL"));

    if is_cancellation {
        CANCELLATION_STATUSES.map(status)
    } else {
        ACTIVITY_STATUSES.map(status)
    }
}

pub fn fiat_on_ramp_status(status: Option<&str>) -> TransactionStatus {
    FIAT_ON_RAMP_STATUSES.map(status)
}

pub fn trading_api_status(status: Option<&str>) -> TransactionStatus {
    TRADING_API_STATUSES.map(status)
}
