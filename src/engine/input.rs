use serde::Deserialize;

use crate::actors::FeedEvent;
use crate::models::TransactionDetails;
use crate::parsing::{assemble, ActivityRecord, FiatOnRampTransaction, ProviderRecord, TradingApiOrder};

/// One line of engine input, tagged by where the record came from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum InputRecord {
    Activity(ActivityRecord),
    TradingApi(TradingApiOrder),
    FiatOnRamp(FiatOnRampTransaction),
    /// A transaction submitted by this client, already in normalized form.
    Local(TransactionDetails)
}

impl InputRecord {
    /// Provider records go through the assembler and may be dropped; local records pass through.
    pub fn into_event(self) -> Option<FeedEvent> {
        let record = match self {
            InputRecord::Local(details) => return Some(FeedEvent::local(details)),
            InputRecord::Activity(record) => ProviderRecord::Activity(record),
            InputRecord::TradingApi(order) => ProviderRecord::TradingApi(order),
            InputRecord::FiatOnRamp(transaction) => ProviderRecord::FiatOnRamp(transaction)
        };

        assemble(&record).map(FeedEvent::remote)
    }
}
