use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Activity,
    TradingApi,
    FiatOnRamp
}

impl Display for RecordSource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::Activity => formatter.write_str("activity"),
            RecordSource::TradingApi => formatter.write_str("tradingApi"),
            RecordSource::FiatOnRamp => formatter.write_str("fiatOnRamp")
        }
    }
}

/// A provider record that cannot be shown at all, not even as an unknown transaction.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Record [{record}] from [{provider}] is missing required field [{field}]")]
    MissingField {
        provider: RecordSource,
        record: String,
        field: &'static str
    },
    #[error("Record [{record}] from [{provider}] is on unsupported chain [{chain}]")]
    UnsupportedChain {
        provider: RecordSource,
        record: String,
        chain: String
    },
    #[error("Record [{record}] from [{provider}] has an invalid timestamp [{value}]")]
    InvalidTimestamp {
        provider: RecordSource,
        record: String,
        value: String
    }
}

impl AssemblyError {
    pub fn missing_field(provider: RecordSource, record: Option<&str>, field: &'static str) -> Self {
        Self::MissingField {
            provider,
            record: record_label(record),
            field
        }
    }

    pub fn unsupported_chain(provider: RecordSource, record: Option<&str>, chain: impl Display) -> Self {
        Self::UnsupportedChain {
            provider,
            record: record_label(record),
            chain: chain.to_string()
        }
    }

    pub fn invalid_timestamp(provider: RecordSource, record: Option<&str>, value: impl Display) -> Self {
        Self::InvalidTimestamp {
            provider,
            record: record_label(record),
            value: value.to_string()
        }
    }
}

fn record_label(record: Option<&str>) -> String {
    record.unwrap_or("<unidentified>").to_string()
}
