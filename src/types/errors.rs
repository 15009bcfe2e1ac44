use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurrencyIdError {
    #[error("Currency id error: {0}")]
    InvalidFormat(String),
    #[error("Currency id error: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("Currency id error: unsupported chain [{0}]")]
    UnsupportedChain(String)
}
