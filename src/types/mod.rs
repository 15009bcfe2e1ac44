mod address;
mod amount;
mod chain;
mod currency;
mod errors;

pub use address::{canonical_hash, Address};
pub use amount::to_raw_amount;
pub use chain::{Chain, DEFAULT_NATIVE_ADDRESS, ZERO_ADDRESS};
pub use currency::{normalize_currency, normalize_for_chain, CurrencyId, TokenStandard};
pub use errors::CurrencyIdError;

pub type Nonce = u64;
/// Milliseconds since the unix epoch.
pub type Timestamp = u64;
