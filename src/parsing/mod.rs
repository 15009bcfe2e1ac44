mod assembler;
mod errors;
mod extractors;
mod payload;
mod status;

pub use assembler::{assemble, try_assemble, ProviderRecord};
pub use errors::{AssemblyError, RecordSource};
pub use extractors::{
    extract_approve, extract_fiat_purchase, extract_nft_mint, extract_on_ramp, extract_receive, extract_send,
    extract_swap, extract_trading_api_swap, ExtractionContext
};
pub use payload::{
    ActivityDetails, ActivityNode, ActivityRecord, Asset, AssetChange, CryptoDetails, FiatOnRampTransaction,
    OnRampTransfer, TradingApiOrder
};
pub use status::{activity_status, fiat_on_ramp_status, trading_api_status, StatusTable};
