pub mod actors;
pub mod engine;
pub mod models;
pub mod parsing;
pub mod storage;
pub mod types;

pub use engine::{AsyncEngine, InputRecord};
pub use models::{reconcile, ActivityFeed, TransactionDetails, TransactionStatus, TransactionTypeInfo};
pub use parsing::{assemble, try_assemble, ProviderRecord};
pub use storage::ActivityStorage;
pub use types::{normalize_currency, to_raw_amount, CurrencyId};
