pub mod config;
pub mod metadata;
pub mod mint_result;
pub mod target;
pub mod wallet;

pub use config::{ConfigContext, ConfigOverrides, Environment, LogLevel, PersistedConfig};
pub use metadata::NftMetadata;
pub use mint_result::{MintResult, RetryCache};
pub use target::{Target, TargetKind};
pub use wallet::Wallet;
