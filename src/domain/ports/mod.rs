//! Port trait definitions (Hexagonal Architecture)
//!
//! The batch processor only talks to the outside world through these
//! traits:
//! - MetadataSource: fetch off-chain metadata for a URI
//! - NftMinter: submit a mint for a metadata URI
//!
//! `infrastructure::gateway` provides the HTTP implementation; tests supply
//! scripted ones.

pub mod nft_client;

pub use nft_client::{GatewayError, MetadataSource, MintContext, MintReceipt, NftMinter};
