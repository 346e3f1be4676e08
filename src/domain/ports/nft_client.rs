use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::models::{NftMetadata, Wallet};

/// Error type for calls into the minting collaborator
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported URI: {0}")]
    UnsupportedUri(String),
}

/// Identifiers produced by a successful mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    /// Transaction signature
    pub tx_id: String,
    /// Address of the newly created mint account
    pub mint: String,
    /// Address of the metadata account
    pub metadata: String,
}

/// Connection and signer handed to every mint call
#[derive(Debug, Clone)]
pub struct MintContext {
    pub rpc_url: String,
    pub wallet: Wallet,
}

/// Fetches off-chain metadata for a URI
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up the metadata document served at `uri`
    ///
    /// # Returns
    /// * `Ok(NftMetadata)` - the parsed (not yet validated) document
    /// * `Err(GatewayError)` - the document could not be fetched or parsed
    async fn lookup_metadata(&self, uri: &str) -> Result<NftMetadata, GatewayError>;
}

/// Creates an NFT from a metadata URI
#[async_trait]
pub trait NftMinter: Send + Sync {
    /// Mint one NFT whose metadata lives at `uri`
    ///
    /// A call either returns all three identifiers or fails as a whole;
    /// there is no partial success.
    async fn mint_nft(&self, ctx: &MintContext, uri: &str) -> Result<MintReceipt, GatewayError>;
}
