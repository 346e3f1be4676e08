use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::domain::models::NftMetadata;
use crate::domain::ports::{GatewayError, MetadataSource, MintContext, MintReceipt, NftMinter};

/// JSON-RPC method invoked on the endpoint for each mint
pub const MINT_METHOD: &str = "mintNft";

/// Configuration for the HTTP gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP gateway used for `ipfs://` URIs
    pub ipfs_gateway: String,
    /// HTTP gateway used for `ar://` URIs
    pub arweave_gateway: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            ipfs_gateway: "https://ipfs.io/ipfs".to_string(),
            arweave_gateway: "https://arweave.net".to_string(),
            timeout_secs: 60,
        }
    }
}

/// HTTP implementation of both collaborator ports
///
/// Metadata is fetched with a plain `GET`. Mints are submitted as a
/// JSON-RPC 2.0 `mintNft` call against the resolved endpoint, carrying the
/// metadata URI, the wallet address and a signature over the URI; the
/// endpoint builds, signs and confirms the transaction.
pub struct HttpNftGateway {
    http_client: ReqwestClient,
    config: GatewayConfig,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: MintParams<'a>,
}

#[derive(Debug, Serialize)]
struct MintParams<'a> {
    uri: &'a str,
    authority: String,
    signature: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<RpcMintResult>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcMintResult {
    tx_id: Option<String>,
    mint: Option<String>,
    metadata: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl HttpNftGateway {
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_config(GatewayConfig::default())
    }

    pub fn with_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("batchmint/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Translate a metadata URI into the HTTP URL it is fetched from
    pub fn fetch_url(&self, uri: &str) -> Result<String, GatewayError> {
        let parsed =
            reqwest::Url::parse(uri).map_err(|_| GatewayError::UnsupportedUri(uri.to_string()))?;

        let rest = || uri.split_once("://").map_or("", |(_, rest)| rest);
        match parsed.scheme() {
            "http" | "https" => Ok(uri.to_string()),
            "ipfs" => Ok(format!(
                "{}/{}",
                self.config.ipfs_gateway.trim_end_matches('/'),
                rest().trim_start_matches("ipfs/")
            )),
            "ar" => Ok(format!(
                "{}/{}",
                self.config.arweave_gateway.trim_end_matches('/'),
                rest()
            )),
            _ => Err(GatewayError::UnsupportedUri(uri.to_string())),
        }
    }
}

#[async_trait]
impl MetadataSource for HttpNftGateway {
    #[instrument(skip(self))]
    async fn lookup_metadata(&self, uri: &str) -> Result<NftMetadata, GatewayError> {
        let url = self.fetch_url(uri)?;
        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("metadata is not valid JSON: {e}")))
    }
}

#[async_trait]
impl NftMinter for HttpNftGateway {
    #[instrument(skip(self, ctx), fields(authority = %ctx.wallet.address()))]
    async fn mint_nft(&self, ctx: &MintContext, uri: &str) -> Result<MintReceipt, GatewayError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: MINT_METHOD,
            params: MintParams {
                uri,
                authority: ctx.wallet.address(),
                signature: ctx.wallet.sign_hex(uri.as_bytes()),
            },
        };

        let response = self
            .http_client
            .post(&ctx.rpc_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: ctx.rpc_url.clone(),
            });
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(GatewayError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = body
            .result
            .ok_or_else(|| GatewayError::InvalidResponse("missing result".to_string()))?;

        match (result.tx_id, result.mint, result.metadata) {
            (Some(tx_id), Some(mint), Some(metadata))
                if !tx_id.is_empty() && !mint.is_empty() && !metadata.is_empty() =>
            {
                debug!(%tx_id, %mint, "mint confirmed");
                Ok(MintReceipt {
                    tx_id,
                    mint,
                    metadata,
                })
            }
            _ => Err(GatewayError::InvalidResponse(
                "result must contain txId, mint and metadata".to_string(),
            )),
        }
    }
}
