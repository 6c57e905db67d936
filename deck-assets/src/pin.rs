//! Content-addressed pinning client with a local inline fallback.
//!
//! Uploads go to a pinning service (file and JSON endpoints); on any
//! failure the caller can degrade to embedding the bytes as a data URI so
//! the editing operation still succeeds with a local asset reference.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use url::Url;

use deck_core::{DeckStore, ElementId, ElementKind};

use crate::error::{AssetError, AssetResult};

/// Successful pin: the content hash and a gateway URL serving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinReceipt {
    /// Content hash assigned by the service.
    pub hash: String,
    /// Gateway URL resolving the hash.
    pub url: String,
}

/// Wire shape of the pinning service's success response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinResponse {
    ipfs_hash: String,
}

/// Client for a content-addressed pinning service.
#[derive(Debug, Clone)]
pub struct PinClient {
    http: reqwest::Client,
    api_base: Url,
    gateway: Url,
    token: String,
}

impl PinClient {
    /// Create a client for the given API base, gateway base, and bearer
    /// token.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL fails to parse.
    pub fn new(api_base: &str, gateway: &str, token: impl Into<String>) -> AssetResult<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            api_base: Url::parse(api_base)?,
            gateway: Url::parse(gateway)?,
            token: token.into(),
        })
    }

    /// Pin a binary blob, returning its hash and gateway URL.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success response.
    pub async fn pin_bytes(&self, bytes: &[u8], name: &str) -> AssetResult<PinReceipt> {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let endpoint = self.api_base.join("pinning/pinFileToIPFS")?;

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;
        self.read_receipt(response).await
    }

    /// Pin a JSON payload, returning its hash and gateway URL.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success response.
    pub async fn pin_json<T: Serialize + ?Sized>(
        &self,
        content: &T,
        name: &str,
    ) -> AssetResult<PinReceipt> {
        let endpoint = self.api_base.join("pinning/pinJSONToIPFS")?;
        let body = serde_json::json!({
            "pinataContent": content,
            "pinataMetadata": { "name": name },
            "pinataOptions": { "cidVersion": 1 },
        });

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        self.read_receipt(response).await
    }

    async fn read_receipt(&self, response: reqwest::Response) -> AssetResult<PinReceipt> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AssetError::Rejected(format!("{status}: {detail}")));
        }
        let body: PinResponse = response.json().await?;
        let url = self.gateway_url(&body.ipfs_hash);
        Ok(PinReceipt {
            hash: body.ipfs_hash,
            url,
        })
    }

    /// Resolve a hash to a gateway URL. Full `http(s)` URLs pass through
    /// unchanged; `ipfs://` references are rewritten onto the gateway.
    #[must_use]
    pub fn gateway_url(&self, hash: &str) -> String {
        if hash.starts_with("http") {
            return hash.to_string();
        }
        let hash = hash.strip_prefix("ipfs://").unwrap_or(hash);
        format!("{}/{hash}", self.gateway.as_str().trim_end_matches('/'))
    }
}

/// A resolved asset reference: pinned remotely or embedded locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    /// Successfully pinned; carries the receipt.
    Pinned(PinReceipt),
    /// Upload failed; the bytes live inline as a data URI.
    Inline(String),
}

impl AssetRef {
    /// The source string to store in an image element's `src`.
    #[must_use]
    pub fn src(&self) -> &str {
        match self {
            Self::Pinned(receipt) => &receipt.url,
            Self::Inline(uri) => uri,
        }
    }
}

/// Embed bytes as a base64 data URI.
#[must_use]
pub fn inline_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

/// Pin bytes, falling back to an inline data URI on any failure so the
/// edit never blocks on the network.
pub async fn pin_or_inline(client: &PinClient, bytes: &[u8], mime: &str, name: &str) -> AssetRef {
    match client.pin_bytes(bytes, name).await {
        Ok(receipt) => AssetRef::Pinned(receipt),
        Err(e) => {
            tracing::warn!("Pin failed for {name}, embedding locally: {e}");
            AssetRef::Inline(inline_data_uri(bytes, mime))
        }
    }
}

/// Write a resolved asset reference into an image element.
///
/// A missing element (deleted or replaced since the upload started) makes
/// this a no-op, which is the guard against a stale upload writing into a
/// newer document.
pub fn attach_asset(store: &mut DeckStore, id: ElementId, asset: &AssetRef) {
    store.update_element(id, |element| {
        if let ElementKind::Image { src, ipfs_hash, .. } = &mut element.kind {
            *src = asset.src().to_string();
            *ipfs_hash = match asset {
                AssetRef::Pinned(receipt) => Some(receipt.hash.clone()),
                AssetRef::Inline(_) => None,
            };
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::ElementType;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PinClient {
        PinClient::new(&server.uri(), "https://gateway.test/ipfs", "test-jwt")
            .expect("client should build")
    }

    #[tokio::test]
    async fn test_pin_json_returns_receipt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinJSONToIPFS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "IpfsHash": "bafytest123",
                "PinSize": 42,
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let receipt = client
            .pin_json(&serde_json::json!({"title": "Deck"}), "deck.json")
            .await
            .expect("pin should succeed");

        assert_eq!(receipt.hash, "bafytest123");
        assert_eq!(receipt.url, "https://gateway.test/ipfs/bafytest123");
    }

    #[tokio::test]
    async fn test_pin_bytes_rejection_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.pin_bytes(b"image-bytes", "cover.png").await;
        assert!(matches!(result, Err(AssetError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_pin_or_inline_falls_back_to_data_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let asset = pin_or_inline(&client, b"png-bytes", "image/png", "cover.png").await;
        let AssetRef::Inline(uri) = &asset else {
            panic!("expected inline fallback");
        };
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_gateway_url_variants() {
        let client = PinClient::new(
            "https://api.test",
            "https://gateway.test/ipfs",
            "jwt",
        )
        .expect("client");

        assert_eq!(
            client.gateway_url("bafyabc"),
            "https://gateway.test/ipfs/bafyabc"
        );
        assert_eq!(
            client.gateway_url("ipfs://bafyabc"),
            "https://gateway.test/ipfs/bafyabc"
        );
        assert_eq!(
            client.gateway_url("https://elsewhere.test/x.png"),
            "https://elsewhere.test/x.png"
        );
    }

    #[test]
    fn test_attach_asset_writes_src_and_hash() {
        let mut store = DeckStore::new();
        let element = store.add_element(ElementType::Image);

        let asset = AssetRef::Pinned(PinReceipt {
            hash: "bafyhash".to_string(),
            url: "https://gateway.test/ipfs/bafyhash".to_string(),
        });
        attach_asset(&mut store, element.id, &asset);

        let stored = store.element(element.id).expect("element");
        let ElementKind::Image { src, ipfs_hash, .. } = &stored.kind else {
            panic!("expected image");
        };
        assert_eq!(src, "https://gateway.test/ipfs/bafyhash");
        assert_eq!(ipfs_hash.as_deref(), Some("bafyhash"));
    }

    #[test]
    fn test_attach_asset_to_deleted_element_is_noop() {
        let mut store = DeckStore::new();
        let element = store.add_element(ElementType::Image);
        store.delete_element(element.id);
        let before = store.document().clone();

        let asset = AssetRef::Inline(inline_data_uri(b"x", "image/png"));
        attach_asset(&mut store, element.id, &asset);
        assert_eq!(*store.document(), before);
    }
}
