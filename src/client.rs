use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::path::Path;
use tracing::{debug, trace};

use crate::config::CaptionBotConfig;
use crate::error::{CaptionBotError, Result};
use crate::sniff::sniff_content_type;
use crate::types::Request;

/// Multipart field name the upload endpoint reads the image from.
const UPLOAD_FIELD: &str = "file";

/// Decode a response body that holds a single JSON string literal.
///
/// The service answers `"a cat sitting on a mat"` rather than an object, so
/// escapes and unicode sequences are resolved by the JSON decoder instead of
/// trimming quote characters.
pub fn decode_quoted(status: u16, body: &str) -> Result<String> {
    serde_json::from_str::<String>(body).map_err(|source| CaptionBotError::Decode {
        status,
        body: body.to_string(),
        source,
    })
}

/// Async client for the CaptionBot captioning service.
///
/// Holds no per-call state: it is cheap to clone and calls may run
/// concurrently. Every operation performs exactly one request per endpoint
/// it touches and never retries.
///
/// # Example
/// ```no_run
/// use captionbot::CaptionBotClient;
///
/// # async fn example() -> captionbot::Result<()> {
/// let client = CaptionBotClient::new();
/// let caption = client.caption_url("https://example.com/cat.jpg").await?;
/// println!("{}", caption);
/// client.submit_rating(5).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptionBotClient {
    http: Client,
    config: CaptionBotConfig,
}

impl CaptionBotClient {
    /// Create a client pointing at the public CaptionBot endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the endpoint/timeout configuration.
    pub fn with_config(mut self, config: CaptionBotConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom `reqwest::Client` (for connection pooling, proxies, TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CaptionBotConfig {
        &self.config
    }

    // ── Captioning ──────────────────────────────────────────────────

    /// Caption the image at `image_url`.
    ///
    /// The URL is passed through untouched; the service validates it.
    pub async fn caption_url(&self, image_url: &str) -> Result<String> {
        self.send_message(&Request::caption(image_url)).await
    }

    /// Upload a local image and caption it.
    ///
    /// Fails fast: if the upload fails the caption request is never sent.
    pub async fn caption_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let image_url = self.upload_file(path).await?;
        self.caption_url(&image_url).await
    }

    /// Upload in-memory image data and caption it.
    pub async fn caption_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let image_url = self.upload_bytes(file_name, bytes).await?;
        self.caption_url(&image_url).await
    }

    // ── Feedback ────────────────────────────────────────────────────

    /// Rate the last caption. The value is sent as its decimal string and
    /// interpreted by the service; no range check happens here.
    ///
    /// Returns the service's acknowledgment text.
    pub async fn submit_rating(&self, rating: i64) -> Result<String> {
        self.send_message(&Request::feedback(rating)).await
    }

    // ── Upload ──────────────────────────────────────────────────────

    /// Upload a local image. Returns the URL the service hosts it at.
    ///
    /// The multipart filename is the path as given. The content type is
    /// sniffed from the first 512 bytes; the whole file is sent unmodified.
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CaptionBotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        self.upload_bytes(&path.to_string_lossy(), bytes).await
    }

    /// Upload in-memory image data under the given filename.
    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let content_type = sniff_content_type(&bytes);
        debug!(
            endpoint = %self.config.upload_endpoint,
            file_name,
            content_type,
            len = bytes.len(),
            "uploading image"
        );

        // reqwest escapes `\` and `"` in the Content-Disposition filename.
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|source| CaptionBotError::InvalidContentType {
                content_type: content_type.to_string(),
                source,
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let req = self
            .http
            .post(&self.config.upload_endpoint)
            .multipart(form);
        let resp = self
            .send(req, &self.config.upload_endpoint, "upload")
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(CaptionBotError::Http {
                status: status.as_u16(),
                status_text: status.to_string(),
            });
        }

        let image_url = read_quoted(resp).await?;
        trace!(%image_url, "image uploaded");
        Ok(image_url)
    }

    // ── Internals ───────────────────────────────────────────────────

    async fn send_message(&self, request: &Request) -> Result<String> {
        let body = serde_json::to_vec(request).map_err(CaptionBotError::Serialize)?;
        debug!(
            endpoint = %self.config.messages_endpoint,
            kind = ?request.kind,
            "sending message"
        );

        let req = self
            .http
            .post(&self.config.messages_endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let resp = self
            .send(req, &self.config.messages_endpoint, "message")
            .await?;

        let text = read_quoted(resp).await?;
        trace!(kind = ?request.kind, response = %text, "message answered");
        Ok(text)
    }

    async fn send(&self, req: RequestBuilder, endpoint: &str, what: &str) -> Result<Response> {
        let req = match self.config.timeout {
            Some(timeout) => req.timeout(timeout),
            None => req,
        };
        req.send().await.map_err(|e| CaptionBotError::Network {
            context: format!("Failed to send {} request to {}", what, endpoint),
            source: e,
        })
    }
}

async fn read_quoted(resp: Response) -> Result<String> {
    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(|e| CaptionBotError::Network {
        context: "Failed to read CaptionBot response body".into(),
        source: e,
    })?;
    decode_quoted(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_decode_plain_caption() {
        let caption = decode_quoted(200, r#""a cat sitting on a mat""#).unwrap();
        assert_eq!(caption, "a cat sitting on a mat");
    }

    #[test]
    fn test_decode_resolves_escapes_exactly() {
        let caption = decode_quoted(200, r#""hello \"world\"""#).unwrap();
        assert_eq!(caption, r#"hello "world""#);

        let caption = decode_quoted(200, r#""café \\ tab\t""#).unwrap();
        assert_eq!(caption, "café \\ tab\t");
    }

    #[test]
    fn test_decode_rejects_unquoted_body() {
        let err = decode_quoted(502, "Bad Gateway").unwrap_err();
        match err {
            CaptionBotError::Decode { status, body, .. } => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_rejects_objects() {
        assert!(decode_quoted(200, r#"{"caption":"x"}"#).is_err());
        assert!(decode_quoted(200, "").is_err());
    }

    #[test]
    fn test_client_builder() {
        let client = CaptionBotClient::new().with_config(
            CaptionBotConfig::with_base_url("http://localhost:1234")
                .timeout(Duration::from_secs(3)),
        );
        assert_eq!(
            client.config().messages_endpoint,
            "http://localhost:1234/api/messages"
        );
        assert_eq!(client.config().timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_default_client_uses_public_endpoints() {
        let client = CaptionBotClient::new();
        assert_eq!(client.config(), &CaptionBotConfig::default());
    }
}
