use std::time::Duration;

pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://www.captionbot.ai/api/upload";
pub const DEFAULT_MESSAGES_ENDPOINT: &str = "https://captionbot.azurewebsites.net/api/messages";

fn normalize(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}

/// Endpoints and transport settings for the CaptionBot client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionBotConfig {
    /// Multipart image upload endpoint
    pub upload_endpoint: String,
    /// Messaging endpoint, shared by caption requests and feedback
    pub messages_endpoint: String,
    /// Per-request timeout (default: none, the transport decides)
    pub timeout: Option<Duration>,
}

impl Default for CaptionBotConfig {
    fn default() -> Self {
        Self {
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            messages_endpoint: DEFAULT_MESSAGES_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl CaptionBotConfig {
    /// Point both endpoints at a single host, e.g. a local mock server.
    ///
    /// `http://127.0.0.1:8080/` yields `http://127.0.0.1:8080/api/upload`
    /// and `http://127.0.0.1:8080/api/messages`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base = normalize(base_url.into());
        Self {
            upload_endpoint: format!("{}/api/upload", base),
            messages_endpoint: format!("{}/api/messages", base),
            timeout: None,
        }
    }

    /// Set the upload endpoint.
    pub fn upload_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.upload_endpoint = normalize(endpoint.into());
        self
    }

    /// Set the messaging endpoint used for captions and feedback.
    pub fn messages_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.messages_endpoint = normalize(endpoint.into());
        self
    }

    /// Apply a timeout to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service() {
        let config = CaptionBotConfig::default();
        assert_eq!(config.upload_endpoint, "https://www.captionbot.ai/api/upload");
        assert_eq!(
            config.messages_endpoint,
            "https://captionbot.azurewebsites.net/api/messages"
        );
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_base_url_normalized() {
        let config = CaptionBotConfig::with_base_url("http://127.0.0.1:9000///");
        assert_eq!(config.upload_endpoint, "http://127.0.0.1:9000/api/upload");
        assert_eq!(config.messages_endpoint, "http://127.0.0.1:9000/api/messages");
    }

    #[test]
    fn test_builder() {
        let config = CaptionBotConfig::default()
            .upload_endpoint("http://upload.local/u/")
            .messages_endpoint("http://msg.local/m")
            .timeout(Duration::from_secs(10));
        assert_eq!(config.upload_endpoint, "http://upload.local/u");
        assert_eq!(config.messages_endpoint, "http://msg.local/m");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    }
}
