use serde::{Deserialize, Serialize};

/// Tag identifying what a message to the messaging endpoint asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    /// Caption the image at the URL carried in `content`.
    CaptionRequest,
    /// Rate the last caption; `content` is the rating in base 10.
    Feedback,
}

/// JSON body posted to the messaging endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "Type")]
    pub kind: RequestKind,
    #[serde(rename = "Content")]
    pub content: String,
}

impl Request {
    pub fn caption(image_url: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::CaptionRequest,
            content: image_url.into(),
        }
    }

    pub fn feedback(rating: i64) -> Self {
        Self {
            kind: RequestKind::Feedback,
            content: rating.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_caption_request_shape() {
        let req = Request::caption("https://example.com/cat.jpg");
        let value: Value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"Type": "CaptionRequest", "Content": "https://example.com/cat.jpg"})
        );
    }

    #[test]
    fn test_feedback_content_is_decimal() {
        assert_eq!(Request::feedback(5).content, "5");
        assert_eq!(Request::feedback(0).content, "0");
        assert_eq!(Request::feedback(-3).content, "-3");
        assert_eq!(Request::feedback(i64::MIN).content, "-9223372036854775808");

        let json = serde_json::to_string(&Request::feedback(10)).unwrap();
        assert_eq!(json, r#"{"Type":"Feedback","Content":"10"}"#);
    }

    #[test]
    fn test_request_roundtrip_from_wire() {
        let req: Request =
            serde_json::from_str(r#"{"Type":"Feedback","Content":"1"}"#).unwrap();
        assert_eq!(req.kind, RequestKind::Feedback);
        assert_eq!(req.content, "1");
    }
}
