//! Upstream body shaping.
//!
//! The only interpretation applied to an upstream body is a coarse split on
//! its `content-type`: JSON is parsed and re-serialized, anything else is
//! forwarded as text.

use reqwest::header::CONTENT_TYPE;

use crate::upstream::error::UpstreamError;

/// How an upstream body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Text,
}

impl BodyKind {
    /// Classify a `content-type` value. A missing header is an empty string.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.contains("application/json") {
            BodyKind::Json
        } else {
            // application/text, text/html and everything else
            BodyKind::Text
        }
    }
}

/// Consume an upstream response and return its body as a string.
pub async fn gather_response(response: reqwest::Response) -> Result<String, UpstreamError> {
    let kind = BodyKind::from_content_type(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
    );

    match kind {
        BodyKind::Json => {
            let bytes = response.bytes().await?;
            reserialize_json(&bytes)
        }
        BodyKind::Text => Ok(response.text().await?),
    }
}

/// Parse JSON and write it back out in compact form.
///
/// The output is structurally equal to the input; whitespace is not kept.
pub fn reserialize_json(bytes: &[u8]) -> Result<String, UpstreamError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(serde_json::to_string(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_classification() {
        assert_eq!(BodyKind::from_content_type("application/json"), BodyKind::Json);
        assert_eq!(
            BodyKind::from_content_type("application/json; charset=utf-8"),
            BodyKind::Json
        );
        assert_eq!(BodyKind::from_content_type("application/text"), BodyKind::Text);
        assert_eq!(BodyKind::from_content_type("text/html"), BodyKind::Text);
        assert_eq!(BodyKind::from_content_type("image/png"), BodyKind::Text);
        assert_eq!(BodyKind::from_content_type(""), BodyKind::Text);
    }

    #[test]
    fn test_reserialize_drops_whitespace_keeps_order() {
        let body = br#"{ "zeta": 1,
            "alpha": [ true, null, "x" ] }"#;
        assert_eq!(
            reserialize_json(body).unwrap(),
            r#"{"zeta":1,"alpha":[true,null,"x"]}"#
        );
    }

    #[test]
    fn test_reserialize_rejects_garbage() {
        let err = reserialize_json(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }
}
