use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Request bodies larger than this are refused before parsing.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// JSON body extractor whose failures render as Problem Details (400) instead
/// of actix's plain-text errors.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    error = %e,
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Client-safe description of a body parse failure.
fn classify_json_error(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: missing or mistyped fields".to_string(),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Ballot {
        #[serde(rename = "move")]
        uci: String,
        #[allow(dead_code)]
        round: Option<u64>,
    }

    #[test]
    fn syntax_errors_report_line() {
        let err = serde_json::from_str::<Ballot>("{\n\"move\": }").unwrap_err();
        assert_eq!(classify_json_error(&err), "Invalid JSON at line 2");
    }

    #[test]
    fn truncated_body_is_eof() {
        let err = serde_json::from_str::<Ballot>(r#"{"move": "e2e4""#).unwrap_err();
        assert!(classify_json_error(&err).contains("unexpected end of input"));
    }

    #[test]
    fn missing_field_is_data_error() {
        let err = serde_json::from_str::<Ballot>(r#"{"round": 3}"#).unwrap_err();
        assert!(classify_json_error(&err).contains("missing or mistyped"));
    }

    #[actix_web::test]
    async fn extracts_valid_body() {
        let (req, mut payload) = actix_web::test::TestRequest::post()
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"move": "e2e4"}"#)
            .to_http_parts();
        let ballot = ValidatedJson::<Ballot>::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(ballot.uci, "e2e4");
    }

    #[actix_web::test]
    async fn malformed_body_is_bad_request() {
        let (req, mut payload) = actix_web::test::TestRequest::post()
            .set_payload("not json")
            .to_http_parts();
        let err = ValidatedJson::<Ballot>::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
