//! Per-request authorization.

use crate::errors::DeskError;
use reqwest::header::HeaderValue;
use reqwest::Method;
use std::time::{SystemTime, UNIX_EPOCH};

/// Something which produces an `Authorization` header for every request.
///
/// Unlike basic authentication, which is attached to the HTTP client once,
/// a [RequestSigner] is consulted with the method and full URL of each request.
pub trait RequestSigner: Send + Sync {
    fn authorization(&self, method: &Method, url: &str) -> Result<HeaderValue, DeskError>;
}

/// The four pieces of OAuth 1.0 signing material issued by desk.com for an API application.
#[derive(Clone)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl OAuthCredentials {
    /// `oauth_signature` for the PLAINTEXT method: both secrets, encoded and joined by `&`.
    fn signature(&self) -> String {
        format!(
            "{}&{}",
            urlencoding::encode(&self.consumer_secret),
            urlencoding::encode(&self.access_token_secret)
        )
    }

    fn header(&self, timestamp: u64, nonce: &str) -> String {
        let signature = self.signature();
        let timestamp = timestamp.to_string();
        let params = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature", signature.as_str()),
            ("oauth_signature_method", "PLAINTEXT"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", "1.0"),
        ]
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
        format!("OAuth {}", params)
    }
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}

impl RequestSigner for OAuthCredentials {
    fn authorization(&self, _method: &Method, _url: &str) -> Result<HeaderValue, DeskError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| DeskError::Signing(e.to_string()))?
            .as_secs();
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let mut value = HeaderValue::from_str(&self.header(timestamp, &nonce))?;
        value.set_sensitive(true);
        Ok(value)
    }
}
