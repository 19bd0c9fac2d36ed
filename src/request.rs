use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use urlencoding::encode;

use crate::error::ApiError;
use crate::types::Method;

/// Token callers put in a field value to have the session password sent there
pub const PASSWORD_PLACEHOLDER: &str = "|password|";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// One fully-resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl RequestSpec {
    /// Place `blob` according to `method`: query string for GET, body for POST.
    ///
    /// An empty blob adds neither a `?` nor a body.
    pub fn build(method: Method, base_url: &str, destination: &str, blob: Option<String>) -> Self {
        let mut url = format!("{}{}", base_url, destination);
        let blob = blob.filter(|b| !b.is_empty());

        let body = match (method, blob) {
            (Method::Get, Some(query)) => {
                url = format!("{}?{}", url, query);
                None
            }
            (Method::Get, None) => None,
            (Method::Post, body) => body,
        };

        Self { method, url, body }
    }
}

/// `k=v&k=v` in the given order, keys and values percent-encoded.
pub fn encode_query<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k.as_ref()), encode(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

/// Swap every encoded placeholder for the raw password.
///
/// Runs after encoding: the password goes out verbatim while the rest of
/// the blob stays percent-encoded.
pub fn substitute_password(blob: &str, password: &str) -> String {
    let encoded_placeholder = encode(PASSWORD_PLACEHOLDER);
    blob.replace(encoded_placeholder.as_ref(), password)
}

/// Encode `params` and inject the password; `None` when there is nothing to send.
pub fn parameter_blob<K, V>(params: &[(K, V)], password: &str) -> Option<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if params.is_empty() {
        return None;
    }
    Some(substitute_password(&encode_query(params), password))
}

pub fn basic_auth_value(identity: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", identity, password)))
}

/// Authorization and Content-Type, sent on every request regardless of method
pub fn build_headers(identity: &str, password: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&basic_auth_value(identity, password))
        .map_err(|e| ApiError::InvalidHeader {
            message: format!("Authorization: {}", e),
        })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));

    Ok(headers)
}
