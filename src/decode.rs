use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::ApiError;

/// API data decoded from a DirectAdmin response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedResponse {
    /// Newer endpoints answer in JSON
    Json(Value),
    /// `list[]=a&list[]=b` bodies, values in order
    List(Vec<String>),
    /// `key=value&key=value` bodies
    Dictionary(HashMap<String, String>),
}

impl DecodedResponse {
    pub fn as_dictionary(&self) -> Option<&HashMap<String, String>> {
        match self {
            DecodedResponse::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            DecodedResponse::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            DecodedResponse::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Look up a field in a dictionary, or a string field of a JSON object.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            DecodedResponse::Dictionary(map) => map.get(key).map(String::as_str),
            DecodedResponse::Json(value) => value.get(key).and_then(Value::as_str),
            DecodedResponse::List(_) => None,
        }
    }
}

/// Sniff the body format and decode it.
///
/// Order matters: HTML, then JSON, then the `list[]` marker, and
/// everything else is a dictionary.
pub fn decode_response(body: &str) -> Result<DecodedResponse, ApiError> {
    if body.starts_with("<html") {
        warn!("DirectAdmin answered with an HTML page");
        return Err(ApiError::HtmlPage);
    }

    if body.starts_with('{') {
        debug!("Decoding response as JSON");
        return serde_json::from_str(body)
            .map(DecodedResponse::Json)
            .map_err(|e| ApiError::InvalidJson {
                message: e.to_string(),
            });
    }

    if body.contains("list[]") {
        debug!("Decoding response as list");
        return Ok(DecodedResponse::List(decode_list(body)));
    }

    debug!("Decoding response as dictionary");
    Ok(DecodedResponse::Dictionary(decode_dictionary(body)))
}

/// Values of every `key=value` segment, in order.
pub fn decode_list(body: &str) -> Vec<String> {
    let decoded = form_decode(body);
    segments(&decoded)
        .map(|(_, value)| value.to_string())
        .collect()
}

/// Later duplicate keys win.
pub fn decode_dictionary(body: &str) -> HashMap<String, String> {
    let decoded = form_decode(body);
    segments(&decoded)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

// Segments without `=` (including empty ones) have an empty value.
fn segments(decoded: &str) -> impl Iterator<Item = (&str, &str)> {
    decoded
        .split('&')
        .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
}

/// Decode the whole body at once, `+` as space.
fn form_decode(body: &str) -> String {
    let spaced: Cow<str> = if body.contains('+') {
        Cow::Owned(body.replace('+', " "))
    } else {
        Cow::Borrowed(body)
    };
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
