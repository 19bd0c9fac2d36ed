use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Port DirectAdmin listens on out of the box
pub const DEFAULT_PORT: u16 = 2222;

/// Command prefix for the legacy `CMD_API_*` endpoints
pub const DEFAULT_PREFIX: &str = "/CMD_API_";

/// Empty parameter list for calls that send none
pub const NO_PARAMS: &[(&str, &str)] = &[];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(format!("Unsupported protocol '{}': expected http or https", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Connection target, fixed for the lifetime of a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
    // Falls back to 30 seconds when the client is built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            protocol: Protocol::default(),
            timeout_seconds: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// `protocol://host:port`, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("panel.example.com");
        assert_eq!(config.port, 2222);
        assert_eq!(config.protocol, Protocol::Http);
        assert_eq!(config.base_url(), "http://panel.example.com:2222");
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"host":"da.local"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("da.local"));

        let config: ClientConfig =
            serde_json::from_str(r#"{"host":"da.local","port":443,"protocol":"https"}"#).unwrap();
        assert_eq!(config.base_url(), "https://da.local:443");
    }

    #[test]
    fn test_protocol_from_str() {
        assert_eq!("HTTPS".parse::<Protocol>().unwrap(), Protocol::Https);
        assert_eq!("http".parse::<Protocol>().unwrap(), Protocol::Http);
        assert!("ftp".parse::<Protocol>().is_err());
    }
}
