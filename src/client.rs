//! # DirectAdmin API Client
//!
//! Holds the connection target and the identity stack, and turns
//! `get_api`/`post_api` calls into one blocking HTTP exchange each.

use reqwest::blocking::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::decode::{decode_response, DecodedResponse};
use crate::error::ApiError;
use crate::identity::IdentityStack;
use crate::request::{build_headers, parameter_blob, RequestSpec};
use crate::types::{ClientConfig, Method, DEFAULT_PREFIX};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Version of the crate, used in User-Agent header
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client for one DirectAdmin panel and one owning account.
///
/// Impersonation (`login_as`/`logout`) needs `&mut self`, requests need
/// `&self`; a client shared between threads must be wrapped in a lock
/// that covers both.
///
/// # Example
///
/// ```rust,no_run
/// use directadmin_api::{DirectApiClient, NO_PARAMS};
///
/// let mut client = DirectApiClient::new("panel.example.com", "admin", "secret")?;
/// client.login_as("bob");
/// let _domains = client.get_api("SHOW_DOMAINS", NO_PARAMS)?;
/// client.logout();
/// # Ok::<(), directadmin_api::ApiError>(())
/// ```
pub struct DirectApiClient {
    config: ClientConfig,
    identities: IdentityStack,
    password: String,
    http: Client,
}

impl DirectApiClient {
    /// Client on the default port (2222) over plain http.
    ///
    /// `usernames` may carry an acting identity already (`admin|bob`).
    /// No network activity happens here.
    pub fn new(
        host: impl Into<String>,
        usernames: &str,
        password: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Self::with_config(ClientConfig::new(host), usernames, password)
    }

    pub fn with_config(
        config: ClientConfig,
        usernames: &str,
        password: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let http = build_client(config.timeout_seconds)?;

        Ok(Self {
            config,
            identities: IdentityStack::parse(usernames),
            password: password.into(),
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// The Basic-auth username currently sent, e.g. `admin|bob`
    pub fn identity(&self) -> String {
        self.identities.joined()
    }

    pub fn acting_as(&self) -> Option<&str> {
        self.identities.acting()
    }

    /// Act as `username` on every following request until [`logout`](Self::logout).
    pub fn login_as(&mut self, username: impl Into<String>) {
        self.identities.login_as(username);
        debug!("Acting as {}", self.identities.joined());
    }

    /// Drop the acting identity; no-op when there is none.
    pub fn logout(&mut self) {
        if let Some(acting) = self.identities.acting() {
            debug!("No longer acting as {}", acting);
        }
        self.identities.logout();
    }

    /// GET `/CMD_API_<command>` with `params` as the query string.
    pub fn get_api<K, V>(&self, command: &str, params: &[(K, V)]) -> Result<DecodedResponse, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.get_api_with_prefix(DEFAULT_PREFIX, command, params)
    }

    pub fn get_api_with_prefix<K, V>(
        &self,
        prefix: &str,
        command: &str,
        params: &[(K, V)],
    ) -> Result<DecodedResponse, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let destination = format!("{}{}", prefix, command);
        self.process_request(Method::Get, &destination, params)
    }

    /// POST `/CMD_API_<command>` with `data` as the form body.
    ///
    /// A `|password|` value is replaced by the session password. Query
    /// parameters, if needed, belong in `command`.
    pub fn post_api<K, V>(&self, command: &str, data: &[(K, V)]) -> Result<DecodedResponse, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.post_api_with_prefix(DEFAULT_PREFIX, command, data)
    }

    pub fn post_api_with_prefix<K, V>(
        &self,
        prefix: &str,
        command: &str,
        data: &[(K, V)],
    ) -> Result<DecodedResponse, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let destination = format!("{}{}", prefix, command);
        self.process_request(Method::Post, &destination, data)
    }

    /// Build the request for `destination` without sending it.
    pub fn prepare_request<K, V>(&self, method: Method, destination: &str, params: &[(K, V)]) -> RequestSpec
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let blob = parameter_blob(params, &self.password);
        RequestSpec::build(method, &self.config.base_url(), destination, blob)
    }

    fn process_request<K, V>(
        &self,
        method: Method,
        destination: &str,
        params: &[(K, V)],
    ) -> Result<DecodedResponse, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let headers = build_headers(&self.identities.joined(), &self.password)?;
        let prepared = self.prepare_request(method, destination, params);

        debug!("{} {}{}", method.as_str(), self.config.base_url(), destination);

        let mut request = match prepared.method {
            Method::Get => self.http.get(&prepared.url),
            Method::Post => self.http.post(&prepared.url),
        }
        .headers(headers);

        if let Some(body) = prepared.body {
            request = request.body(body);
        }

        let body = request
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| {
                let err = ApiError::from(e);
                warn!("{} {} failed: {}", method.as_str(), destination, err);
                err
            })?;

        decode_response(&body)
    }
}

impl fmt::Debug for DirectApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectApiClient")
            .field("config", &self.config)
            .field("identities", &self.identities)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn build_client(timeout_seconds: Option<u64>) -> Result<Client, ApiError> {
    let timeout = Duration::from_secs(timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS));

    // Every call is its own exchange: no idle connections are kept.
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(0)
        .user_agent(format!("directadmin-api/{}", VERSION))
        .build()
        .map_err(|e| ApiError::ClientBuild {
            message: e.to_string(),
        })
}
