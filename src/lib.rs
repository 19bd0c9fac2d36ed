//! Client for the DirectAdmin remote API.
//!
//! Requests are authenticated with HTTP Basic auth as the owning account,
//! or as `owner|user` while impersonating. Responses are sniffed and
//! decoded into [`DecodedResponse`]; anything that is not usable API data
//! comes back as an [`ApiError`].

mod client;
mod decode;
mod error;
mod identity;
mod request;
mod types;

pub use client::DirectApiClient;
pub use decode::{decode_dictionary, decode_list, decode_response, DecodedResponse};
pub use error::ApiError;
pub use identity::IdentityStack;
pub use request::{encode_query, RequestSpec, PASSWORD_PLACEHOLDER};
pub use types::{ClientConfig, Method, Protocol, DEFAULT_PORT, DEFAULT_PREFIX, NO_PARAMS};
