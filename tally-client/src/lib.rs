//! Tally Client - HTTP client for the remote order store
//!
//! Typed async wrapper over the order REST API. Owns no state beyond
//! the connection configuration; every operation is a pass-through
//! remote call.

pub mod config;
pub mod error;
pub mod http;
pub mod orders;

pub use config::{API_URL_ENV, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use orders::{OrderClient, OrderStore};
