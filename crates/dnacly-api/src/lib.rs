// dnacly-api: Async Rust client for the DNA Center REST API

pub mod auth;
pub mod error;
pub mod rest;
pub mod transport;

pub use auth::{Credentials, Token};
pub use error::Error;
pub use rest::ControllerClient;
pub use rest::models::{Device, Interface};
pub use transport::{TlsMode, TransportConfig};
