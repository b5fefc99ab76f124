// DNA Center REST client modules
//
// Hand-written client for the controller's token and inventory endpoints.
// Inventory calls are wrapped in the `{ response: [...] }` envelope and
// authenticated with the `X-Auth-Token` header.

pub mod auth;
pub mod client;
pub mod devices;
pub mod interfaces;
pub mod models;

pub use client::ControllerClient;
