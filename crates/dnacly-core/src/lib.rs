//! Session and audit layer between `dnacly-api` and callers (CLI, web handlers, tests).
//!
//! - **[`Controller`]**: Per-session facade exposing the three caller-facing
//!   operations: [`authenticate()`](Controller::authenticate),
//!   [`list_devices()`](Controller::list_devices) and
//!   [`list_interfaces_for()`](Controller::list_interfaces_for). Each one
//!   reports exactly one [`AuditRecord`] after it completes.
//!
//! - **[`SessionTokenCache`]**: Read-through token cache over a [`Session`].
//!   Reuses the session's token when present, authenticates on a miss.
//!
//! - **[`AuditSink`]**: Best-effort, fire-and-forget audit trail. The trait
//!   method returns nothing; implementations swallow their own failures.
//!   [`AuditStore`] opens the MongoDB or JSON-lines backend from a URI.

pub mod audit;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use audit::{
    AuditAction, AuditRecord, AuditSink, AuditStatus, AuditStore, JsonlAuditSink,
    MemoryAuditSink, MongoAuditSink, NullAuditSink, TracingAuditSink,
};
pub use config::{ControllerConfig, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;
pub use session::{FileSession, MemorySession, Session, SessionTokenCache};

// Wire types callers render directly.
pub use dnacly_api::{Credentials, Device, Interface, Token};
