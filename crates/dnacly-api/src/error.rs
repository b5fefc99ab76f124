use thiserror::Error;

/// Top-level error type for the `dnacly-api` crate.
///
/// Every controller-facing operation returns these as values. Nothing in
/// this crate panics or aborts on a network or HTTP failure; the caller
/// decides what to show. `dnacly-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The token endpoint rejected the credentials (any non-2xx status).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A token-requiring call was attempted before authenticating.
    #[error("Missing authentication token. Please authenticate first.")]
    MissingToken,

    // ── Lookup ──────────────────────────────────────────────────────
    /// No device in the inventory has this management IP.
    #[error("Device {device_ip} not found.")]
    DeviceNotFound { device_ip: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// Non-2xx status from a data endpoint.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Body could not be parsed, or lacked a required field.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the controller refused our credentials or token.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Http { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this crate retries; the flag is for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotFound { .. } | Self::Http { status: 404, .. }
        )
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_message_is_actionable() {
        assert_eq!(
            Error::MissingToken.to_string(),
            "Missing authentication token. Please authenticate first."
        );
    }

    #[test]
    fn device_not_found_names_the_ip() {
        let err = Error::DeviceNotFound {
            device_ip: "10.0.0.9".into(),
        };
        assert_eq!(err.to_string(), "Device 10.0.0.9 not found.");
        assert!(err.is_not_found());
    }

    #[test]
    fn http_401_counts_as_auth_failure() {
        let err = Error::Http {
            status: 401,
            message: "Unauthorized".into(),
        };
        assert!(err.is_auth_failure());
        assert!(!err.is_transient());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_transient());
        assert!(Error::Timeout { timeout_secs: 10 }.is_transient());
        assert!(!Error::MissingToken.is_transient());
    }
}
