// ── Core error types ──
//
// User-facing errors from dnacly-core. Every variant renders as a
// human-readable sentence suitable for showing directly to a person.
// The `From<dnacly_api::Error>` impl translates transport-layer errors
// into these domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication error: {message}")]
    AuthenticationFailed { message: String },

    #[error("Missing authentication token. Please authenticate first.")]
    MissingToken,

    // ── Lookup ───────────────────────────────────────────────────────
    #[error("Device {device_ip} not found.")]
    DeviceNotFound { device_ip: String },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Response ─────────────────────────────────────────────────────
    #[error("Controller error: {message}")]
    Api {
        message: String,
        /// HTTP status code, when the controller answered at all.
        status: Option<u16>,
    },

    #[error("Unexpected controller response: {message}")]
    MalformedResponse { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for failures that happened before any data came back
    /// because the controller refused (or never issued) a token.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::AuthenticationFailed { .. } | Self::MissingToken => true,
            Self::Api { status, .. } => *status == Some(401),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dnacly_api::Error> for CoreError {
    fn from(err: dnacly_api::Error) -> Self {
        match err {
            dnacly_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            dnacly_api::Error::MissingToken => CoreError::MissingToken,
            dnacly_api::Error::DeviceNotFound { device_ip } => {
                CoreError::DeviceNotFound { device_ip }
            }
            // Timeouts arrive as `Error::Timeout` with the configured limit.
            dnacly_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_request() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), |u| u.to_string()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            dnacly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            dnacly_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            dnacly_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            dnacly_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            dnacly_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_their_meaning() {
        let err: CoreError = dnacly_api::Error::MissingToken.into();
        assert!(matches!(err, CoreError::MissingToken));
        assert!(err.is_auth());

        let err: CoreError = dnacly_api::Error::DeviceNotFound {
            device_ip: "10.0.0.5".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Device 10.0.0.5 not found.");

        let err: CoreError = dnacly_api::Error::Http {
            status: 401,
            message: "401 Unauthorized".into(),
        }
        .into();
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Controller error: 401 Unauthorized");
    }

    #[test]
    fn authentication_failure_is_prefixed() {
        let err: CoreError = dnacly_api::Error::Authentication {
            message: "token request rejected (401 Unauthorized)".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Authentication error: token request rejected (401 Unauthorized)"
        );
    }

    #[test]
    fn malformed_body_drops_raw_payload() {
        let err: CoreError = dnacly_api::Error::Deserialization {
            message: "missing field `id`".into(),
            body: "{\"secret\":1}".into(),
        }
        .into();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
        assert!(!err.to_string().contains("secret"));
    }
}
