//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use dnacly_config::ConfigError;
use dnacly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(dnacly::connection_failed),
        help(
            "Check that the controller is reachable.\n\
             Self-signed certificate? Try: dnacly devices --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication error: {message}")]
    #[diagnostic(
        code(dnacly::auth_failed),
        help(
            "Verify the username and password for this profile.\n\
             Run: dnacly config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("Missing authentication token. Please authenticate first.")]
    #[diagnostic(code(dnacly::missing_token), help("Run: dnacly auth"))]
    MissingToken,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(dnacly::no_credentials),
        help(
            "Configure credentials with: dnacly config init\n\
             Or pass --username and set DNACLY_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Device {device_ip} not found.")]
    #[diagnostic(
        code(dnacly::device_not_found),
        help("Run: dnacly devices to see management IP addresses")
    )]
    DeviceNotFound { device_ip: String },

    // ── Controller ───────────────────────────────────────────────────
    #[error("Controller error: {message}")]
    #[diagnostic(code(dnacly::api_error), help("{hint}"))]
    ApiError {
        message: String,
        status: Option<u16>,
        hint: String,
    },

    #[error("Unexpected controller response: {message}")]
    #[diagnostic(
        code(dnacly::malformed_response),
        help("Re-run with -vv to log the request, or check the controller version.")
    )]
    MalformedResponse { message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(dnacly::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dnacly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(dnacly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: dnacly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(dnacly::no_config),
        help(
            "Create one with: dnacly config init\n\
             Expected at: {path}\n\
             Or pass --host, --username and --password."
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(dnacly::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON output: {0}")]
    #[diagnostic(code(dnacly::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode YAML output: {0}")]
    #[diagnostic(code(dnacly::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to encode TOML output: {0}")]
    #[diagnostic(code(dnacly::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::MissingToken | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::ApiError {
                status: Some(401 | 403),
                ..
            } => exit_code::AUTH,
            Self::DeviceNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::MissingToken => CliError::MissingToken,

            CoreError::DeviceNotFound { device_ip } => CliError::DeviceNotFound { device_ip },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Api { message, status } => {
                let hint = match status {
                    Some(401) => {
                        "The session token may have expired. Run: dnacly auth".to_owned()
                    }
                    Some(403) => "This account lacks permission for the request.".to_owned(),
                    Some(code) if code >= 500 => {
                        "The controller reported an internal error; try again later.".to_owned()
                    }
                    _ => "Re-run with -vv for request details.".to_owned(),
                };
                CliError::ApiError {
                    message,
                    status,
                    hint,
                }
            }

            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },

            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let auth: CliError = CoreError::AuthenticationFailed {
            message: "token request rejected (401 Unauthorized)".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let missing: CliError = CoreError::DeviceNotFound {
            device_ip: "10.0.0.9".into(),
        }
        .into();
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(missing.to_string(), "Device 10.0.0.9 not found.");

        let stale: CliError = CoreError::Api {
            message: "401 Unauthorized".into(),
            status: Some(401),
        }
        .into();
        assert_eq!(stale.exit_code(), exit_code::AUTH);

        let timeout: CliError = CoreError::Timeout { timeout_secs: 10 }.into();
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let down: CliError = CoreError::ConnectionFailed {
            url: "https://10.10.20.85/".into(),
            reason: "connection refused".into(),
        }
        .into();
        assert_eq!(down.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn config_errors_keep_their_exit_code() {
        let err: CliError = ConfigError::NoCredentials {
            profile: "lab".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::AUTH);

        let err: CliError = ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
