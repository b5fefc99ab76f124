//! CLI configuration: thin wrapper around `dnacly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--host, --username, etc.).

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use dnacly_core::{
    AuditSink, AuditStore, ControllerConfig, Credentials, FileSession, MemorySession, Session,
    TlsVerification, TracingAuditSink,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use dnacly_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config, session_path,
};

const DEFAULT_PORT: u16 = 443;

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build a `ControllerConfig` from the active profile plus flag overrides,
/// or from flags alone when no profile exists.
pub fn build_controller_config(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<ControllerConfig, CliError> {
    let mut controller = match config.profiles.get(profile_name) {
        Some(profile) => resolve_profile(profile, profile_name, global, config)?,
        None => resolve_flags_only(global, config, profile_name)?,
    };

    if let Some(ref raw) = global.base_url {
        let url: url::Url = raw.parse().map_err(|e| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL '{raw}': {e}"),
        })?;
        controller.base_url = Some(url);
    }

    Ok(controller)
}

/// Translate a `Profile` + global flags into a `ControllerConfig`.
///
/// CLI flag overrides take priority over profile values.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    config: &Config,
) -> Result<ControllerConfig, CliError> {
    // 1. Host and port (flag > env > profile)
    let host = global.host.as_deref().unwrap_or(&profile.host);
    let port = global.port.unwrap_or(profile.port);

    // 2. Credentials (flag > credential chain)
    let username = match global.username {
        Some(ref u) => u.clone(),
        None => dnacly_config::resolve_username(profile, profile_name)?,
    };
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => dnacly_config::resolve_password(profile, profile_name)?,
    };

    // 3. TLS verification
    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        dnacly_config::tls_verification(profile)
    };

    // 4. Timeout (flag > profile > defaults)
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);

    finish(host, port, username, password, tls, timeout)
}

/// No profile found: build from CLI flags / env vars alone.
fn resolve_flags_only(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<ControllerConfig, CliError> {
    let Some(ref host) = global.host else {
        if global.profile.is_some() {
            return Err(CliError::ProfileNotFound {
                name: profile_name.into(),
                available: available_profiles(config),
            });
        }
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    };

    let no_credentials = || CliError::NoCredentials {
        profile: profile_name.into(),
    };
    let username = global.username.clone().ok_or_else(no_credentials)?;
    let password = global
        .password
        .clone()
        .map(SecretString::from)
        .ok_or_else(no_credentials)?;

    let timeout = global.timeout.unwrap_or(config.defaults.timeout);

    finish(
        host,
        global.port.unwrap_or(DEFAULT_PORT),
        username,
        password,
        TlsVerification::DangerAcceptInvalid,
        timeout,
    )
}

fn finish(
    host: &str,
    port: u16,
    username: String,
    password: SecretString,
    tls: TlsVerification,
    timeout_secs: u64,
) -> Result<ControllerConfig, CliError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(CliError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }

    let mut controller = ControllerConfig::new(Credentials::new(host, port, username, password));
    controller.tls = tls;
    controller.timeout = Duration::from_secs(timeout_secs);
    Ok(controller)
}

/// The session the token cache reads through: the profile's cache file,
/// or process memory with `--no-session`.
pub fn open_session(global: &GlobalOpts, profile_name: &str) -> Box<dyn Session> {
    if global.no_session {
        Box::new(MemorySession::new())
    } else {
        Box::new(FileSession::open(session_path(profile_name)))
    }
}

/// The configured audit store, or `None` for tracing-only auditing.
pub async fn open_audit_store(
    global: &GlobalOpts,
    config: &Config,
) -> Result<Option<AuditStore>, CliError> {
    let store = dnacly_config::audit_store(&config.audit, global.audit_uri.as_deref()).await?;
    Ok(store)
}

/// The store's sink, else tracing events.
pub fn audit_sink(store: Option<&AuditStore>) -> Arc<dyn AuditSink> {
    match store {
        Some(store) => store.sink(),
        None => Arc::new(TracingAuditSink),
    }
}
