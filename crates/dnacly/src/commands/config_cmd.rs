//! Config subcommand handlers.

use std::collections::BTreeMap;

use dialoguer::{Confirm, Input, Select};
use secrecy::SecretString;
use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext secrets masked, profiles sorted.
#[derive(Serialize)]
struct Redacted {
    #[serde(skip_serializing_if = "Option::is_none")]
    default_profile: Option<String>,
    defaults: dnacly_config::Defaults,
    audit: dnacly_config::AuditSettings,
    profiles: BTreeMap<String, Profile>,
}

fn redacted(cfg: &Config) -> Redacted {
    let profiles = cfg
        .profiles
        .iter()
        .map(|(name, p)| {
            let mut p = p.clone();
            if p.password.is_some() {
                p.password = Some(MASK.into());
            }
            (name.clone(), p)
        })
        .collect();
    Redacted {
        default_profile: cfg.default_profile.clone(),
        defaults: cfg.defaults.clone(),
        audit: cfg.audit.clone(),
        profiles,
    }
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_value<T: std::str::FromStr>(
    field: &str,
    value: &str,
    expected: &str,
) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Offer to store the password in the system keyring or return it for plaintext config.
///
/// Returns `Some(password)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_password_storage(
    profile_name: &str,
    password: String,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config_store_password(profile_name, password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password))
    }
}

fn config_store_password(profile_name: &str, password: String) -> Result<(), CliError> {
    dnacly_config::store_password(profile_name, &SecretString::from(password)).map_err(|e| {
        CliError::Validation {
            field: "keyring".into(),
            reason: format!("failed to store password in keyring: {e}"),
        }
    })
}

fn prompt_nonempty_password() -> Result<String, CliError> {
    let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(password)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(global, &key, value),
        ConfigCommand::Profiles => {
            profiles();
            Ok(())
        }
        ConfigCommand::Use { name } => use_profile(global, name),
        ConfigCommand::SetPassword => set_password(global),
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("✨ dnacly configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default(global.profile.clone().unwrap_or_else(|| "default".into()))
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Controller host and port
    let host: String = Input::new()
        .with_prompt("Controller host")
        .default("sandboxdnac.cisco.com".into())
        .interact_text()
        .map_err(prompt_err)?;

    let port: u16 = Input::new()
        .with_prompt("HTTPS port")
        .default(443)
        .interact_text()
        .map_err(prompt_err)?;

    // 3. Credentials
    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(prompt_err)?;
    let password = prompt_password_storage(&profile_name, prompt_nonempty_password()?)?;

    // 4. TLS
    let insecure = Confirm::new()
        .with_prompt("Skip TLS certificate verification (self-signed controller)?")
        .default(true)
        .interact()
        .map_err(prompt_err)?;

    // 5. Audit store
    let audit_uri: String = Input::new()
        .with_prompt("Audit store directory (empty for log-only)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    // 6. Merge into any existing config and write
    let mut cfg = config::load_config_or_default();
    let mut profile = Profile::new(host);
    profile.port = port;
    profile.username = Some(username);
    profile.password = password;
    profile.insecure = Some(insecure);
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    if !audit_uri.trim().is_empty() {
        cfg.audit.uri = Some(audit_uri.trim().to_owned());
    }
    save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: dnacly devices");
    Ok(())
}

// ── Show ────────────────────────────────────────────────────────────

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = redacted(&config::load_config()?);
    let out = output::render_single(
        &global.output,
        &cfg,
        |c| Ok(toml::to_string_pretty(c)?),
        |_| config::config_path().display().to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Set <key> <value> ───────────────────────────────────────────────

fn set(global: &GlobalOpts, key: &str, value: String) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    // Audit keys are global, the rest belong to the active profile.
    if let Some(audit_key) = key.strip_prefix("audit.") {
        match audit_key {
            "uri" => cfg.audit.uri = Some(value),
            "database" => cfg.audit.database = value,
            "collection" => cfg.audit.collection = value,
            other => {
                return Err(CliError::Validation {
                    field: format!("audit.{other}"),
                    reason: "valid audit keys: audit.uri, audit.database, audit.collection"
                        .into(),
                });
            }
        }
        save_config(&cfg)?;
        output::success(&format!("Set {key}"), &global.color, global.quiet);
        return Ok(());
    }

    let profile_name = config::active_profile_name(global, &cfg);
    let profile = cfg
        .profiles
        .entry(profile_name.clone())
        .or_insert_with(|| Profile::new(String::new()));

    match key {
        "host" => profile.host = value,
        "port" => profile.port = parse_value("port", &value, "a port number (1-65535)")?,
        "username" => profile.username = Some(value),
        "password_env" | "password-env" => profile.password_env = Some(value),
        "insecure" => {
            profile.insecure = Some(parse_value("insecure", &value, "'true' or 'false'")?);
        }
        "timeout" => profile.timeout = Some(parse_value("timeout", &value, "a number (seconds)")?),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: host, port, username, \
                     password_env, insecure, timeout, ca_cert, audit.uri, audit.database, \
                     audit.collection"
                ),
            });
        }
    }

    save_config(&cfg)?;
    output::success(
        &format!("Set {key} on profile '{profile_name}'"),
        &global.color,
        global.quiet,
    );
    Ok(())
}

// ── Profiles ────────────────────────────────────────────────────────

fn profiles() {
    let cfg = config::load_config_or_default();
    let default = cfg.default_profile.as_deref().unwrap_or("default");
    if cfg.profiles.is_empty() {
        eprintln!("No profiles configured. Run: dnacly config init");
        return;
    }
    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let marker = if name == default { " *" } else { "" };
        println!("{name}{marker}");
    }
}

// ── Use <name> ──────────────────────────────────────────────────────

fn use_profile(global: &GlobalOpts, name: String) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    if !cfg.profiles.contains_key(&name) {
        return Err(CliError::ProfileNotFound {
            name,
            available: config::available_profiles(&cfg),
        });
    }

    cfg.default_profile = Some(name.clone());
    save_config(&cfg)?;
    output::success(
        &format!("Default profile set to '{name}'"),
        &global.color,
        global.quiet,
    );
    Ok(())
}

// ── SetPassword ─────────────────────────────────────────────────────

fn set_password(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    if !cfg.profiles.contains_key(&profile_name) {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: config::available_profiles(&cfg),
        });
    }

    config_store_password(&profile_name, prompt_nonempty_password()?)?;
    output::success(
        &format!("Password stored in system keyring for profile '{profile_name}'"),
        &global.color,
        global.quiet,
    );
    Ok(())
}
