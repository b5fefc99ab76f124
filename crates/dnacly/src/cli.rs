//! Clap derive structures for the `dnacly` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dnacly -- command-line client for Cisco DNA Center
#[derive(Debug, Parser)]
#[command(
    name = "dnacly",
    version,
    about = "Query Cisco DNA Center device inventory from the command line",
    long_about = "A CLI for Cisco DNA Center controllers.\n\n\
        Authenticates against the controller's token endpoint, caches the\n\
        session token between runs, and lists network devices and their\n\
        interfaces. Every operation is recorded to the configured audit store.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "DNACLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller hostname or IP (overrides profile)
    #[arg(long, env = "DNACLY_HOST", global = true)]
    pub host: Option<String>,

    /// Controller HTTPS port (overrides profile)
    #[arg(long, env = "DNACLY_PORT", global = true)]
    pub port: Option<u16>,

    /// Controller username (overrides profile)
    #[arg(long, short = 'u', env = "DNACLY_USERNAME", global = true)]
    pub username: Option<String>,

    /// Controller password
    #[arg(long, env = "DNACLY_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Full controller base URL, replacing https://{host}:{port}
    #[arg(long, env = "DNACLY_BASE_URL", global = true, hide = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "DNACLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "DNACLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "DNACLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Keep the session token in memory only (no cache file)
    #[arg(long, env = "DNACLY_NO_SESSION", global = true)]
    pub no_session: bool,

    /// Audit store root (file:///dir or a path), overrides [audit].uri
    #[arg(long, env = "DNACLY_AUDIT_URI", global = true)]
    pub audit_uri: Option<String>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Request a fresh token and cache it for this profile
    #[command(alias = "login")]
    Auth,

    /// List network devices in the controller inventory
    #[command(alias = "dev", alias = "d")]
    Devices,

    /// List interfaces of the device with the given management IP
    #[command(alias = "if", alias = "i")]
    Interfaces(InterfacesArgs),

    /// Forget the cached session token for this profile
    Logout,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    /// Management IP address of the device
    pub device_ip: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// Set a configuration value on the active profile
    Set {
        /// Profile key (host, port, username, password_env, insecure,
        /// timeout, ca_cert) or audit key (audit.uri, audit.database,
        /// audit.collection)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
