//! Logout command handler.
//!
//! Local only: drops the profile's cached token. Needs no credentials, so
//! it runs before any controller is built.

use dnacly_core::SessionTokenCache;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[allow(clippy::unnecessary_wraps)]
pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    let mut tokens = SessionTokenCache::new(config::open_session(global, &profile_name));
    tokens.forget();

    output::success(
        &format!("Session token cleared for profile '{profile_name}'"),
        &global.color,
        global.quiet,
    );
    Ok(())
}
