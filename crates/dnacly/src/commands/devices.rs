//! Device command handler.

use tabled::Tabled;

use dnacly_core::{Controller, Device, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, cell};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Management IP")]
    ip: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Software")]
    software: String,
    #[tabled(rename = "Reachability")]
    reachability: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            hostname: cell(d.text("hostname").as_deref()),
            ip: cell(d.management_ip_address()),
            platform: cell(d.text("platformId").as_deref()),
            software: cell(d.text("softwareVersion").as_deref()),
            reachability: cell(d.text("reachabilityStatus").as_deref()),
            id: cell(d.id()),
        }
    }
}

/// Scripting key: the management IP, which `dnacly interfaces` accepts.
fn device_key(d: &Device) -> String {
    d.management_ip_address()
        .or_else(|| d.id())
        .unwrap_or_default()
        .to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle<S: Session>(
    controller: &mut Controller<S>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = controller.list_devices().await?;
    let out = output::render_list(
        &global.output,
        &devices,
        |d| DeviceRow::from(d),
        device_key,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
