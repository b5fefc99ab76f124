//! Interface command handler.

use tabled::Tabled;

use dnacly_core::{Controller, Interface, Session};

use crate::cli::{GlobalOpts, InterfacesArgs};
use crate::error::CliError;
use crate::output::{self, cell};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Admin")]
    admin: String,
    #[tabled(rename = "Type")]
    itype: String,
    #[tabled(rename = "IPv4")]
    ipv4: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Speed")]
    speed: String,
}

impl From<&Interface> for InterfaceRow {
    fn from(i: &Interface) -> Self {
        Self {
            port: cell(i.port_name()),
            status: cell(i.status()),
            admin: cell(i.text("adminStatus").as_deref()),
            itype: cell(i.text("interfaceType").as_deref()),
            ipv4: cell(i.text("ipv4Address").as_deref()),
            mac: cell(i.text("macAddress").as_deref()),
            vlan: cell(i.text("vlanId").as_deref()),
            speed: cell(i.text("speed").as_deref()),
        }
    }
}

fn interface_key(i: &Interface) -> String {
    i.port_name()
        .or_else(|| i.id())
        .unwrap_or_default()
        .to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle<S: Session>(
    controller: &mut Controller<S>,
    args: InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let interfaces = controller.list_interfaces_for(&args.device_ip).await?;
    let out = output::render_list(
        &global.output,
        &interfaces,
        |i| InterfaceRow::from(i),
        interface_key,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
