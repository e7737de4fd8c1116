//! List command implementation

use anyhow::Result;
use colored::Colorize;
use craftstats_host::{MineosHost, ServerHost};

use crate::output::print_info;

pub async fn execute(host: &MineosHost) -> Result<()> {
    let names = host.list_servers()?;
    if names.is_empty() {
        print_info("No servers found");
        return Ok(());
    }

    println!("Servers:");
    for name in names {
        let probe = host.probe(&name).await?;
        let state = if probe.up {
            "up".green()
        } else {
            "down".red()
        };
        println!("  {:<20}{}", probe.name, state);
    }
    Ok(())
}
