//! Monitoring mode commands (single, multi, interactive)

use anyhow::{bail, Result};
use craftstats_host::{MineosHost, ServerHost};
use dialoguer::MultiSelect;
use std::time::Duration;

use crate::monitor::{self, Targets};
use crate::output::print_info;

pub async fn single(host: &MineosHost, name: &str, delay: Duration) -> Result<()> {
    // Fail fast on a typo instead of erroring every tick
    host.probe(name).await?;

    println!("Single Server Mode: {}", name);
    run(host, Targets::Fixed(vec![name.to_string()]), delay).await
}

pub async fn multi(host: &MineosHost, delay: Duration) -> Result<()> {
    println!("Multi Server Mode");
    run(host, Targets::All, delay).await
}

pub async fn interactive(host: &MineosHost, delay: Duration) -> Result<()> {
    let names = host.list_servers()?;
    if names.is_empty() {
        bail!("No servers found to monitor");
    }

    println!("Interactive Mode");
    let chosen = loop {
        let picked = MultiSelect::new()
            .with_prompt("Select the servers to monitor (space to toggle, enter to confirm)")
            .items(&names)
            .interact()?;
        if !picked.is_empty() {
            break picked;
        }
        print_info("Select at least one server");
    };

    let targets = chosen.into_iter().map(|i| names[i].clone()).collect();
    run(host, Targets::Fixed(targets), delay).await
}

async fn run(host: &MineosHost, targets: Targets, delay: Duration) -> Result<()> {
    let log = super::open_activity_log().await?;
    println!("Press Ctrl-C to quit");
    monitor::run(host, &log, targets, delay).await?;
    Ok(())
}
