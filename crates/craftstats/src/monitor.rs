//! Poll loop and per-tick server evaluation
//!
//! State is recomputed from scratch every tick (level-triggered): an active
//! server produces a write on every tick it stays active, including
//! consecutive ticks with an unchanged player set. A failed write drops that
//! tick's sample and the loop keeps going.

use craftstats_core::{ActivitySample, Result, ServerState};
use craftstats_db::ActivityRecorder;
use craftstats_host::ServerHost;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What the loop evaluates each tick
pub enum Targets {
    /// Fixed list chosen up front (single or interactive mode)
    Fixed(Vec<String>),
    /// Re-enumerate the full server list every tick (multi mode)
    All,
}

/// Evaluate one server for one tick
pub async fn check_server<H, R>(host: &H, recorder: &R, name: &str) -> Result<()>
where
    H: ServerHost + ?Sized,
    R: ActivityRecorder + ?Sized,
{
    info!("Checking server {}", name);
    let probe = host.probe(name).await?;

    match probe.state() {
        ServerState::Down => debug!("Server {} is down", name),
        ServerState::UpIdle => debug!("Server {} is up with no players", name),
        ServerState::UpActive => {
            let sample = ActivitySample::observed(name, probe.player_names);
            if let Err(e) = recorder.record(&sample).await {
                warn!("Dropping activity write for {}: {}", name, e);
            }
        }
    }
    Ok(())
}

/// Run the monitor loop until the operator interrupts it
pub async fn run<H, R>(host: &H, recorder: &R, targets: Targets, delay: Duration) -> Result<()>
where
    H: ServerHost,
    R: ActivityRecorder,
{
    loop {
        let names = match &targets {
            Targets::Fixed(names) => names.clone(),
            Targets::All => host.list_servers()?,
        };
        debug!("Tick over {} server(s)", names.len());

        for name in &names {
            check_server(host, recorder, name).await?;
        }

        if !sleep_or_interrupt(delay).await {
            println!("Bye Bye.");
            return Ok(());
        }
    }
}

/// Sleep the tick delay; returns false when the operator hit Ctrl-C
///
/// The interrupt is only observed here, between ticks. One arriving while
/// a DB or ping call is in flight takes effect once that call returns or
/// its timeout fires.
pub async fn sleep_or_interrupt(delay: Duration) -> bool {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
