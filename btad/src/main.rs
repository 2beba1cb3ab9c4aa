//! BtAssist background watcher daemon.
//!
//! Consumes the platform notification feed on stdin and auto-confirms
//! inbound pairing requests while no foreground test run is bound.
//! SIGUSR1 marks a foreground consumer as bound (the watcher yields the
//! pairing-request notifications to it), SIGUSR2 as unbound (unattended
//! auto-confirmation resumes). Ctrl-C shuts down.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bta_common::config::BtaConfig;
use bta_common::feed;
use bta_common::sim::SimLink;
use bta_common::watcher::ServiceHost;

#[derive(Parser)]
#[command(name = "btad")]
#[command(author, version, about = "BtAssist watcher daemon - unattended pairing auto-confirmation")]
struct Cli {
    /// Pairing PIN applied by auto-confirmation
    #[arg(long)]
    pin: Option<String>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BtaConfig::load(cli.config.as_deref())?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let pin = cli.pin.unwrap_or_else(|| config.pairing.pin.clone());
    let mut host = ServiceHost::new(pin);
    let mut link = SimLink::new().radio_on();

    let mut bind_signal = signal(SignalKind::user_defined1()).context("installing SIGUSR1")?;
    let mut unbind_signal = signal(SignalKind::user_defined2()).context("installing SIGUSR2")?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut number = 0usize;

    info!("watcher daemon started, reading notification feed from stdin");
    loop {
        tokio::select! {
            _ = bind_signal.recv() => {
                info!("foreground consumer bound, yielding pairing events");
                host.bind();
            }
            _ = unbind_signal.recv() => {
                info!("foreground consumer unbound, resuming unattended pairing");
                host.unbind();
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading feed from stdin")? else {
                    info!("feed closed, shutting down");
                    break;
                };
                number += 1;
                let Some(notification) = feed::parse_line(&line, number)? else {
                    continue;
                };
                debug!(event = notification.label(), "feed event");
                link.observe(&notification);
                host.handle(&mut link, &notification);
            }
        }
    }

    Ok(())
}
