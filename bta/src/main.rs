//! BtAssist test runner.
//!
//! Selects one test case, wires it to a simulated link controller, replays
//! a platform notification script through the dispatcher, and writes the
//! outcome to the result file. Exit code 0 = success, 1 = failure,
//! 2 = the script ended with the run still pending (the caller's watchdog
//! decides what that means).

#![forbid(unsafe_code)]

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bta_common::config::BtaConfig;
use bta_common::dispatch::Harness;
use bta_common::feed;
use bta_common::report::{FileReporter, ResultReporter};
use bta_common::sim::SimLink;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let args = cli.command.args();

    let config = BtaConfig::load(args.config.as_deref())?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let kind = cli.command.kind();
    let target = args
        .device
        .clone()
        .unwrap_or_else(|| config.general.device_name.clone());
    let pin = args
        .pin
        .clone()
        .unwrap_or_else(|| config.pairing.pin.clone());
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| config.general.result_file.clone().into());

    let mut link = SimLink::new();
    if args.radio_on {
        link = link.radio_on();
    }
    for name in &args.bonded {
        link = link.with_bonded(name);
    }

    let mut reporter = FileReporter::new(&out);
    if args.json {
        reporter = reporter.json();
    }
    let reporter: Box<dyn ResultReporter> = Box::new(reporter);

    info!(test = %kind, device = %target, script = %args.script, "starting test run");
    let mut harness = Harness::new(kind, target, cli.command.rename_to(), pin, link, reporter);

    if harness.is_finished() {
        // The entry action alone decided the run.
        return Ok(exit_code(&harness));
    }

    if args.script == "-" {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut number = 0usize;
        while let Some(line) = lines.next_line().await.context("reading feed from stdin")? {
            number += 1;
            let Some(notification) = feed::parse_line(&line, number)? else {
                continue;
            };
            harness.link_mut().observe(&notification);
            harness.dispatch(&notification);
            if harness.is_finished() {
                break;
            }
        }
    } else {
        let script = feed::read_script(std::path::Path::new(&args.script))?;
        for notification in &script {
            harness.link_mut().observe(notification);
            harness.dispatch(notification);
            if harness.is_finished() {
                break;
            }
        }
    }

    Ok(exit_code(&harness))
}

fn exit_code(harness: &Harness<SimLink>) -> ExitCode {
    match harness.outcome().success() {
        Some(true) => {
            info!(reason = harness.outcome().reason().unwrap_or(""), "test passed");
            ExitCode::SUCCESS
        }
        Some(false) => {
            info!(reason = harness.outcome().reason().unwrap_or(""), "test failed");
            ExitCode::from(1)
        }
        None => {
            warn!("script ended with the run still pending");
            ExitCode::from(2)
        }
    }
}
