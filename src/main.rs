//! u-staff command line
//!
//! Usage: `u-staff <snapshot.json>`
//!
//! Prints one JSON row per worker on stdout. Logs go to stderr; set
//! `RUST_LOG` to change the level (default `u_staff=info`).

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_staff::engine::AssignmentEngine;
use u_staff::error::StaffResult;
use u_staff::input::Snapshot;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("u_staff=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: u-staff <snapshot.json>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> StaffResult<()> {
    info!(path, "reading snapshot");
    let mut input = Snapshot::from_path(path)?.build()?;

    let engine = AssignmentEngine::with_options(input.options);
    let run = engine.run_request(&mut input.request)?;

    info!(
        placement_rate = run.summary.placement_rate(),
        shift_fill_rate = run.summary.shift_fill_rate(),
        "done"
    );
    println!("{}", serde_json::to_string_pretty(&run.rows())?);
    Ok(())
}
