use std::path::PathBuf;

use anyhow::Context;
use brakesim_core::ControllerKind;
use brakesim_scenarios::{Execution, ScenarioConfig, report, run_comparison, run_scenarios};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Simulates high-speed train braking across load conditions and speeds.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Controller for the scenario sweep: `closed-loop` or `open-loop`.
    /// Overrides `control_type` from the config file.
    #[clap(long)]
    control: Option<String>,

    /// TOML scenario file; built-in defaults are used when omitted.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Also compare closed-loop and open-loop stopping at the comparison
    /// velocity. Always done when the sweep uses the closed-loop controller.
    #[clap(long)]
    compare: bool,

    /// Run scenarios on the current thread instead of the rayon pool.
    #[clap(long)]
    sequential: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ScenarioConfig::load(path)
            .with_context(|| format!("could not load scenarios from {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    let kind = match &args.control {
        Some(tag) => tag
            .parse::<ControllerKind>()
            .with_context(|| format!("invalid --control value `{tag}`"))?,
        None => config.control_type,
    };
    let execution = if args.sequential {
        Execution::Sequential
    } else {
        Execution::Parallel
    };

    let results =
        run_scenarios(&config, kind, execution).context("scenario sweep failed")?;
    println!("{}", report::summary_table(kind, &results));

    if args.compare || kind == ControllerKind::ClosedLoop {
        let rows = run_comparison(&config, execution).context("comparison failed")?;
        println!("{}", report::comparison_table(&rows));
    }

    Ok(())
}
