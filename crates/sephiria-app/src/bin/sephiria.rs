//! Arranges the items of a plan file on the inventory grid.
//!
//! # Usage
//!
//! ```sh
//! cargo run --release -- crates/sephiria-app/plans/sample.toml
//! ```
//!
//! Search longer, with four independent restarts:
//!
//! ```sh
//! cargo run --release -- plan.toml --time 10 --restarts 4
//! ```
//!
//! Reproduce a previous run by passing the seed it printed:
//!
//! ```sh
//! cargo run --release -- plan.toml --seed <HEX> --max-iterations 100000
//! ```
//!
//! Set `RUST_LOG=debug` to trace classification and placement.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use sephiria_app::{
    Plan, RunConfig, RunError,
    render::{GroupsView, ReportView},
    run,
};
use sephiria_solver::{SearchSeed, classify};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Plan file describing the inventory and its items.
    #[arg(value_name = "PLAN")]
    plan: PathBuf,

    /// Search time per restart in seconds, overriding the plan.
    #[arg(long, value_name = "SECONDS")]
    time: Option<f64>,

    /// Search seed as 64 hex digits, overriding the plan.
    #[arg(long, value_name = "HEX")]
    seed: Option<SearchSeed>,

    /// Number of independent searches to run in parallel.
    #[arg(long, value_name = "COUNT", default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    restarts: u64,

    /// Maximum search steps per restart.
    #[arg(long, value_name = "COUNT")]
    max_iterations: Option<u64>,

    /// Search even if the budget check reports warnings.
    #[arg(long)]
    force: bool,

    /// Print the placement groups before searching.
    #[arg(long)]
    show_groups: bool,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match arrange(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::UnconfirmedWarnings { warnings }) => {
            eprintln!("The plan does not balance:");
            for warning in &warnings {
                eprintln!("  {warning}");
            }
            eprintln!("Rerun with --force to arrange it anyway.");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn arrange(args: &Args) -> Result<(), RunError> {
    let plan = Plan::load(&args.plan)?;

    let mut config = RunConfig::from_plan(&plan)?;
    if let Some(seconds) = args.time {
        config = config.with_seconds(seconds)?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.limits = config.limits.max_iterations(max_iterations);
    }
    config.restarts = args.restarts;
    config.force = args.force;

    if args.show_groups {
        let items = plan.items()?;
        let groups = classify(&items);
        println!("Groups:");
        print!("{}", GroupsView::new(&groups, &items));
        println!();
    }

    let outcome = run(&plan, &config)?;
    if !outcome.warnings.is_empty() {
        println!("Budget warnings:");
        for warning in &outcome.warnings {
            println!("  {warning}");
        }
        println!();
    }
    print!("{}", ReportView::new(&outcome));
    Ok(())
}
