//! Command-line preview for tournament plans.
//!
//! Reads the field and blind settings from flags or the environment, runs
//! the planner against a chip inventory and prints the chip bag and level
//! schedule.

mod config;
mod report;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Error};
use config::{CliConfig, CliOverrides, OutputFormat};
use log::info;
use pico_args::Arguments;
use tourney_planner::{ChipInventory, PlanError, SpeedTable, TournamentPlanner};

const HELP: &str = "\
Preview a tournament blind structure and chip distribution

USAGE:
  tp_cli --players N [OPTIONS]

OPTIONS:
  --players     N          Registered players             [default: env TP_PLAYERS]
  --reentries   N          Re-entries per player          [default: 0]
  --stack       CHIPS      Starting stack                 [default: selected from the field]
  --speed       NAME       slow, normal, turbo or hyper   [default: normal]
  --depth       BB         Starting depth in big blinds   [default: 50]
  --rate        X          Big blind growth per level     [default: speed default]
  --ante-level  N          First level with a BB ante     [default: 6]
  --inventory   FILE       JSON chip inventory            [default: standard set]
  --speeds      FILE       JSON speed table               [default: standard table]
  --rounding    NAME       nearest-payable or sig2        [default: nearest-payable]
  --format      FORMAT     text or json                   [default: text]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  TP_PLAYERS, TP_REENTRIES, TP_STACK, TP_SPEED, TP_DEPTH_BB,
  TP_INCREASE_RATE, TP_ANTE_START_LEVEL, TP_INVENTORY_FILE,
  TP_SPEED_FILE, TP_ROUNDING, TP_FORMAT
  RUST_LOG                 Log level (e.g., debug)
  (A .env file in the working directory is loaded first)

EXIT STATUS:
  1  Invalid arguments, environment or unreadable files
  2  Rejected tournament request
  3  Rejected chip inventory or speed table
";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Operator configuration problems and request problems exit differently
/// so scripts can tell a bad chip file from a bad field size.
fn exit_status(err: &Error) -> u8 {
    match err.downcast_ref::<PlanError>() {
        Some(plan_err) if plan_err.is_operator_config() => 3,
        Some(_) => 2,
        None => 1,
    }
}

fn run() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = CliOverrides {
        players: pargs.opt_value_from_str("--players")?,
        reentries: pargs.opt_value_from_str("--reentries")?,
        starting_stack: pargs.opt_value_from_str("--stack")?,
        speed: pargs.opt_value_from_str("--speed")?,
        starting_depth_bb: pargs.opt_value_from_str("--depth")?,
        increase_rate: pargs.opt_value_from_str("--rate")?,
        ante_start_level: pargs.opt_value_from_str("--ante-level")?,
        inventory_file: pargs.opt_value_from_str("--inventory")?,
        speeds_file: pargs.opt_value_from_str("--speeds")?,
        rounding: pargs.opt_value_from_str("--rounding")?,
        format: pargs.opt_value_from_str("--format")?,
    };

    env_logger::builder().format_target(false).init();

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        log::warn!("Ignoring unrecognized arguments: {:?}", remaining);
    }

    let config = CliConfig::from_env(overrides)?;
    config.validate()?;

    let inventory = match &config.inventory_file {
        Some(path) => ChipInventory::from_json(&read_file(path)?)
            .with_context(|| format!("Invalid chip inventory in {}", path.display()))?,
        None => ChipInventory::standard(),
    };
    let speeds = match &config.speeds_file {
        Some(path) => SpeedTable::from_json(&read_file(path)?)
            .with_context(|| format!("Invalid speed table in {}", path.display()))?,
        None => SpeedTable::standard(),
    };

    info!(
        "Planning {} players x {} re-entries at {} speed with {} rounding",
        config.players, config.reentries, config.speed, config.rounding
    );

    let planner = TournamentPlanner::new(inventory, speeds).with_rounding(config.rounding);
    let plan = planner.plan(&config.request())?;

    match config.format {
        OutputFormat::Text => print!(
            "{}",
            report::render_text(&plan, config.players, config.reentries)
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
