use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use waybill_ledger::args::{Args, Command};
use waybill_ledger::{commands, Config, Result};

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().ledger_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::NewMonth(month_args) => {
            let config = Config::load(home)?;
            commands::new_month(&config, month_args)?.print()
        }

        Command::AddDay(day_args) => {
            let config = Config::load(home)?;
            commands::add_day(&config, day_args)?.print()
        }

        Command::Show(show_args) => {
            let config = Config::load(home)?;
            commands::show(&config, show_args.month())?.print()
        }

        Command::Export(export_args) => {
            let config = Config::load(home)?;
            commands::export(&config, export_args.month(), export_args.output())?.print()
        }

        Command::Calc(calc_args) => {
            let config = Config::load(home)?;
            commands::calc(&config, calc_args)?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "waybill_ledger={},{}={}",
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
