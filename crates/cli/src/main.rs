//! omnisearch CLI: one query across every configured entity type.
//!
//! - `omnisearch search <words...>`: run a global search
//! - `omnisearch seed`: install default configurations
//! - `omnisearch configs`: list stored configurations
//! - `omnisearch init`: write a commented settings file
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`).

mod commands;
mod format;
mod parse;
mod state;

use std::path::Path;
use std::process;

use omnisearch::{SearchSettings, SETTINGS_FILE_NAME};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_configs, format_error, format_groups, format_seed_report, OutputMode};
use parse::{matches_to_action, session_options, CliAction};
use state::Session;

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let options = session_options(&matches);
    let mode = options.mode;

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(2);
        }
    };

    process::exit(run(action, options, mode));
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(action: CliAction, options: parse::SessionOptions, mode: OutputMode) -> i32 {
    if action == CliAction::Init {
        let path = options
            .settings
            .clone()
            .unwrap_or_else(|| Path::new(SETTINGS_FILE_NAME).to_path_buf());
        return match SearchSettings::write_default_if_missing(&path) {
            Ok(()) => {
                println!("{}", path.display());
                0
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                1
            }
        };
    }

    let session = match Session::open(options) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            return 1;
        }
    };

    match action {
        CliAction::Search { query } => {
            println!("{}", format_groups(&session.search(&query), mode));
            0
        }
        CliAction::Seed { catalogue, dry_run } => {
            match session.seed(catalogue.as_deref(), dry_run) {
                Ok(report) => {
                    println!("{}", format_seed_report(&report, mode));
                    if !dry_run && report.created > 0 {
                        eprintln!("wrote {}", session.options().configs.display());
                    }
                    0
                }
                Err(e) => {
                    eprintln!("{}", format_error(&e, mode));
                    1
                }
            }
        }
        CliAction::Configs { all } => {
            println!("{}", format_configs(&session.configs(all), mode));
            0
        }
        CliAction::Init => 0,
    }
}
