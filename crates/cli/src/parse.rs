//! ArgMatches → CliAction conversion.
//!
//! Global flags become [`SessionOptions`]; the subcommand becomes a
//! [`CliAction`].

use std::path::PathBuf;

use clap::ArgMatches;
use omnisearch::Identity;

use crate::format::OutputMode;

/// Default dataset path.
pub const DEFAULT_DATA_FILE: &str = "omnisearch-data.json";
/// Default configurations path.
pub const DEFAULT_CONFIGS_FILE: &str = "omnisearch-configs.toml";
/// User searched as when `--as` is absent.
pub const DEFAULT_USER: &str = "admin";

/// The result of parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Run a global search.
    Search { query: String },
    /// Seed default configurations.
    Seed {
        catalogue: Option<PathBuf>,
        dry_run: bool,
    },
    /// List configurations.
    Configs { all: bool },
    /// Write the default settings file.
    Init,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub data: PathBuf,
    pub configs: PathBuf,
    pub settings: Option<PathBuf>,
    pub caller: Identity,
    pub mode: OutputMode,
}

/// Read the global flags.
pub fn session_options(matches: &ArgMatches) -> SessionOptions {
    let path_or = |name: &str, default: &str| {
        PathBuf::from(
            matches
                .get_one::<String>(name)
                .map(String::as_str)
                .unwrap_or(default),
        )
    };

    SessionOptions {
        data: path_or("data", DEFAULT_DATA_FILE),
        configs: path_or("configs", DEFAULT_CONFIGS_FILE),
        settings: matches.get_one::<String>("settings").map(PathBuf::from),
        caller: Identity::user(
            matches
                .get_one::<String>("as")
                .map(String::as_str)
                .unwrap_or(DEFAULT_USER),
        ),
        mode: if matches.get_flag("json") {
            OutputMode::Json
        } else {
            OutputMode::Human
        },
    }
}

/// Convert the subcommand into an action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    match matches.subcommand() {
        Some(("search", sub)) => {
            let query = sub
                .get_many::<String>("query")
                .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            Ok(CliAction::Search { query })
        }
        Some(("seed", sub)) => Ok(CliAction::Seed {
            catalogue: sub.get_one::<String>("catalogue").map(PathBuf::from),
            dry_run: sub.get_flag("dry-run"),
        }),
        Some(("configs", sub)) => Ok(CliAction::Configs {
            all: sub.get_flag("all"),
        }),
        Some(("init", _)) => Ok(CliAction::Init),
        Some((other, _)) => Err(format!("Unknown command: {}", other)),
        None => Err("No command given".to_string()),
    }
}
