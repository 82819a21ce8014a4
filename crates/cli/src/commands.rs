//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("omnisearch")
        .about("Keyword search across every configured entity type")
        .subcommand_required(true)
        .arg(
            Arg::new("data")
                .long("data")
                .help("JSON dataset to search (default: omnisearch-data.json)")
                .global(true),
        )
        .arg(
            Arg::new("configs")
                .long("configs")
                .help("TOML file of search configurations (default: omnisearch-configs.toml)")
                .global(true),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Settings file (default: omnisearch.toml, if present)")
                .global(true),
        )
        .arg(
            Arg::new("as")
                .long("as")
                .value_name("USER")
                .help("Search on behalf of this user (default: admin)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_search())
        .subcommand(build_seed())
        .subcommand(build_configs())
        .subcommand(build_init())
}

fn build_search() -> Command {
    Command::new("search")
        .about("Search all active configurations")
        .arg(
            Arg::new("query")
                .help("Query words; joined with spaces")
                .num_args(0..),
        )
}

fn build_seed() -> Command {
    Command::new("seed")
        .about("Install default configurations for available entity types")
        .arg(
            Arg::new("catalogue")
                .long("catalogue")
                .help("Catalogue TOML file (default: bundled catalogue)"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would be created without writing the configurations file")
                .action(ArgAction::SetTrue),
        )
}

fn build_configs() -> Command {
    Command::new("configs")
        .about("List stored configurations")
        .arg(
            Arg::new("all")
                .long("all")
                .help("Include inactive configurations")
                .action(ArgAction::SetTrue),
        )
}

fn build_init() -> Command {
    Command::new("init").about("Write a commented default settings file if none exists")
}
