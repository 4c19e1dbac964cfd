mod cli;
mod codec;
mod commands;
mod config;
mod engine;
mod enums;
mod error;
mod expression;
mod lookup;
mod manifest;
mod resolver;
mod resource;
mod session;
mod state;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;
use std::path::PathBuf;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub config: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        state_file: cli.state_file,
    };

    match cli.command {
        Command::Apply(args) => commands::apply::run(&ctx, &args.file, args.jobs),
        Command::Refresh { name, jobs } => commands::refresh::run(&ctx, name.as_deref(), jobs),
        Command::Destroy(args) => commands::destroy::run(&ctx, &args.names, args.all, args.jobs),
        Command::Lookup { kind, name } => commands::lookup::run(&ctx, kind, &name),
        Command::State { name } => commands::state::run(&ctx, name.as_deref()),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "zbx", &mut io::stdout());
            Ok(())
        }
    }
}
