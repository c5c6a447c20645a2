mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{catalog, place};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();

    // RUST_LOG wins; otherwise -v / -vv raise the default level.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();

    match &cli.command {
        Commands::Catalog(args) => catalog::run(&cli, args),
        Commands::Place(args) => place::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
