mod cli;
mod commands;
mod config;
mod filters;
mod generator;
mod loader;
mod reporter;
mod sprite;
mod stylesheet;
mod utils;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    commands::run(cli)
}
