mod cli;
mod commands;
mod infra;
mod logging;
mod shared;
mod spruce;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let Cli { clean, command } = Cli::parse();

    logging::init();

    match command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "git-spruce",
                &mut std::io::stdout(),
            );
        }
        None => commands::clean::run(&clean)?,
    }

    Ok(())
}
