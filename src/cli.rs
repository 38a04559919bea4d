use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::clean::CleanArgs;

#[derive(Parser)]
#[command(
    name = "git-spruce",
    version,
    about = "Removes branches that have been merged to the configured merge base branch"
)]
pub struct Cli {
    #[command(flatten)]
    pub clean: CleanArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
