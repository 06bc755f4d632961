//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Decision-tree questionnaire: three yes/no questions that route to a recommended service
#[derive(Parser, Debug)]
#[command(name = "decitree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding a local .decitree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer the questionnaire interactively
    Run {
        /// Advance immediately after each answer
        #[arg(long)]
        no_delay: bool,
    },

    /// Print the recommendation for a full answer path
    Route {
        /// Answers as <question>=<answer>, e.g. q1=yes q2=no
        #[arg(required = true, num_args = 1..)]
        answers: Vec<String>,
        /// Print the result payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the title, description and link of an outcome
    Result {
        /// consultation, evidence-review or applied-research
        outcome: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the transition table
    Tree,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Show config file locations
    Path,
    /// Print a commented template config
    Template,
}
