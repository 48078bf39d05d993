use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Browse a TMDB person's movies and similar titles", long_about = None)]
pub struct Cli {
    /// Use this config file instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List movies featuring the configured person
    List {
        /// TMDB person id, overriding `discover.person_id`
        #[arg(long)]
        person: Option<u64>,

        /// Retry this many times after a failed load
        #[arg(long, default_value_t = 0)]
        retry: u32,
    },

    /// Show a movie and the movies similar to it
    Detail {
        /// TMDB movie id
        movie_id: u64,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration (API key redacted)
    Show,
    /// Write the effective configuration to the config file if none exists
    Init,
}
