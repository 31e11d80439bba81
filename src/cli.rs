//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Prosa static blog generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: prosa.toml)
    #[arg(short = 'C', long, default_value = "prosa.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scaffold a new site
    Init {
        /// the name(path) of the site directory, relative to `root`
        name: Option<PathBuf>,
    },

    /// Build the site into the output directory
    Build,

    /// Serve the built site locally
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}
