//! gradecast CLI
//!
//! Commands:
//! - `gradecast predict` - Read a JSON payload from stdin, print the prediction
//! - `gradecast serve`   - Run the HTTP prediction endpoint

pub mod script;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Grade prediction endpoint
#[derive(Parser, Debug)]
#[command(name = "gradecast")]
#[command(author, version, about = "Serve regression predictions over HTTP or stdin/stdout", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory
    #[arg(short, long, default_value = "config", global = true)]
    pub config: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Predict from a JSON payload on stdin (default when no command is given)
    Predict {
        /// Directory holding lin_reg.pkl and multi_reg.pkl
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },

    /// Run the HTTP prediction server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding lin_reg.pkl and multi_reg.pkl
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// The subcommand to run; a bare invocation behaves like `predict`.
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Predict { model_dir: None })
    }
}
