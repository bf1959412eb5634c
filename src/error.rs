//! Error type shared by every component of the CLI.

use crate::messages::LOG_PREFIX;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure the CLI can surface to the top-level handler.
#[derive(Error, Debug)]
pub enum CommanderError {
    /// Malformed command line (unknown flag, missing value, ...)
    #[error(transparent)]
    ArgumentParse(#[from] clap::Error),

    #[error("Error reading file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The response could not be turned into a runnable shell script
    #[error("Cannot convert response to Shell script: {0}")]
    ShellConversion(String),

    /// The completion backend failed or returned something unusable
    #[error("Completion request failed: {0}")]
    Completion(String),

    /// Writing the response to stdout failed
    #[error("Output error: {0}")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CommanderError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommanderError::ArgumentParse(err) => err.exit_code(),
            _ => 1,
        }
    }

    /// Prints the error and terminates the process.
    ///
    /// Parse errors are rendered by clap itself (usage on stderr, status 2).
    /// Everything else is printed with the log prefix, regardless of verbosity.
    pub fn exit(self) -> ! {
        match self {
            CommanderError::ArgumentParse(err) => err.exit(),
            other => {
                eprintln!("{}{}", LOG_PREFIX, other);
                std::process::exit(other.exit_code())
            }
        }
    }
}
