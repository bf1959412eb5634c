//! Commander - a command-line front end for DeepSeek AI.
//!
//! `cdr` forwards a query to a text-completion service and prints the answer
//! or saves it to a file. It can read the query from a file and can require
//! the answer to be a bash script.
//!
//! # Architecture
//!
//! - [`args`] - Command-line parsing into an [`args::ArgumentModel`]
//! - [`logging`] - Verbosity-gated `[LOG]: ` logger and tracing setup
//! - [`file_service`] - Whole-file reads and writes
//! - [`ai_service`] - Query dispatch and shell-script enforcement
//! - [`completion`] - Completion backends (DeepSeek, echo)
//! - [`http_client`] - HTTP client abstraction
//! - [`shell_script`] - Script normalization and `bash -n` validation
//! - [`config`] - Configuration file and environment overrides
//! - [`app`] - Per-invocation control flow
//! - [`error`] - The shared error type
//! - [`messages`] - User-facing strings
//!
//! # Example
//!
//! ```bash
//! # Ask a question
//! cdr "what's good"
//!
//! # Demand a bash script, with progress logging
//! cdr "write a script that backs up ~/notes" -s -v
//!
//! # Read the query from a file and save the answer
//! cdr -r input.txt -w output.md
//! ```
//!
//! # Configuration
//!
//! The API key is read from `~/.commander/config.toml`
//! (`deepseek_api_key = "sk-..."`) or the `DEEPSEEK_API_KEY` environment
//! variable. Setting `COMMANDER_USE_MOCK` swaps the network call for a
//! deterministic echo.

pub mod ai_service;
pub mod app;
pub mod args;
pub mod completion;
pub mod config;
pub mod error;
pub mod file_service;
pub mod http_client;
pub mod logging;
pub mod messages;
pub mod shell_script;
