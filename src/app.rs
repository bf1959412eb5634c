//! Per-invocation control flow: resolve the query, ask the AI service, and
//! deliver the answer.

use crate::ai_service::AiService;
use crate::args::ArgumentModel;
use crate::error::CommanderError;
use crate::file_service::FileService;
use crate::logging::Logger;
use crate::messages::{render_help, LOG_PREFIX, NO_QUERY_MESSAGE};
use std::io::Write;
use std::path::PathBuf;

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    HelpShown,
    NoQuery,
    Printed,
    Written(PathBuf),
}

/// Prints the fixed help screen.
pub fn show_help<W: Write>(out: &mut W) -> Result<Outcome, CommanderError> {
    write!(out, "{}", render_help())?;
    Ok(Outcome::HelpShown)
}

pub struct App<'a> {
    logger: &'a Logger,
    files: FileService<'a>,
    ai: AiService<'a>,
}

impl<'a> App<'a> {
    pub fn new(logger: &'a Logger, files: FileService<'a>, ai: AiService<'a>) -> Self {
        Self { logger, files, ai }
    }

    /// Runs one invocation, writing the response (or help/no-query notice)
    /// to `out`.
    pub async fn run<W: Write>(
        &self,
        args: &ArgumentModel,
        out: &mut W,
    ) -> Result<Outcome, CommanderError> {
        if args.help_flag {
            return show_help(out);
        }

        let query = match self.resolve_query(args)? {
            Some(query) if !query.is_empty() => query,
            _ => {
                self.logger.log(NO_QUERY_MESSAGE);
                writeln!(out, "{}{}", LOG_PREFIX, NO_QUERY_MESSAGE)?;
                return Ok(Outcome::NoQuery);
            }
        };

        let response = self.ai.get_response(&query, args.seek).await?;

        match &args.write_file {
            Some(path) => {
                self.files.write_file(path, &response)?;
                self.logger
                    .log(&format!("Response written to {}", path.display()));
                Ok(Outcome::Written(path.clone()))
            }
            None => {
                writeln!(out, "{}", response)?;
                Ok(Outcome::Printed)
            }
        }
    }

    /// `--read` wins over the positional query.
    fn resolve_query(&self, args: &ArgumentModel) -> Result<Option<String>, CommanderError> {
        if let Some(path) = &args.read_file {
            let query = self.files.read_file(path)?;
            self.logger
                .log(&format!("Read query from {}", path.display()));
            return Ok(Some(query));
        }
        Ok(args.query.clone())
    }
}
