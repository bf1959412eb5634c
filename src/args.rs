use crate::error::CommanderError;
use crate::messages::{
    CLI_ABOUT, HELP_HELP, QUERY_HELP, READ_HELP, SEEK_HELP, VERBOSE_HELP, WRITE_HELP,
};
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Parsed command line for one `cdr` invocation.
///
/// clap's built-in help flag is disabled; `-h/--help` is a plain boolean so
/// the orchestrator can print the fixed help screen itself.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "cdr", version, about = CLI_ABOUT, long_about = None, disable_help_flag = true)]
pub struct ArgumentModel {
    #[arg(value_name = "QUERY", help = QUERY_HELP)]
    pub query: Option<String>,

    #[arg(short, long, help = SEEK_HELP)]
    pub seek: bool,

    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue, help = HELP_HELP)]
    pub help_flag: bool,

    #[arg(short, long, help = VERBOSE_HELP)]
    pub verbose: bool,

    #[arg(short = 'r', long = "read", value_name = "FILE", help = READ_HELP)]
    pub read_file: Option<PathBuf>,

    #[arg(short = 'w', long = "write", value_name = "FILE", help = WRITE_HELP)]
    pub write_file: Option<PathBuf>,
}

impl ArgumentModel {
    /// Parses the process arguments.
    pub fn from_env() -> Result<Self, CommanderError> {
        Self::try_parse_from(std::env::args_os())
    }

    /// Parses from an iterator (for testing).
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, CommanderError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(<Self as Parser>::try_parse_from(iter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = ArgumentModel::try_parse_from(["cdr"]).unwrap();
        assert_eq!(args.query, None);
        assert!(!args.seek);
        assert!(!args.help_flag);
        assert!(!args.verbose);
        assert!(args.read_file.is_none());
        assert!(args.write_file.is_none());
    }

    #[test]
    fn test_positional_query_with_short_flags() {
        let args = ArgumentModel::try_parse_from(["cdr", "write a script", "-s", "-v"]).unwrap();
        assert_eq!(args.query.as_deref(), Some("write a script"));
        assert!(args.seek);
        assert!(args.verbose);
    }

    #[test]
    fn test_long_file_flags() {
        let args =
            ArgumentModel::try_parse_from(["cdr", "--read", "input.txt", "--write", "output.md"])
                .unwrap();
        assert_eq!(args.read_file, Some(PathBuf::from("input.txt")));
        assert_eq!(args.write_file, Some(PathBuf::from("output.md")));
    }

    #[test]
    fn test_help_flag_is_a_plain_boolean() {
        let args = ArgumentModel::try_parse_from(["cdr", "-h"]).unwrap();
        assert!(args.help_flag);
        let args = ArgumentModel::try_parse_from(["cdr", "--help"]).unwrap();
        assert!(args.help_flag);
    }

    #[test]
    fn test_unknown_flag_is_a_usage_error() {
        let err = ArgumentModel::try_parse_from(["cdr", "--bogus"]).unwrap_err();
        assert!(matches!(err, CommanderError::ArgumentParse(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_read_requires_a_value() {
        let err = ArgumentModel::try_parse_from(["cdr", "-r"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
