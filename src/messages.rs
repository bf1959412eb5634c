//! User-facing strings shared by the CLI and the services.

pub const CLI_ABOUT: &str = "Commander CLI for interacting with DeepSeek AI";

pub const QUERY_HELP: &str = "Query to send to DeepSeek AI";
pub const SEEK_HELP: &str = "Enforce response as Shell script";
pub const VERBOSE_HELP: &str = "Enables detailed output logging";
pub const READ_HELP: &str = "Read file as input";
pub const WRITE_HELP: &str = "Write file as output";
pub const HELP_HELP: &str = "Displays help information";

pub const HELP_HEADER: &str = "Help information for Commander CLI:";
pub const HELP_COMMANDS: &[&str] = &[
    "  cdr [query]          - Talk to DeepSeek AI",
    "  cdr --seek (-s)      - Enforce response as Shell script",
    "  cdr --help (-h)      - Displays help information",
    "  cdr --verbose (-v)   - Enables detailed output logging",
    "  cdr --read (-r) file - Read file as input",
    "  cdr --write (-w) file- Write file as output",
];
pub const HELP_EXAMPLES_HEADER: &str = "Examples:";
pub const HELP_EXAMPLES: &[&str] = &[
    "  cdr \"what's good\"              # Send a simple query to DeepSeek AI",
    "  cdr \"write a script\" -s -v     # Enforce response as shell script with verbose logging",
    "  cdr -r input.txt -w output.md   # Read input from file and write output to file",
];

pub const LOG_PREFIX: &str = "[LOG]: ";
pub const NO_QUERY_MESSAGE: &str = "No query provided. Use --help for usage information.";
pub const SHELL_CONVERSION_FAILED: &str = "Error: Cannot convert response to Shell script";

pub const SHEBANG: &str = "#!/bin/bash";

/// Renders the fixed help screen printed for `-h/--help`.
pub fn render_help() -> String {
    let mut help = format!("\n{HELP_HEADER}\n\n");
    for line in HELP_COMMANDS {
        help.push_str(line);
        help.push('\n');
    }
    help.push('\n');
    help.push_str(HELP_EXAMPLES_HEADER);
    help.push('\n');
    for line in HELP_EXAMPLES {
        help.push_str(line);
        help.push('\n');
    }
    help.push('\n');
    help
}
