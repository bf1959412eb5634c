//! Shell script normalization and validation for `--seek`.
//!
//! A response is accepted as a script when, after stripping markdown fences
//! and any shebang the model already added, `bash -n` parses it without
//! errors. Nothing is executed: `-n` only reads and syntax-checks.
//! The script follows `--` so a leading `-` is not taken for an option.

use anyhow::Result;
use std::process::{Command, Output};

// =============================================================================
// Traits for Dependency Injection
// =============================================================================

/// Trait for running system processes.
///
/// This abstraction enables testing without spawning real processes.
pub trait ProcessRunner: Send + Sync {
    /// Executes a command and returns its output.
    fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Checks if a program exists in PATH.
    fn program_exists(&self, program: &str) -> bool;
}

/// Decides whether a normalized response is usable as a shell script.
pub trait ScriptValidator: Send + Sync {
    /// Returns the reason the script was rejected, if it was.
    fn validate(&self, script: &str) -> std::result::Result<(), String>;
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Default process runner using std::process::Command.
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        Ok(cmd.output()?)
    }

    fn program_exists(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Syntax-checks scripts with `bash -n`.
pub struct BashSyntaxValidator<R: ProcessRunner = SystemProcessRunner> {
    runner: R,
}

impl BashSyntaxValidator {
    pub fn new() -> Self {
        Self::with_runner(SystemProcessRunner)
    }
}

impl Default for BashSyntaxValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> BashSyntaxValidator<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: ProcessRunner> ScriptValidator for BashSyntaxValidator<R> {
    fn validate(&self, script: &str) -> std::result::Result<(), String> {
        if script.trim().is_empty() {
            return Err("response is empty".to_string());
        }
        // bash cannot receive NUL bytes through argv
        if script.contains('\0') {
            return Err("response contains NUL bytes".to_string());
        }
        if !self.runner.program_exists("bash") {
            return Err("bash was not found in PATH".to_string());
        }

        let output = self
            .runner
            .run("bash", &["-n", "-c", "--", script])
            .map_err(|err| format!("failed to run bash: {}", err))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                Err("bash reported a syntax error".to_string())
            } else {
                Err(stderr)
            }
        }
    }
}

/// Strips surrounding markdown code fences and a leading shebang line.
///
/// ```
/// use commander::shell_script::normalize_script;
///
/// let raw = "```bash\n#!/usr/bin/env bash\nls -la\n```";
/// assert_eq!(normalize_script(raw), "ls -la");
/// ```
pub fn normalize_script(response: &str) -> String {
    let mut script = response.trim();

    if let Some(rest) = script.strip_prefix("```") {
        // drop the info string (```bash, ```sh, ...)
        script = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
        script = script.trim_end();
        script = script.strip_suffix("```").unwrap_or(script);
        script = script.trim();
    }

    if script.starts_with("#!") {
        script = script.split_once('\n').map(|(_, body)| body).unwrap_or("");
    }

    script.trim().to_string()
}
