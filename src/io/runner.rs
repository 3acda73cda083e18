//! Wrapper for issuing tool sub-commands as child processes.

use std::process::Command;

use tracing::instrument;

use crate::core::template::substitute;
use crate::error::SyncError;
use crate::io::process::{run_to_lines, RunOutput};
use crate::sink::LineSink;

/// Fixed relative path of the optional tool configuration file.
pub const TOOL_CONFIG_PATH: &str = "dbsync.drushrc.php";

/// Default tool binary.
pub const DEFAULT_TOOL_BIN: &str = "drush";

/// Prefix applied to tool output re-emitted through the sink.
const TOOL_PREFIX: &str = "Tool: ";

/// Runs fully-resolved tool commands and captures their output.
///
/// The base invocation (binary plus optional `-c` flag) is assembled once at
/// construction and never changes; sub-commands are rendered per call, so one
/// runner can issue command A and then command B sequentially with nothing
/// shared between the two beyond the immutable base.
#[derive(Debug)]
pub struct ToolRunner {
    program: String,
    base_args: Vec<String>,
    subcommand: Option<String>,
    verbose: bool,
}

impl ToolRunner {
    /// Build the fixed base invocation.
    ///
    /// `use_config_file=false` omits the `-c` flag entirely, not as an empty
    /// argument.
    pub fn new(tool_bin: &str, use_config_file: bool, verbose: bool) -> Self {
        let mut base_args = Vec::new();
        if use_config_file {
            base_args.push("-c".to_string());
            base_args.push(TOOL_CONFIG_PATH.to_string());
        }
        Self {
            program: tool_bin.to_string(),
            base_args,
            subcommand: None,
            verbose,
        }
    }

    /// Render `template` with `replacements` and attach it as the next
    /// sub-command. Chainable; replaces any previously attached sub-command.
    pub fn subcommand(&mut self, template: &str, replacements: &[(&str, &str)]) -> &mut Self {
        self.subcommand = Some(substitute(template, replacements));
        self
    }

    /// Full command line as it would be executed, for display.
    pub fn render(&self) -> String {
        match &self.subcommand {
            Some(sub) => format!("{} {sub}", self.base()),
            None => self.base(),
        }
    }

    fn base(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.base_args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }

    /// Execute the attached sub-command and return its captured output.
    ///
    /// Every stderr line is forwarded to `sink` prefixed `Tool: `; captured
    /// stdout lines are forwarded the same way only in verbose mode. The
    /// sub-command is consumed, so a second `run` without a fresh
    /// [`ToolRunner::subcommand`] call fails with
    /// [`SyncError::InvalidCommand`].
    #[instrument(skip_all, fields(program = %self.program))]
    pub fn run(&mut self, sink: &mut dyn LineSink) -> Result<RunOutput, SyncError> {
        let Some(sub) = self.subcommand.take() else {
            return Err(SyncError::InvalidCommand);
        };
        let display = format!("{} {sub}", self.base());
        if self.verbose {
            sink.write_line(&format!("Executing: {display}"));
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args);
        cmd.args(sub.split_whitespace());

        let output = run_to_lines(cmd, &display)?;

        for line in &output.stderr {
            sink.write_line(&format!("{TOOL_PREFIX}{line}"));
        }
        if self.verbose {
            for line in &output.stdout {
                sink.write_line(&format!("{TOOL_PREFIX}{line}"));
            }
        }
        Ok(output)
    }
}
