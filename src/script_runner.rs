//! Script Execution
//!
//! Runs a composed [`Script`] as a child process and waits for it.
//!
//! - The child's working directory is the launch directory.
//! - Stdout is either inherited or written to an output file
//!   (created or truncated). Stderr is always inherited.
//! - A missing script file, a launch failure, an unopenable output file and
//!   an unsuccessful exit are all reported as errors.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

use crate::error::{ExecError, Result};
use crate::script::Script;

/// Output from a script execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Rendered command line, for error messages.
    pub command: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the script exited successfully (exit code 0).
    pub success: bool,
}

impl ScriptOutput {
    /// Turn an unsuccessful exit into [`ExecError::Failed`].
    pub fn ensure_success(&self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(ExecError::failed(self.command.clone(), self.exit_code))
        }
    }
}

impl Script {
    /// Run in `launch_dir` with inherited stdout/stderr.
    pub fn execute_in(self, launch_dir: &Path) -> Result<()> {
        run_script(&self, launch_dir, None)?.ensure_success()
    }

    /// Run in `launch_dir`, writing stdout to `output_file`.
    pub fn execute_in_to_file(self, launch_dir: &Path, output_file: &Path) -> Result<()> {
        run_script(&self, launch_dir, Some(output_file))?.ensure_success()
    }
}

/// Execute a script and report how it terminated.
///
/// Only spawning and I/O failures are errors here; a non-zero exit is
/// returned as an unsuccessful [`ScriptOutput`].
pub fn run_script(
    script: &Script,
    launch_dir: &Path,
    output_file: Option<&Path>,
) -> Result<ScriptOutput> {
    if let Some(file) = script.file() {
        if !launch_dir.join(file).exists() {
            return Err(ExecError::MissingScriptFile(file.to_path_buf()));
        }
    }

    let interpreter = script.interpreter();
    let command_line = script.command_line();

    // Log exact command for transparency
    info!(
        "run_script: {} (dir={}, origin={}, stdout={})",
        command_line,
        launch_dir.display(),
        script.origin(),
        output_file.map_or_else(|| "inherit".to_string(), |p| p.display().to_string())
    );

    let mut cmd = Command::new(&interpreter.program);
    cmd.args(script.command_args())
        .current_dir(launch_dir)
        .envs(&interpreter.env);

    if let Some(path) = output_file {
        let file = File::create(path).map_err(|e| ExecError::output_file(path, e))?;
        cmd.stdout(Stdio::from(file));
    }

    // The redirect handle lives in `cmd` and is closed when it drops, on every path
    let status = cmd
        .status()
        .map_err(|e| ExecError::launch(interpreter.program.clone(), e))?;

    let exit_code = status.code();
    if status.success() {
        debug!("Script exited successfully: {}", command_line);
    } else {
        debug!("Script exited with code {:?}: {}", exit_code, command_line);
    }

    Ok(ScriptOutput {
        command: command_line,
        exit_code,
        success: status.success(),
    })
}
