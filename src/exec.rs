//! Source selection, argument composition and execution dispatch.
//!
//! The pipeline for one activation is fixed:
//!
//! 1. [`select_source`] picks the script origin: inline text, then a file,
//!    then a bare argument list.
//! 2. [`compose_arguments`] appends `exec_arg_lines`, `exec_args` and
//!    `args`, in that order.
//! 3. [`dispatch`] skips an empty script with a warning, otherwise runs it
//!    and propagates any failure.
//!
//! Only step 3 can fail, and only once a process is about to run.

use std::path::Path;
use strum::Display;
use tracing::{debug, info};

use crate::config::ExecConfig;
use crate::error::Result;
use crate::script::Script;
use crate::script_traits::{DiagnosticsSink, ScriptFactory};

/// Warning emitted when there is nothing to run
pub const NOTHING_TO_RUN: &str = "no arguments given. use --script=... or --file=...";

/// Successful terminal states of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DispatchOutcome {
    /// Nothing to run; a warning was emitted
    Skipped,
    /// The script ran and exited successfully
    Succeeded,
}

/// Pick the script origin.
///
/// A non-empty `script` wins over `file`; `file` is taken whether or not it
/// exists. With neither, the script has no body.
pub fn select_source<F: ScriptFactory + ?Sized>(factory: &F, config: &ExecConfig) -> Script {
    match (config.script.as_deref(), config.file.as_deref()) {
        (Some(text), _) if !text.is_empty() => factory.new_script(text),
        (_, Some(file)) => factory.new_script_file(file),
        _ => factory.new_arguments(),
    }
}

/// Append every configured argument source in precedence order.
///
/// `exec_arg_lines` entries are appended as-is; the two string sources are
/// split on whitespace.
pub fn compose_arguments(script: &mut Script, config: &ExecConfig) {
    if let Some(ref lines) = config.exec_arg_lines {
        for line in lines {
            script.add_arg(line.as_str());
        }
    }
    script.add_args(config.exec_args.as_deref());
    script.add_args(config.args.as_deref());
}

/// Select and compose without running anything.
pub fn prepare<F: ScriptFactory + ?Sized>(factory: &F, config: &ExecConfig) -> Script {
    let mut script = select_source(factory, config);
    compose_arguments(&mut script, config);
    script
}

/// Validate and run a composed script.
pub fn dispatch(
    script: Script,
    launch_dir: &Path,
    output_file: Option<&Path>,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Result<DispatchOutcome> {
    if !script.is_valid() {
        debug!("dispatch: unvalidated -> skipped (no origin, no arguments)");
        diagnostics.warn(NOTHING_TO_RUN);
        return Ok(DispatchOutcome::Skipped);
    }

    debug!("dispatch: unvalidated -> running ({} script)", script.origin());
    let result = match output_file {
        Some(path) => script.execute_in_to_file(launch_dir, path),
        None => script.execute_in(launch_dir),
    };
    match result {
        Ok(()) => {
            debug!("dispatch: running -> succeeded");
            Ok(DispatchOutcome::Succeeded)
        }
        Err(e) => {
            debug!("dispatch: running -> failed: {}", e);
            Err(e)
        }
    }
}

/// Run the whole pipeline for one configuration.
pub fn execute<F: ScriptFactory + ?Sized>(
    factory: &F,
    config: &ExecConfig,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Result<DispatchOutcome> {
    let script = prepare(factory, config);
    let launch_dir = config.resolve_launch_directory()?;
    let outcome = dispatch(script, &launch_dir, config.output_file.as_deref(), diagnostics)?;
    info!("exec {}", outcome);
    Ok(outcome)
}

/// Command line the configuration would run, or `None` when it is empty.
pub fn preview<F: ScriptFactory + ?Sized>(factory: &F, config: &ExecConfig) -> Option<String> {
    let script = prepare(factory, config);
    script.is_valid().then(|| script.command_line())
}
