//! Collaborator contracts of the execution pipeline.
//!
//! The pipeline never decides how a script is bound to an interpreter or
//! where its warnings go. Both are supplied through these traits so callers
//! (and tests) can swap them out.

use std::path::Path;

use crate::script::Script;

/// Produces scripts in an already-resolved execution environment.
///
/// # Contract
///
/// - Every returned `Script` has an empty argument list.
/// - `new_script_file` never checks that the file exists; that is
///   reported when the script runs.
pub trait ScriptFactory {
    /// Script whose body is the given inline source text.
    fn new_script(&self, text: &str) -> Script;

    /// Script whose body is read by the interpreter from `path`.
    fn new_script_file(&self, path: &Path) -> Script;

    /// Script with no body; only the arguments appended later are passed.
    fn new_arguments(&self) -> Script;
}

/// Receives the warning emitted when there is nothing to run.
pub trait DiagnosticsSink {
    fn warn(&mut self, message: &str);
}

/// Default sink forwarding warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Sink that keeps every warning in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectedDiagnostics {
    pub warnings: Vec<String>,
}

impl DiagnosticsSink for CollectedDiagnostics {
    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
