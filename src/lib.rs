//! script-exec Library
//!
//! Selects a script source, composes its arguments and runs it through an
//! interpreter in a launch directory.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod interpreter;
pub mod script;
pub mod script_runner;
pub mod script_traits;

// Re-export main types for convenience
pub use config::ExecConfig;
pub use error::{ExecError, Result};
pub use exec::{
    DispatchOutcome, compose_arguments, dispatch, execute, prepare, preview, select_source,
};
pub use interpreter::Interpreter;
pub use script::{Origin, Script};
pub use script_runner::{ScriptOutput, run_script};
pub use script_traits::{
    CollectedDiagnostics, DiagnosticsSink, ScriptFactory, TracingDiagnostics,
};
