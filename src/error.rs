//! Error handling module for script-exec
//!
//! Only the execution step produces errors. Selecting a source, composing
//! arguments and checking validity always succeed.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for script execution
#[derive(Error, Debug)]
pub enum ExecError {
    /// The selected script file does not exist in the launch directory
    #[error("Script file not found: {}", .0.display())]
    MissingScriptFile(PathBuf),

    /// The interpreter process could not be started
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be created or truncated
    #[error("Failed to open output file {}: {source}", .path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script ran but terminated unsuccessfully
    #[error(
        "Script execution failed (exit code {}): {command}",
        .code.map_or_else(|| "none".to_string(), |c| c.to_string())
    )]
    Failed { command: String, code: Option<i32> },

    /// Config file could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors outside process launch (launch directory lookup, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for `ExecConfig`
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for script-exec operations
pub type Result<T> = std::result::Result<T, ExecError>;

impl ExecError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a launch error for `program`
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    /// Create an output file error
    pub fn output_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputFile {
            path: path.into(),
            source,
        }
    }

    /// Create an unsuccessful-termination error
    pub fn failed(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::Failed {
            command: command.into(),
            code,
        }
    }
}
