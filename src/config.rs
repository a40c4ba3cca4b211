//! Execution options and their JSON config file.
//!
//! Every option is optional and defaults to absent. The options are plain
//! data: deciding what they mean happens in [`crate::exec`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExecError, Result};
use crate::interpreter::Interpreter;

/// Options for one script execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecConfig {
    /// Inline script body; ignored when empty
    pub script: Option<String>,
    /// Script file, used only when `script` is absent or empty
    pub file: Option<PathBuf>,
    /// Destination for the script's standard output
    pub output_file: Option<PathBuf>,
    /// Whitespace-separated arguments (no quoting or escaping)
    pub exec_args: Option<String>,
    /// Second whitespace-separated argument set, appended after `exec_args`
    pub args: Option<String>,
    /// Arguments passed verbatim, spaces included, before `exec_args`
    pub exec_arg_lines: Option<Vec<String>>,
    /// Working directory of the script; defaults to the current directory
    pub launch_directory: Option<PathBuf>,
    /// Interpreter the script runs under
    pub interpreter: Interpreter,
}

impl ExecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            ExecError::config(format!(
                "Failed to read configuration from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&path, json).map_err(|e| {
            ExecError::config(format!(
                "Failed to write configuration to {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        Ok(())
    }

    /// The configured launch directory, or the current directory.
    pub fn resolve_launch_directory(&self) -> Result<PathBuf> {
        match &self.launch_directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}
