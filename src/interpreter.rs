//! Interpreter environment scripts are bound to.
//!
//! An `Interpreter` is the crate's [`ScriptFactory`]: it knows which program
//! to start, which flags go before the script, how inline source is passed
//! and which environment variables the child needs (for example `GEM_HOME`
//! and `GEM_PATH` for a resolved Ruby gem set).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::script::{Origin, Script};
use crate::script_traits::ScriptFactory;

/// Default interpreter program
pub const DEFAULT_PROGRAM: &str = "ruby";

/// Default flag introducing inline source
pub const DEFAULT_INLINE_FLAG: &str = "-e";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Interpreter {
    /// Executable to start (looked up on `PATH` when not a path)
    pub program: String,
    /// Interpreter-level arguments placed before the script origin
    pub flags: Vec<String>,
    /// Flag preceding inline source text (`-e` for ruby, `-c` for sh)
    pub inline_flag: String,
    /// Placeholder after inline source; shells bind it to `$0`
    pub inline_arg0: Option<String>,
    /// Extra environment for the child process
    pub env: BTreeMap<String, String>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            flags: Vec::new(),
            inline_flag: DEFAULT_INLINE_FLAG.to_string(),
            inline_arg0: None,
            env: BTreeMap::new(),
        }
    }
}

impl Interpreter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags = flags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inline_flag(mut self, flag: impl Into<String>) -> Self {
        self.inline_flag = flag.into();
        self
    }

    pub fn with_inline_arg0(mut self, arg0: impl Into<String>) -> Self {
        self.inline_arg0 = Some(arg0.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

impl ScriptFactory for Interpreter {
    fn new_script(&self, text: &str) -> Script {
        Script::new(self.clone(), Origin::InlineText(text.to_string()))
    }

    fn new_script_file(&self, path: &Path) -> Script {
        Script::new(self.clone(), Origin::FilePath(path.to_path_buf()))
    }

    fn new_arguments(&self) -> Script {
        Script::new(self.clone(), Origin::None)
    }
}
