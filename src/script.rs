//! The composed unit of work: a script origin plus positional arguments.
//!
//! A `Script` is created by a [`ScriptFactory`](crate::script_traits::ScriptFactory)
//! with a fixed origin and no arguments. Arguments are only ever appended,
//! never removed or reordered, because their order becomes the command-line
//! order the interpreter sees.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use strum::Display;

use crate::interpreter::Interpreter;

/// Where the script body comes from.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Origin {
    /// Source text handed to the interpreter through its inline flag
    #[strum(to_string = "inline")]
    InlineText(String),
    /// A script file, resolved against the launch directory at run time
    #[strum(to_string = "file")]
    FilePath(PathBuf),
    /// No body: the arguments alone form the invocation
    #[strum(to_string = "none")]
    None,
}

/// A script bound to the interpreter environment it will run in.
#[derive(Debug, Clone)]
pub struct Script {
    interpreter: Interpreter,
    origin: Origin,
    arguments: Vec<String>,
}

impl Script {
    pub(crate) fn new(interpreter: Interpreter, origin: Origin) -> Self {
        Self {
            interpreter,
            origin,
            arguments: Vec::new(),
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// The script file, if the origin is a file.
    pub fn file(&self) -> Option<&Path> {
        match &self.origin {
            Origin::FilePath(path) => Some(path),
            _ => None,
        }
    }

    /// Append a single argument verbatim, embedded whitespace included.
    pub fn add_arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.arguments.push(arg.into());
        self
    }

    /// Append every fragment of a whitespace-separated string.
    ///
    /// `None`, an empty string and a whitespace-only string all contribute
    /// nothing. No quoting or escaping is recognised; use [`Script::add_arg`]
    /// for arguments that contain spaces.
    pub fn add_args(&mut self, args: Option<&str>) -> &mut Self {
        if let Some(args) = args {
            self.arguments.extend(args.split_whitespace().map(str::to_string));
        }
        self
    }

    /// A script is runnable when it has a body or at least one argument.
    pub fn is_valid(&self) -> bool {
        self.origin != Origin::None || !self.arguments.is_empty()
    }

    /// Full argument vector passed to the interpreter program:
    /// `<flags...> <origin...> <arguments...>`.
    ///
    /// The script file path is passed through unchanged, even when it is
    /// not valid UTF-8.
    pub fn command_args(&self) -> Vec<OsString> {
        let mut argv: Vec<OsString> =
            self.interpreter.flags.iter().map(OsString::from).collect();
        match &self.origin {
            Origin::InlineText(text) => {
                argv.push(OsString::from(&self.interpreter.inline_flag));
                argv.push(OsString::from(text));
                if let Some(ref arg0) = self.interpreter.inline_arg0 {
                    argv.push(OsString::from(arg0));
                }
            }
            Origin::FilePath(path) => argv.push(path.as_os_str().to_os_string()),
            Origin::None => {}
        }
        argv.extend(self.arguments.iter().map(OsString::from));
        argv
    }

    /// Human-readable command line, single-quoting fragments that need it.
    pub fn command_line(&self) -> String {
        std::iter::once(OsString::from(&self.interpreter.program))
            .chain(self.command_args())
            .map(|arg| shell_quote(&arg.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quote a fragment for display. Only used for logging, never for execution.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
