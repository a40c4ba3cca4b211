use clap::Parser;
use std::path::PathBuf;

use crate::config::ExecConfig;
use crate::error::Result;

/// script-exec - run an inline script, a script file or bare interpreter arguments
///
/// Interpreter arguments are built as:
/// `<interpreter flags> <script or file> <exec-arg-line...> <exec-args> <args>`
#[derive(Parser, Debug)]
#[command(name = "script-exec")]
#[command(about = "Run a script through an interpreter in a launch directory")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file; command-line options override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Inline script source (takes precedence over --file)
    #[arg(short = 'e', long, allow_hyphen_values = true)]
    pub script: Option<String>,

    /// Script file, relative to the launch directory
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Write the script's standard output to this file
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Whitespace-separated arguments. No quoting or escaping possible;
    /// use --exec-arg-line instead.
    #[arg(long, allow_hyphen_values = true)]
    pub exec_args: Option<String>,

    /// Additional whitespace-separated arguments, appended after --exec-args
    #[arg(long, allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Single argument passed verbatim, spaces included (repeatable)
    #[arg(long = "exec-arg-line", allow_hyphen_values = true)]
    pub exec_arg_lines: Vec<String>,

    /// Working directory for the script
    #[arg(short = 'C', long)]
    pub launch_directory: Option<PathBuf>,

    /// Interpreter program
    #[arg(short, long)]
    pub interpreter: Option<String>,

    /// Interpreter flag placed before the script (repeatable)
    #[arg(long = "interpreter-flag", allow_hyphen_values = true)]
    pub interpreter_flags: Vec<String>,

    /// Flag introducing inline source (e.g. -e for ruby, -c for sh)
    #[arg(long, allow_hyphen_values = true)]
    pub inline_flag: Option<String>,

    /// Placeholder passed after inline source, bound to $0 by shells
    #[arg(long)]
    pub inline_arg0: Option<String>,

    /// Environment variable for the script, as KEY=VALUE (repeatable)
    #[arg(long = "env", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Print the command that would run instead of running it
    #[arg(long)]
    pub print_command: bool,

    /// Save the effective configuration to this JSON file and exit
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Build the effective configuration: the config file (if any) with
    /// every option given on the command line laid over it.
    pub fn to_config(&self) -> Result<ExecConfig> {
        let mut config = match &self.config {
            Some(path) => ExecConfig::load_from_file(path)?,
            None => ExecConfig::default(),
        };
        self.apply_to(&mut config);
        Ok(config)
    }

    /// Override `config` with the options present on the command line.
    pub fn apply_to(&self, config: &mut ExecConfig) {
        if let Some(ref script) = self.script {
            config.script = Some(script.clone());
        }
        if let Some(ref file) = self.file {
            config.file = Some(file.clone());
        }
        if let Some(ref output_file) = self.output_file {
            config.output_file = Some(output_file.clone());
        }
        if let Some(ref exec_args) = self.exec_args {
            config.exec_args = Some(exec_args.clone());
        }
        if let Some(ref args) = self.args {
            config.args = Some(args.clone());
        }
        if !self.exec_arg_lines.is_empty() {
            config.exec_arg_lines = Some(self.exec_arg_lines.clone());
        }
        if let Some(ref dir) = self.launch_directory {
            config.launch_directory = Some(dir.clone());
        }

        let interpreter = &mut config.interpreter;
        if let Some(ref program) = self.interpreter {
            interpreter.program = program.clone();
        }
        if !self.interpreter_flags.is_empty() {
            interpreter.flags = self.interpreter_flags.clone();
        }
        if let Some(ref flag) = self.inline_flag {
            interpreter.inline_flag = flag.clone();
        }
        if let Some(ref arg0) = self.inline_arg0 {
            interpreter.inline_arg0 = Some(arg0.clone());
        }
        for (key, value) in &self.env {
            interpreter.env.insert(key.clone(), value.clone());
        }
    }
}

fn parse_env_pair(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid KEY=VALUE: no `=` or empty key in `{}`", s)),
    }
}
