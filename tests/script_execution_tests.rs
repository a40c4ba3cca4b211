//! Tests for Script Execution and Error Handling
//!
//! These tests run real scripts through `/bin/sh` and verify:
//! - Source selection and argument composition end to end
//! - Stdout redirection to an output file
//! - Soft-skip of an empty invocation vs. hard failure of a bad one
//! - The `script-exec` binary's exit status

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use script_exec::{
    execute, CollectedDiagnostics, DispatchOutcome, ExecConfig, ExecError, Interpreter,
    ScriptFactory,
};

fn sh() -> Interpreter {
    Interpreter::new("sh").with_inline_flag("-c").with_inline_arg0("sh")
}

fn config_in(dir: &Path) -> ExecConfig {
    ExecConfig {
        launch_directory: Some(dir.to_path_buf()),
        interpreter: sh(),
        ..ExecConfig::default()
    }
}

fn run(config: &ExecConfig) -> (Result<DispatchOutcome, ExecError>, Vec<String>) {
    let mut diagnostics = CollectedDiagnostics::default();
    let result = execute(&config.interpreter, config, &mut diagnostics);
    (result, diagnostics.warnings)
}

// =============================================================================
// Output Redirection
// =============================================================================

#[test]
fn test_output_file_contains_exact_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("captured.txt");
    let config = ExecConfig {
        script: Some("printf 'line one\\nline two\\n'; echo to-stderr >&2".to_string()),
        output_file: Some(out.clone()),
        ..config_in(dir.path())
    };

    let (result, warnings) = run(&config);

    assert_eq!(result.unwrap(), DispatchOutcome::Succeeded);
    assert!(warnings.is_empty());
    assert_eq!(fs::read(&out).unwrap(), b"line one\nline two\n");
}

#[test]
fn test_output_file_is_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("captured.txt");
    fs::write(&out, "stale content that is much longer than the new output").unwrap();

    let config = ExecConfig {
        script: Some("printf new".to_string()),
        output_file: Some(out.clone()),
        ..config_in(dir.path())
    };
    run(&config).0.unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "new");
}

#[test]
fn test_output_file_written_even_when_script_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("partial.txt");
    let config = ExecConfig {
        script: Some("echo before; exit 2".to_string()),
        output_file: Some(out.clone()),
        ..config_in(dir.path())
    };

    let err = run(&config).0.unwrap_err();

    assert!(matches!(err, ExecError::Failed { code: Some(2), .. }));
    assert_eq!(fs::read_to_string(&out).unwrap(), "before\n");
}

// =============================================================================
// Script Files
// =============================================================================

#[test]
fn test_file_script_receives_composed_arguments() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("args.sh"), "for a in \"$@\"; do echo \"[$a]\"; done\n").unwrap();
    let out = dir.path().join("out.txt");

    let config = ExecConfig {
        file: Some(PathBuf::from("args.sh")),
        exec_arg_lines: Some(vec!["a b".to_string(), "c".to_string()]),
        exec_args: Some("d e".to_string()),
        args: Some("f".to_string()),
        output_file: Some(out.clone()),
        ..config_in(dir.path())
    };
    run(&config).0.unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "[a b]\n[c]\n[d]\n[e]\n[f]\n"
    );
}

#[test]
fn test_file_with_non_utf8_name_runs() {
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let name = PathBuf::from(std::ffi::OsStr::from_bytes(b"run\xff.sh"));
    fs::write(dir.path().join(&name), "printf ok").unwrap();
    let out = dir.path().join("out.txt");

    let config = ExecConfig {
        file: Some(name),
        output_file: Some(out.clone()),
        ..config_in(dir.path())
    };

    assert_eq!(run(&config).0.unwrap(), DispatchOutcome::Succeeded);
    assert_eq!(fs::read_to_string(&out).unwrap(), "ok");
}

#[test]
fn test_inline_script_ignores_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let config = ExecConfig {
        script: Some("printf inline".to_string()),
        file: Some(PathBuf::from("does-not-exist.sh")),
        output_file: Some(out.clone()),
        ..config_in(dir.path())
    };

    run(&config).0.unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "inline");
}

#[test]
fn test_missing_file_fails_and_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let config = ExecConfig {
        file: Some(PathBuf::from("does-not-exist.sh")),
        output_file: Some(out.clone()),
        ..config_in(dir.path())
    };

    let (result, warnings) = run(&config);

    assert!(matches!(result, Err(ExecError::MissingScriptFile(_))));
    assert!(warnings.is_empty());
    assert!(!out.exists());
}

// =============================================================================
// Argument-Only Invocations
// =============================================================================

#[test]
fn test_argument_only_invocation_runs_interpreter_with_args() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let config = ExecConfig {
        exec_arg_lines: Some(vec!["-c".to_string(), "printf '%s' \"$0\"".to_string()]),
        args: Some("zero".to_string()),
        output_file: Some(out.clone()),
        ..config_in(dir.path())
    };

    run(&config).0.unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "zero");
}

// =============================================================================
// Soft-Skip vs. Hard Failure
// =============================================================================

#[test]
fn test_nothing_to_run_is_skipped_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExecConfig {
        script: Some(String::new()),
        exec_args: Some("   ".to_string()),
        ..config_in(dir.path())
    };

    let (result, warnings) = run(&config);

    assert_eq!(result.unwrap(), DispatchOutcome::Skipped);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("no arguments given"));
}

#[test]
fn test_nonzero_exit_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExecConfig {
        script: Some("exit 9".to_string()),
        ..config_in(dir.path())
    };

    let (result, warnings) = run(&config);

    match result {
        Err(ExecError::Failed { code, command }) => {
            assert_eq!(code, Some(9));
            assert!(command.starts_with("sh -c"));
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(warnings.is_empty());
}

#[test]
fn test_missing_launch_directory_is_launch_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExecConfig {
        script: Some("true".to_string()),
        ..config_in(&dir.path().join("gone"))
    };

    let (result, _) = run(&config);

    assert!(matches!(result, Err(ExecError::Launch { .. })));
}

#[test]
fn test_script_is_consumed_by_execution() {
    let dir = tempfile::tempdir().unwrap();
    let mut script = sh().new_script("exit 0");
    script.add_args(Some("unused"));
    assert!(script.execute_in(dir.path()).is_ok());
}

// =============================================================================
// Binary
// =============================================================================

fn binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_script-exec"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_binary_skips_with_warning_and_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary()
        .args(["--interpreter", "sh", "-C"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no arguments given"));
}

#[test]
fn test_binary_fails_on_failing_script() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary()
        .args(["--interpreter", "sh", "--inline-flag", "-c", "-e", "exit 5", "-C"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_inherits_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary()
        .args([
            "--interpreter",
            "sh",
            "--inline-flag",
            "-c",
            "--inline-arg0",
            "sh",
            "-e",
            "echo \"$1-$2\"",
            "--exec-args",
            "left right",
            "-C",
        ])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "left-right\n");
}

#[test]
fn test_binary_print_command() {
    let output = binary()
        .args([
            "--interpreter",
            "ruby",
            "--file",
            "bin/setup.rb",
            "--exec-arg-line",
            "two words",
            "--print-command",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ruby bin/setup.rb 'two words'\n"
    );
}

#[test]
fn test_binary_save_config_writes_file_without_running() {
    let dir = tempfile::tempdir().unwrap();
    let saved = dir.path().join("exec.json");
    let marker = dir.path().join("ran.txt");

    let output = binary()
        .args(["--interpreter", "sh", "--inline-flag", "-c", "-e", "touch ran.txt", "-C"])
        .arg(dir.path())
        .arg("--save-config")
        .arg(&saved)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(!marker.exists());

    let config = ExecConfig::load_from_file(&saved).unwrap();
    assert_eq!(config.script.as_deref(), Some("touch ran.txt"));
    assert_eq!(config.interpreter.program, "sh");
    assert_eq!(config.launch_directory.as_deref(), Some(dir.path()));
}
