use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

/// Run the demo binary in a fresh, empty directory
fn tasks(name: &str, args: &[&str]) -> (Output, PathBuf) {
    let dir = std::env::temp_dir().join(format!(
        "herald-demo-usage-{name}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("failed to create a scratch directory");

    let output = Command::new(env!("CARGO_BIN_EXE_herald-demo"))
        .args(args)
        .current_dir(&dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run herald-demo");

    (output, dir)
}

#[test]
fn test_bad_flag_value_prints_usage_and_exits() {
    let (output, dir) = tasks("limit", &["list", "--limit=abc"]);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stdout.starts_with("Incorrect Usage.\n\nlist - show tasks\n"),
        "{stdout}"
    );
    assert!(stdout.contains("tasks list [command options] [arguments...]"));
    assert_eq!(
        stderr.trim_end(),
        r#"tasks list: invalid value "abc" for flag -limit: failed to parse "abc": invalid digit found in string"#
    );

    assert!(!dir.join("tasks.txt").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_rejected_command_line_writes_nothing() {
    let (output, dir) = tasks("add", &["add", "--priority=someday", "buy", "milk"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .starts_with("Incorrect Usage.\n\nadd - add a task\n"));

    assert!(!dir.join("tasks.txt").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_global_flag_after_command_is_rejected() {
    let (output, dir) = tasks("file", &["list", "--file", "other.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("flag provided but not defined: -file"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_add_then_list() {
    let (output, dir) = tasks("roundtrip", &[]);
    assert!(output.status.success());

    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_herald-demo"))
            .args(args)
            .current_dir(&dir)
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run herald-demo")
    };

    assert!(run(&["add", "-p", "now", "-t", "home", "fix", "the", "sink"]).status.success());
    assert!(run(&["add", "water", "plants"]).status.success());

    let listed = run(&["list", "-min-priority", "high"]);
    let stdout = String::from_utf8(listed.stdout).unwrap();

    assert!(listed.status.success());
    assert!(stdout.contains("[now] fix the sink"), "{stdout}");
    assert!(!stdout.contains("water plants"), "{stdout}");
    assert!(stdout.ends_with("1 task(s), about 1.5 hour(s)\n"), "{stdout}");

    fs::remove_dir_all(&dir).unwrap();
}
