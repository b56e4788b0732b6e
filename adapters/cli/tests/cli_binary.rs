//! Runs the built `castle-run` binary on paths that finish before a window opens.

use std::process::{Command, Output};

fn castle_run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_castle-run"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("castle-run binary should start")
}

#[test]
fn help_lists_every_flag() {
    let output = castle_run(&["--help"]);
    assert!(output.status.success());

    let help = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--tuning",
        "--seed",
        "--target-fps",
        "--end-screen-ms",
        "--max-frame-ms",
        "--vsync",
        "--show-fps",
    ] {
        assert!(help.contains(flag), "{flag} missing from:\n{help}");
    }
}

#[test]
fn unreadable_tuning_file_fails_before_the_window_opens() {
    let output = castle_run(&["--tuning", "/nonexistent/castle-run.toml"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("/nonexistent/castle-run.toml"),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn zero_frame_clamp_is_a_usage_error() {
    let output = castle_run(&["--max-frame-ms", "0"]);
    assert_eq!(output.status.code(), Some(2));
}
