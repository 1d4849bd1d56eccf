//! Shared integration-test helpers for running the `gtc-peer` binary and
//! writing throwaway settings files.

#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

/// Runs `gtc-peer` with `args` and waits for it to exit.
///
/// Logging is silenced and credential variables from the caller's
/// environment are removed so results depend only on `args`.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    spawn_command_with_env(args, &[])
}

/// Like [`spawn_command`], with extra environment variables.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_gtc-peer");
    let mut cmd = Command::new(bin);
    cmd.args(args);
    for var in [
        "GTC_PEER_SETTINGS",
        "GTC_PEER_PASSWORD",
        "GTC_PEER_OTP",
        "GTC_PEER_NEW_PASSWORD",
        "GTC_PEER_IDENTITY",
        "GTC_PEER_LOG_LEVEL",
        "GTC_PEER_LOG_FORMAT",
    ] {
        cmd.env_remove(var);
    }
    cmd.envs(env.iter().copied());
    cmd.output().expect("failed to spawn gtc-peer")
}

/// Writes `contents` to a temporary settings file.
#[allow(clippy::missing_panics_doc)]
pub fn settings_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write settings");
    file.flush().expect("flush settings");
    file
}

/// Parses stdout as JSON.
#[allow(clippy::missing_panics_doc)]
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}"))
}
