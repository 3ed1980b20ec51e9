// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use assert_cmd::Command;

fn admin_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gateway-admin");
    // Nothing listens on the discard port, so any request fails fast.
    cmd.envs([
        ("ADMIN_API_BASE_URL", "http://127.0.0.1:9"),
        ("ADMIN_API_TIMEOUT_SECS", "2"),
        ("RUST_LOG", "off"),
    ]);
    cmd.env_remove("ADMIN_API_KEY");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = admin_cmd();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_companies_create_help() {
    let mut cmd = admin_cmd();
    cmd.arg("companies").arg("create").arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_payments_history_help() {
    let mut cmd = admin_cmd();
    cmd.arg("payments").arg("history").arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_history_rejects_bad_date() {
    let mut cmd = admin_cmd();
    cmd.arg("payments").arg("history").arg("--from").arg("yesterday");
    cmd.assert().failure();
}

#[test]
fn test_cli_unknown_path_fails() {
    let mut cmd = admin_cmd();
    cmd.arg("open").arg("/nowhere");
    cmd.assert().failure();
}

#[test]
fn test_cli_invalid_base_url_fails() {
    let mut cmd = admin_cmd();
    cmd.arg("--base-url").arg("ftp://example.com").arg("health");
    cmd.assert().failure();
}

#[test]
fn test_cli_unreachable_backend_reports_down() {
    let mut cmd = admin_cmd();
    cmd.arg("health");
    let output = cmd.output().expect("run gateway-admin");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("API: DOWN"), "{stdout}");
}
