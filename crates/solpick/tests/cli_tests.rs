use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use tracing::info;

fn write_source(dir: &TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_help_command() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Testing CLI help command");

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solidity compiler version picker"));
}

#[test]
fn test_version_command() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("solpick"));
}

#[test]
fn test_compile_subcommand_help() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.arg("compile")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compile a source file with the selected compiler"));
}

#[test]
fn test_missing_subcommand() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_file() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.args(["pragma", "/nonexistent/solpick/A.sol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_pragma_command() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let file = write_source(
        &dir,
        "Range.sol",
        "// pragma solidity 0.4.0;\npragma solidity >=0.4.21 <0.6.0;\ncontract C {}\n",
    );

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.arg("pragma")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("pragma: >=0.4.21 <0.6.0"))
        .stdout(predicate::str::contains("requirement: >=0.4.21, <0.6.0"));
}

#[test]
fn test_malformed_pragma_fails() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "Bad.sol", "pragma solidity ~0.8.0;\n");

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.arg("pragma")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a supported `pragma solidity` directive"));
}

#[test]
fn test_version_without_pragma() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "NoPragma.sol", "contract C {}\n");

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.args(["--offline", "version"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("none\n"));
}

#[test]
fn test_binary_falls_back_to_solc_env() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "NoPragma.sol", "contract C {}\n");

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.env("SOLC", "/opt/solc/solc-0.8.19")
        .args(["--offline", "binary"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("/opt/solc/solc-0.8.19\nnone\n"));
}

#[cfg(unix)]
#[test]
fn test_compile_with_explicit_solc() {
    use std::os::unix::fs::PermissionsExt;

    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "A.sol", "pragma solidity ^0.8.0;\ncontract A {}\n");

    let solc = dir.path().join("solc");
    fs::write(
        &solc,
        "#!/bin/sh\ncat > /dev/null\necho '{\"errors\":[{\"severity\":\"warning\",\"formattedMessage\":\"Warning: unused\"}],\"contracts\":{\"A.sol\":{\"A\":{}}}}'\n",
    )
    .unwrap();
    fs::set_permissions(&solc, fs::Permissions::from_mode(0o755)).unwrap();

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.env_remove("SOLPICK_SOLC_ARGS")
        .arg("compile")
        .arg(&file)
        .arg("--solc")
        .arg(&solc)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"contracts\""))
        .stdout(predicate::str::contains("errors").not());
}

#[cfg(unix)]
#[test]
fn test_compile_reports_fatal_errors() {
    use std::os::unix::fs::PermissionsExt;

    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "A.sol", "contract A {\n");

    let solc = dir.path().join("solc");
    fs::write(
        &solc,
        "#!/bin/sh\ncat > /dev/null\necho '{\"errors\":[{\"severity\":\"error\",\"formattedMessage\":\"ParserError: Expected }\"}]}'\n",
    )
    .unwrap();
    fs::set_permissions(&solc, fs::Permissions::from_mode(0o755)).unwrap();

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.args(["compile", "--solc"])
        .arg(&solc)
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Solc experienced a fatal error."));
}

#[cfg(unix)]
#[test]
fn test_compile_passes_configured_solc_args() {
    use std::os::unix::fs::PermissionsExt;

    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "A.sol", "contract A {}\n");
    let args_file = dir.path().join("args.txt");

    let solc = dir.path().join("solc");
    fs::write(
        &solc,
        format!(
            "#!/bin/sh\ncat > /dev/null\necho \"$@\" > \"{}\"\necho '{{}}'\n",
            args_file.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&solc, fs::Permissions::from_mode(0o755)).unwrap();

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.env("SOLPICK_SOLC_ARGS", "--base-path /env")
        .args(["compile", "--solc"])
        .arg(&solc)
        .arg(&file)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&args_file).unwrap().trim(), "--standard-json --base-path /env");

    let mut cmd = Command::cargo_bin("solpick").unwrap();
    cmd.env("SOLPICK_SOLC_ARGS", "--base-path /env")
        .args(["compile", "--solc-args", "--base-path /flag", "--solc"])
        .arg(&solc)
        .arg(&file)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&args_file).unwrap().trim(), "--standard-json --base-path /flag");
}
