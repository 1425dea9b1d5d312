use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

const DNS_V1: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

/// Command with the toolkit's environment defaults cleared.
fn toolkit() -> Command {
    let mut cmd = cargo_bin_cmd!("uuid-toolkit");
    cmd.env_remove("UUID_TOOLKIT_FORMAT")
        .env_remove("UUID_TOOLKIT_NAMESPACE")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_lines(cmd: &mut Command) -> Vec<String> {
    let output = cmd.output().expect("Failed to run command");
    assert!(output.status.success(), "status: {:?}", output.status);
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn is_canonical_lower(s: &str) -> bool {
    s.len() == 36
        && s.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
        })
}

#[test]
fn test_no_command_generates_one_v4() {
    let lines = stdout_lines(&mut toolkit());

    assert_eq!(lines.len(), 1);
    assert!(is_canonical_lower(&lines[0]));
    assert_eq!(&lines[0][14..15], "4");
}

#[test]
fn test_v5_known_vector() {
    toolkit()
        .args(["v5", "DNS", "example.com"])
        .assert()
        .success()
        .stdout("cfbff0d1-9375-5685-968c-48ce8b15ae17\n");
}

#[test]
fn test_v3_default_namespace_is_dns() {
    toolkit()
        .args(["v3", "example.com"])
        .assert()
        .success()
        .stdout("9073926b-929f-31c2-abc9-fad77ae3e8eb\n");
}

#[test]
fn test_namespace_env_default() {
    toolkit()
        .env("UUID_TOOLKIT_NAMESPACE", "url")
        .args(["v5", "https://example.com/"])
        .assert()
        .success()
        .stdout("dd2c1780-811a-5296-81c5-178a0ef488bc\n");
}

#[test]
fn test_namespace_token_is_case_insensitive() {
    let lower = stdout_lines(toolkit().args(["v5", "dns", "example.com"]));
    let mixed = stdout_lines(toolkit().args(["v5", "Dns", "example.com"]));

    assert_eq!(lower, mixed);
}

#[test]
fn test_literal_namespace_uuid() {
    toolkit()
        .args(["v5", DNS_V1, "example.com"])
        .assert()
        .success()
        .stdout("cfbff0d1-9375-5685-968c-48ce8b15ae17\n");
}

#[test]
fn test_v3_count_repeats_value() {
    let lines = stdout_lines(toolkit().args(["v3", "DNS", "example.com", "-n", "5"]));

    assert_eq!(lines, vec!["9073926b-929f-31c2-abc9-fad77ae3e8eb".to_string(); 5]);
}

#[test]
fn test_v1_batch_is_distinct() {
    let lines = stdout_lines(toolkit().args(["v1", "-n", "500"]));
    let distinct: HashSet<&String> = lines.iter().collect();

    assert_eq!(distinct.len(), 500);
    assert!(lines.iter().all(|l| &l[14..15] == "1"));
}

#[test]
fn test_upper_flag() {
    toolkit()
        .args(["v5", "example.com", "--upper"])
        .assert()
        .success()
        .stdout("CFBFF0D1-9375-5685-968C-48CE8B15AE17\n");
}

#[test]
fn test_upper_wins_over_lower() {
    toolkit()
        .args(["v5", "example.com", "--lower", "--upper"])
        .assert()
        .success()
        .stdout("CFBFF0D1-9375-5685-968C-48CE8B15AE17\n");
}

#[test]
fn test_json_format() {
    toolkit()
        .args(["v3", "example.com", "-n", "2", "-f", "json"])
        .assert()
        .success()
        .stdout(
            "[\n  \"9073926b-929f-31c2-abc9-fad77ae3e8eb\",\n  \"9073926b-929f-31c2-abc9-fad77ae3e8eb\"\n]\n",
        );
}

#[test]
fn test_format_env_default() {
    toolkit()
        .env("UUID_TOOLKIT_FORMAT", "json")
        .args(["v5", "example.com"])
        .assert()
        .success()
        .stdout("[\n  \"cfbff0d1-9375-5685-968c-48ce8b15ae17\"\n]\n");
}

#[test]
fn test_invalid_format_env_is_user_error() {
    toolkit()
        .env("UUID_TOOLKIT_FORMAT", "yaml")
        .arg("v4")
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error: Unsupported format: yaml"));
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.txt");

    toolkit()
        .args(["v5", "example.com", "-n", "3", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "cfbff0d1-9375-5685-968c-48ce8b15ae17\n".repeat(3)
    );
}

#[test]
fn test_invalid_format_env_does_not_affect_validate() {
    toolkit()
        .env("UUID_TOOLKIT_FORMAT", "yaml")
        .args(["validate", DNS_V1])
        .assert()
        .success()
        .stdout("VALID UUID (version 1)\n");
}

#[cfg(unix)]
#[test]
fn test_unwritable_output_file_is_left_untouched() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keep.txt");
    std::fs::write(&path, "precious data\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();

    // Root ignores file modes, so only check the outcome when opening really fails
    if std::fs::OpenOptions::new().write(true).open(&path).is_ok() {
        return;
    }

    toolkit()
        .args(["v4", "-o"])
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Internal error:"));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "precious data\n");
}

#[test]
fn test_output_file_in_missing_directory_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("ids.txt");

    toolkit()
        .args(["v4", "-o"])
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Internal error:"));
}

#[test]
fn test_zero_and_negative_count_rejected() {
    for count in ["0", "-1"] {
        toolkit()
            .args(["v4", "-n", count])
            .assert()
            .code(2)
            .stdout("")
            .stderr(predicate::str::contains("count must be >= 1"));
    }
}

#[test]
fn test_unknown_namespace_rejected() {
    toolkit()
        .args(["v5", "ISBN", "example.com"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("'ISBN'"));
}

#[test]
fn test_missing_name_rejected() {
    toolkit().arg("v5").assert().code(2).stdout("");
}

#[test]
fn test_unsupported_format_rejected() {
    toolkit().args(["v4", "-f", "csv"]).assert().code(2);
}

#[test]
fn test_validate_invalid() {
    toolkit()
        .args(["validate", "not-a-uuid"])
        .assert()
        .code(1)
        .stdout("INVALID UUID\n");
}

#[test]
fn test_validate_valid() {
    toolkit()
        .args(["validate", DNS_V1])
        .assert()
        .success()
        .stdout("VALID UUID (version 1)\n");
}

#[test]
fn test_validate_version_matches() {
    toolkit()
        .args(["validate", DNS_V1, "--version", "1"])
        .assert()
        .success()
        .stdout("VALID UUID and version matches 1\n");
}

#[test]
fn test_validate_version_mismatch() {
    toolkit()
        .args(["validate", DNS_V1, "-v", "4"])
        .assert()
        .code(1)
        .stdout("VALID UUID but version 1 does not match 4\n");
}

#[test]
fn test_validate_quiet() {
    toolkit()
        .args(["validate", DNS_V1, "--quiet"])
        .assert()
        .success()
        .stdout("");
    toolkit()
        .args(["validate", "not-a-uuid", "--quiet"])
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn test_validate_unsupported_expected_version() {
    toolkit()
        .args(["validate", DNS_V1, "--version", "7"])
        .assert()
        .code(2);
}

#[test]
fn test_generated_values_validate() {
    for scheme in ["v1", "v4"] {
        let lines = stdout_lines(toolkit().arg(scheme));
        let version = &scheme[1..];

        toolkit()
            .args(["validate", &lines[0], "--version", version])
            .assert()
            .success();
    }
}
