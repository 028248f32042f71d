//! End-to-end tests for the mediasync binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn mediasync() -> Command {
    Command::cargo_bin("mediasync").unwrap()
}

/// An empty config file, so tests never read the user's real config.
fn empty_config() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"request_timeout_secs = 2\n").unwrap();
    file
}

// ===========================================
// Offline Commands
// ===========================================

#[test]
fn check_path_accepts_windows_drive_path() {
    mediasync()
        .args(["check-path", "C:\\Users\\me\\Videos"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("valid:"));
}

#[test]
fn check_path_strips_quotes() {
    mediasync()
        .args(["check-path", "\"/home/me/Music\""])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid: /home/me/Music"));
}

#[test]
fn check_path_rejects_selection_text() {
    mediasync()
        .args(["check-path", "3 media files selected"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("rejected:"));
}

#[test]
fn classify_prints_kind_and_mime() {
    mediasync()
        .args(["classify", "holiday.MP4", "notes.txt", "cover.svg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("video/mp4"))
        .stdout(predicate::str::contains("image/svg+xml"))
        .stdout(predicate::str::contains("application/octet-stream"));
}

#[test]
fn classify_requires_a_file() {
    mediasync().arg("classify").assert().failure();
}

// ===========================================
// Session Commands
// ===========================================

#[test]
fn host_rejects_bad_port_before_contacting_backend() {
    let config = empty_config();
    mediasync()
        .arg("--config")
        .arg(config.path())
        .args(["--endpoint", "http://127.0.0.1:9/api"])
        .args(["host", "--port", "http", "--dir", "/srv/media"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid port number: http"));
}

#[test]
fn host_rejects_display_text_as_directory() {
    let config = empty_config();
    mediasync()
        .arg("--config")
        .arg(config.path())
        .args(["host", "--port", "8080", "--dir", "2 media files selected"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not look like a directory path"));
}

#[test]
fn peer_reports_unreachable_backend() {
    let config = empty_config();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/api", listener.local_addr().unwrap());
    drop(listener);

    mediasync()
        .arg("--config")
        .arg(config.path())
        .args(["--endpoint", &endpoint])
        .args(["peer", "--address", "127.0.0.1:8080", "--id", "client1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect"));
}

#[test]
fn invalid_endpoint_flag_fails() {
    let config = empty_config();
    mediasync()
        .arg("--config")
        .arg(config.path())
        .args(["--endpoint", "localhost:3000", "stop"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --endpoint"));
}
