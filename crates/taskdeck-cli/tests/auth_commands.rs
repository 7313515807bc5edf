//! Integration tests for login, register, logout and status.

use std::fs;
use std::time::Duration;

use assert_cmd::cargo::cargo_bin_cmd;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn jwt_for(subject: &str) -> String {
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": subject }).to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
}

fn write_session(home: &std::path::Path, access_token: &str) {
    let session = json!({ "access_token": access_token, "refresh_token": "refresh" });
    fs::write(home.join("session.json"), session.to_string()).unwrap();
}

#[tokio::test]
async fn test_login_stores_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ana@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": jwt_for("42"),
            "refresh_token": "refresh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGIN", format!("{}/auth/login", server.uri()))
        .env("TASKDECK_PASSWORD", "secret")
        .args(["login", "--email", " ana@example.com "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as 42"))
        .stdout(predicate::str::contains("/dashboard"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(home.path().join("session.json")).unwrap())
            .unwrap();
    assert_eq!(saved["refresh_token"], "refresh");
    assert_eq!(saved["access_token"], jwt_for("42"));
}

#[tokio::test]
async fn test_login_rejection_reports_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGIN", format!("{}/auth/login", server.uri()))
        .args(["login", "--email", "ana@example.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn test_login_invalid_input_lists_fields() {
    let home = tempdir().unwrap();

    // Nothing listens here; validation must fail before any request.
    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGIN", "http://127.0.0.1:9/auth/login")
        .args(["login", "--email", "not-an-email", "--password", "ab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email: Invalid email"))
        .stderr(predicate::str::contains(
            "password: Password must have min 3 characters",
        ));
}

#[test]
fn test_login_unreachable_server_reports_fallback() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGIN", "http://127.0.0.1:9/auth/login")
        .args(["login", "--email", "ana@example.com", "--password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("An unexpected error occurred"));
}

#[tokio::test]
async fn test_register_success_points_to_login() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_REGISTER", format!("{}/auth/register", server.uri()))
        .args([
            "register",
            "--username",
            "ana",
            "--email",
            "ana@example.com",
            "--password",
            "secret",
            "--confirm-password",
            "secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created for ana"))
        .stdout(predicate::str::contains("→ /login"));
}

#[test]
fn test_register_mismatch_fails_locally() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_REGISTER", "http://127.0.0.1:9/auth/register")
        .args([
            "register",
            "--username",
            "ana",
            "--email",
            "ana@example.com",
            "--password",
            "secret",
            "--confirm-password",
            "secreT",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "confirm password: Passwords do not match",
        ));
}

#[tokio::test]
async fn test_logout_clears_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let token = jwt_for("42");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    write_session(home.path(), &token);

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGOUT", format!("{}/auth/logout", server.uri()))
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn test_logout_fault_still_clears_session() {
    let home = tempdir().unwrap();
    write_session(home.path(), &jwt_for("42"));

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGOUT", "http://127.0.0.1:9/auth/logout")
        .arg("logout")
        .assert()
        .success()
        .stderr(predicate::str::contains("An unexpected error occurred"))
        .stdout(predicate::str::contains("Logged out"));

    assert!(!home.path().join("session.json").exists());
}

#[test]
fn test_logout_when_not_logged_in() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGOUT", "http://127.0.0.1:9/auth/logout")
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_status_anonymous() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Login (/login)"))
        .stdout(predicate::str::contains("Sign up (/register)"))
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_status_with_session() {
    let home = tempdir().unwrap();
    write_session(home.path(), &jwt_for("42"));

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Home (/dashboard)"))
        .stdout(predicate::str::contains("Settings (/profile/42)"))
        .stdout(predicate::str::contains("Signed in as 42"));
}

#[test]
fn test_logout_removes_corrupt_session() {
    let home = tempdir().unwrap();
    let session_path = home.path().join("session.json");
    fs::write(&session_path, "{ not json").unwrap();

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGOUT", "http://127.0.0.1:9/auth/logout")
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!session_path.exists());
}

#[test]
fn test_status_ignores_corrupt_session() {
    let home = tempdir().unwrap();
    fs::write(home.path().join("session.json"), "{ not json").unwrap();

    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}

#[tokio::test]
async fn test_stalled_logout_has_already_removed_session() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    write_session(home.path(), &jwt_for("42"));

    // Killed while the request is still pending.
    cargo_bin_cmd!("taskdeck")
        .env("TASKDECK_HOME", home.path())
        .env("TASKDECK_API_LOGOUT", format!("{}/auth/logout", server.uri()))
        .arg("logout")
        .timeout(Duration::from_secs(2))
        .assert()
        .interrupted();

    assert!(!home.path().join("session.json").exists());
}
