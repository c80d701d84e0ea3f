//! End-to-end tests driving the `keepsake` binary.
//!
//! Identity and secret come in through environment variables so no test
//! ever needs a TTY. Each test gets its own config and state file.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

use keepsake_core::guard::sha256_hex;

const IDENTITY: &str = "QSuser";
const SECRET: &str = "the-real-secret";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_keepsake"))
}

struct Fixture {
    _dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().expect("tempdir");
        let config = dir.path().join("config.toml");
        let store = dir.path().join("state.json");

        let output = Command::new(bin())
            .args(["init", "--identity", IDENTITY])
            .args(["--secret-digest", &sha256_hex(SECRET.as_bytes())])
            .arg("--store")
            .arg(&store)
            .arg("--config")
            .arg(&config)
            .output()
            .expect("run init");
        assert!(output.status.success(), "init failed: {:?}", output);

        Self { _dir: dir, config }
    }

    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.arg("--config").arg(&self.config).args(args);
        cmd
    }

    fn login(&self, identity: &str, secret: &str) -> Output {
        self.cmd(&["login"])
            .env("KEEPSAKE_USERNAME", identity)
            .env("KEEPSAKE_PASSWORD", secret)
            .output()
            .expect("run login")
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let fixture = Fixture::new();
    assert!(fixture.config.exists());

    let output = Command::new(bin())
        .args(["init", "--identity", IDENTITY])
        .args(["--secret-digest", &sha256_hex(SECRET.as_bytes())])
        .arg("--config")
        .arg(&fixture.config)
        .arg("--store")
        .arg(fixture.config.parent().unwrap().join("other.json"))
        .output()
        .expect("run init");
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn login_with_correct_pair_opens_session() {
    let fixture = Fixture::new();

    let output = fixture.login(IDENTITY, SECRET);
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("Welcome back"));

    let status = fixture.cmd(&["status"]).output().expect("run status");
    assert!(status.status.success());
    assert!(stdout(&status).contains("active"));
}

#[test]
fn wrong_secret_counts_down_then_locks() {
    let fixture = Fixture::new();

    let first = fixture.login(IDENTITY, "wrong");
    assert_eq!(first.status.code(), Some(5));
    assert!(stderr(&first).contains("2 attempt(s) remaining"));

    let second = fixture.login(IDENTITY, "wrong");
    assert_eq!(second.status.code(), Some(5));
    assert!(stderr(&second).contains("1 attempt(s) remaining"));

    let third = fixture.login(IDENTITY, "wrong");
    assert_eq!(third.status.code(), Some(6));
    assert!(stderr(&third).contains("Locked for 5:00"));

    // Even the correct pair is rejected while locked.
    let fourth = fixture.login(IDENTITY, SECRET);
    assert_eq!(fourth.status.code(), Some(6));
    assert!(stderr(&fourth).contains("Try again in"));

    let status = fixture.cmd(&["status"]).output().expect("run status");
    assert!(stdout(&status).contains("locked"));
}

#[test]
fn wrong_identity_is_reported_like_wrong_secret() {
    let fixture = Fixture::new();

    let output = fixture.login("someone-else", SECRET);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("Invalid identity or secret"));
}

#[test]
fn timeline_requires_a_session() {
    let fixture = Fixture::new();

    let gated = fixture.cmd(&["timeline"]).output().expect("run timeline");
    assert_eq!(gated.status.code(), Some(7));
    assert!(stderr(&gated).contains("No active session"));

    let login = fixture.login(IDENTITY, SECRET);
    assert!(login.status.success());

    let table = fixture.cmd(&["timeline"]).output().expect("run timeline");
    assert!(table.status.success());
    assert!(stdout(&table).contains("First meeting"));

    let json = fixture
        .cmd(&["timeline", "--json"])
        .output()
        .expect("run timeline");
    assert!(json.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&json)).expect("timeline --json emits JSON");
    assert_eq!(parsed.as_array().map(Vec::len), Some(6));
}

#[test]
fn logout_closes_the_session_but_not_the_counter() {
    let fixture = Fixture::new();

    // One failure on the books before a successful login.
    fixture.login(IDENTITY, "wrong");
    let login = fixture.login(IDENTITY, SECRET);
    assert!(login.status.success());

    let logout = fixture.cmd(&["logout"]).output().expect("run logout");
    assert!(logout.status.success());

    let gated = fixture.cmd(&["surprise"]).output().expect("run surprise");
    assert_eq!(gated.status.code(), Some(7));
}

#[test]
fn surprise_answers_special_and_ordinary_dates() {
    let fixture = Fixture::new();
    let login = fixture.login(IDENTITY, SECRET);
    assert!(login.status.success());

    let special = fixture
        .cmd(&["surprise", "2026-02-14"])
        .output()
        .expect("run surprise");
    assert!(special.status.success());
    assert!(stdout(&special).contains("Valentine"));

    let ordinary = fixture
        .cmd(&["surprise", "2026-03-03"])
        .output()
        .expect("run surprise");
    assert!(ordinary.status.success());
    assert!(stdout(&ordinary).contains("special day too"));

    let invalid = fixture
        .cmd(&["surprise", "not-a-date"])
        .output()
        .expect("run surprise");
    assert!(!invalid.status.success());
}

#[test]
fn state_file_is_shared_across_invocations() {
    let fixture = Fixture::new();

    fixture.login(IDENTITY, "wrong");
    fixture.login(IDENTITY, "wrong");

    // A separate process sees the persisted counter.
    let status = fixture.cmd(&["status"]).output().expect("run status");
    assert!(stdout(&status).contains("Failed attempts: 2/3"));
}
