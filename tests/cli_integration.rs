use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

/// Runs the binary with an empty temporary HOME so no real config or token leaks in
fn run_ytstats(home: &Path, args: &[&str]) -> (bool, String, String) {
    let bin = std::env::var("CARGO_BIN_EXE_ytstats").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("ytstats.exe");
        } else {
            path.push("ytstats");
        }
        path.to_string_lossy().into_owned()
    });
    let output = Command::new(bin)
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("run ytstats");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

fn home() -> TempDir {
    tempfile::tempdir().expect("temp home")
}

#[test]
fn url_channel_lists_report_parameters() {
    let home = home();
    let (ok, stdout, stderr) = run_ytstats(
        home.path(),
        &[
            "url",
            "channel",
            "--start-date",
            "2026-10-05",
            "--end-date",
            "2026-10-11",
        ],
    );
    assert!(ok, "stderr: {stderr}");

    let url = stdout.trim();
    assert!(url.starts_with("https://youtubeanalytics.googleapis.com/v2/reports?dimensions=day&"));
    assert!(url.contains("endDate=2026-10-11"));
    assert!(url.contains("ids=channel%3D%3DMINE"));
    assert!(url.contains("maxResults=10&"));
    assert!(url.contains(
        "metrics=views%2Ccomments%2Clikes%2Cdislikes%2CestimatedMinutesWatched%2CsubscribersGained%2CsubscribersLost"
    ));
    assert!(url.contains("startDate=2026-10-05"));
    assert!(url.contains("access_token=ACCESS_TOKEN"));
    assert!(url.ends_with("startIndex=1"));
}

#[test]
fn url_video_sorts_by_watch_time_unless_told_otherwise() {
    let home = home();
    let (ok, stdout, _) = run_ytstats(home.path(), &["url", "video"]);
    assert!(ok);
    assert!(stdout.contains("dimensions=video"));
    assert!(stdout.contains("sort=-estimatedMinutesWatched"));

    let (ok, stdout, _) = run_ytstats(home.path(), &["url", "video", "--sort", "-likes"]);
    assert!(ok);
    assert!(stdout.contains("sort=-likes"));
}

#[test]
fn url_defaults_to_a_monday_to_sunday_week() {
    let home = home();
    let (ok, stdout, stderr) = run_ytstats(home.path(), &["--timezone", "UTC", "url", "channel"]);
    assert!(ok, "stderr: {stderr}");

    let param = |name: &str| -> String {
        let prefix = format!("{name}=");
        stdout
            .trim()
            .split(['?', '&'])
            .find_map(|pair| pair.strip_prefix(prefix.as_str()))
            .expect("parameter present")
            .to_string()
    };
    let start = chrono::NaiveDate::parse_from_str(&param("startDate"), "%Y-%m-%d").unwrap();
    let end = chrono::NaiveDate::parse_from_str(&param("endDate"), "%Y-%m-%d").unwrap();
    use chrono::Datelike;
    assert_eq!(start.weekday(), chrono::Weekday::Mon);
    assert_eq!((end - start).num_days(), 6);
}

#[test]
fn url_uses_stored_token() {
    let home = home();
    write_file(
        &home.path().join(".cache").join("ytstats").join("token.json"),
        r#"{"access_token":"ya29.stored"}"#,
    );
    let (ok, stdout, stderr) = run_ytstats(home.path(), &["url", "channel"]);
    assert!(ok, "stderr: {stderr}");
    assert!(stdout.contains("access_token=ya29.stored"));
}

#[test]
fn explicit_config_sets_channel() {
    let home = home();
    let config = home.path().join("custom.toml");
    write_file(&config, "channel_id = \"UCabc123\"\n");

    let config = config.to_string_lossy().into_owned();
    let (ok, stdout, stderr) = run_ytstats(home.path(), &["--config", &config, "url", "video"]);
    assert!(ok, "stderr: {stderr}");
    assert!(stdout.contains("ids=channel%3D%3DUCabc123"));

    // flags still win
    let (ok, stdout, _) = run_ytstats(
        home.path(),
        &["--config", &config, "--channel-id", "UCflag", "url", "video"],
    );
    assert!(ok);
    assert!(stdout.contains("ids=channel%3D%3DUCflag"));
}

#[test]
fn config_is_discovered_in_home() {
    let home = home();
    write_file(
        &home.path().join(".config").join("ytstats").join("config.toml"),
        "channel_id = \"UCfound\"\n",
    );
    let (ok, stdout, _) = run_ytstats(home.path(), &["url", "channel"]);
    assert!(ok);
    assert!(stdout.contains("ids=channel%3D%3DUCfound"));
}

#[test]
fn missing_explicit_config_fails() {
    let home = home();
    let (ok, _, stderr) = run_ytstats(home.path(), &["--config", "/nonexistent/ytstats.toml", "url", "channel"]);
    assert!(!ok);
    assert!(stderr.contains("Failed to load config"), "stderr: {stderr}");
}

#[test]
fn invalid_sort_is_rejected() {
    let home = home();
    let (ok, stdout, stderr) = run_ytstats(home.path(), &["video", "--sort", "comments"]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid sort \"comments\""), "stderr: {stderr}");
}

#[test]
fn invalid_date_is_rejected() {
    let home = home();
    let (ok, _, stderr) = run_ytstats(
        home.path(),
        &["channel", "--start-date", "2026-02-30", "--end-date", "2026-03-06"],
    );
    assert!(!ok);
    assert!(stderr.contains("Invalid date \"2026-02-30\""), "stderr: {stderr}");
}

#[test]
fn invalid_timezone_is_rejected() {
    let home = home();
    let (ok, _, stderr) = run_ytstats(home.path(), &["--timezone", "Mars/Olympus", "url", "channel"]);
    assert!(!ok);
    assert!(stderr.contains("Invalid timezone: Mars/Olympus"));
}

#[test]
fn token_requires_client_id() {
    let home = home();
    let (ok, _, stderr) = run_ytstats(home.path(), &["token"]);
    assert!(!ok);
    assert!(stderr.contains("Missing client_id"), "stderr: {stderr}");
}

#[test]
fn token_reports_missing_key_file() {
    let home = home();
    let missing = home.path().join("absent.p12");
    let missing = missing.to_string_lossy().into_owned();
    let (ok, _, stderr) = run_ytstats(
        home.path(),
        &["--client-id", "svc@example.iam.gserviceaccount.com", "--key-file", &missing, "token"],
    );
    assert!(!ok);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
    assert!(stderr.contains("absent.p12"));
}

#[cfg(feature = "signing")]
#[test]
fn token_rejects_bundle_without_key() {
    let home = home();
    let cert_only = fixture("cert-only.p12").to_string_lossy().into_owned();
    let (ok, _, stderr) = run_ytstats(
        home.path(),
        &["--client-id", "svc@example.iam.gserviceaccount.com", "--key-file", &cert_only, "token"],
    );
    assert!(!ok);
    assert!(stderr.contains("contains no private key"), "stderr: {stderr}");
}

#[cfg(feature = "signing")]
#[test]
fn token_rejects_non_pkcs12_file() {
    let home = home();
    let bogus = fixture("service-account.pub.pem").to_string_lossy().into_owned();
    let (ok, _, stderr) = run_ytstats(
        home.path(),
        &["--client-id", "svc@example.iam.gserviceaccount.com", "--key-file", &bogus, "token"],
    );
    assert!(!ok);
    assert!(stderr.contains("Failed to parse the PKCS #12 credential"), "stderr: {stderr}");
}

#[test]
fn unknown_report_kind_is_a_usage_error() {
    let home = home();
    let (ok, _, stderr) = run_ytstats(home.path(), &["url", "playlist"]);
    assert!(!ok);
    assert!(stderr.contains("playlist"));
}
