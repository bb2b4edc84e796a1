use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn coindash() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("coindash"));
    for var in [
        "COINDASH_CONFIG",
        "COINDASH_FORMAT",
        "COINDASH_API_URL",
        "COINDASH_API_KEY",
        "COINDASH_DEBUG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_config(dir: &Path, base_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = format!(
        "provider:\n  base_url: {base_url}\n  api_key: test-key\n  timeout_secs: 5\ncache:\n  history_ttl_secs: 900\n"
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

#[test]
fn version_prints_package_version() {
    coindash()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "https://provider.example/api/v3");

    let assert = coindash()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("https://provider.example/api/v3"));
    assert!(stdout.contains("API key configured"));
    assert!(stdout.contains("900s"));

    Ok(())
}

#[test]
fn status_reports_invalid_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "not-a-url");

    coindash()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url"));

    Ok(())
}

#[test]
fn missing_explicit_config_fails() {
    coindash()
        .arg("global")
        .arg("--config")
        .arg("/nonexistent/coindash/config.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn init_writes_config_once() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("nested").join("config.yaml");

    coindash()
        .arg("init")
        .arg("--config")
        .arg(&config_path)
        .arg("--api-key")
        .arg("demo-key")
        .assert()
        .success();

    let written = fs::read_to_string(&config_path)?;
    assert!(written.contains("demo-key"));
    assert!(written.contains("base_url"));

    coindash()
        .arg("init")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    coindash()
        .arg("init")
        .arg("--force")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    Ok(())
}

#[test]
fn coin_rejects_invalid_id_before_fetching() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    // Nothing listens here; the id must be rejected first
    let config_path = write_config(temp.path(), "http://127.0.0.1:9");

    coindash()
        .arg("coin")
        .arg("../global")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid coin id"));

    Ok(())
}

#[test]
fn history_rejects_bad_days() {
    coindash()
        .args(["history", "bitcoin", "--days", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("days must be"));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn global_json_from_provider() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _global = server
        .mock("GET", "/global")
        .match_header("x-cg-demo-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "data": {
                    "active_cryptocurrencies": 13500,
                    "total_market_cap": { "usd": 2.4e12 },
                    "market_cap_percentage": { "btc": 52.1 }
                }
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "https://unused.example");

    let assert = coindash()
        .arg("global")
        .arg("--format")
        .arg("json")
        .arg("--config")
        .arg(&config_path)
        .arg("--api-url")
        .arg(server.url())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(parsed["data"]["active_cryptocurrencies"], 13500);
    assert!(parsed["meta"]["version"].is_string());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn cold_provider_error_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _chart = server
        .mock("GET", "/coins/bitcoin/market_chart")
        .match_query(mockito::Matcher::Any)
        .with_status(429)
        .with_header("retry-after", "30")
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    coindash()
        .args(["history", "bitcoin", "--days", "1"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rate limit exceeded"));

    Ok(())
}
