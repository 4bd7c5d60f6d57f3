use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn billsync_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("billsync"));
    // Isolate from any real operator configuration.
    cmd.env_remove("NOTION_TOKEN")
        .env_remove("NOTION_DB_BILLS")
        .env_remove("NOTION_DB_ITEMS");
    cmd
}

fn with_dummy_config(cmd: &mut Command) -> &mut Command {
    cmd.env("NOTION_TOKEN", "secret_test")
        .env("NOTION_DB_BILLS", "bills-db")
        .env("NOTION_DB_ITEMS", "items-db")
}

fn write_schema(dir: &Path) {
    let schema = r#"{
        "type": "object",
        "required": ["bill", "items"],
        "properties": {
            "bill": {
                "type": "object",
                "required": ["bill_no", "bill_date", "customer", "status"]
            },
            "items": { "type": "array" }
        }
    }"#;
    std::fs::write(dir.join("schema.json"), schema).expect("write schema");
}

#[test]
fn no_arguments_is_a_usage_error() {
    billsync_cmd().assert().failure().stderr(contains("Usage"));
}

#[test]
fn missing_configuration_is_a_hard_startup_failure() {
    billsync_cmd()
        .arg("payload.json")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("NOTION_TOKEN"))
        .stderr(contains("NOTION_DB_BILLS"))
        .stderr(contains("NOTION_DB_ITEMS"));
}

#[test]
fn missing_schema_document_is_reported() {
    let tmp = TempDir::new().expect("tempdir");
    let payload = tmp.path().join("payload.json");
    std::fs::write(&payload, "{}").expect("write payload");

    let mut cmd = billsync_cmd();
    with_dummy_config(&mut cmd)
        .arg(&payload)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("schema.json"));
}

#[test]
fn schema_violation_fails_before_any_remote_work() {
    let tmp = TempDir::new().expect("tempdir");
    write_schema(tmp.path());
    let payload = tmp.path().join("payload.json");
    std::fs::write(&payload, r#"{ "bill": { "bill_no": "B-001" }, "items": [] }"#)
        .expect("write payload");

    // No server is reachable at any configured endpoint: reaching the store
    // would fail differently, so the schema message proves the gate ran first.
    let mut cmd = billsync_cmd();
    with_dummy_config(&mut cmd)
        .arg(&payload)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("schema validation failed"));
}

#[test]
fn malformed_payload_json_is_reported() {
    let tmp = TempDir::new().expect("tempdir");
    write_schema(tmp.path());
    let payload = tmp.path().join("payload.json");
    std::fs::write(&payload, "{ not json").expect("write payload");

    let mut cmd = billsync_cmd();
    with_dummy_config(&mut cmd)
        .arg(&payload)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("payload"));
}
