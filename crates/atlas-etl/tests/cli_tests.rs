//! CLI tests for the atlas-etl binary

use assert_cmd::Command;
use atlas_etl::countries::models::RawCountry;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn help_lists_the_jobs() {
    let mut cmd = Command::cargo_bin("atlas-etl").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("load"))
        .stdout(predicate::str::contains("run"));
}

#[tokio::test]
async fn extract_skip_upload_writes_a_parquet_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": {"common": "Iceland", "official": "Iceland"},
                "currencies": {"ISK": {"name": "Icelandic króna", "symbol": "kr"}},
                "capital": ["Reykjavik"],
                "continents": ["Europe"],
                "area": 103000.0,
                "population": 366425
            }
        ])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("raw_data.parquet");

    let assert = tokio::task::spawn_blocking({
        let output = output.clone();
        let url = format!("{}/v3.1/all", server.uri());
        move || {
            let mut cmd = Command::cargo_bin("atlas-etl").unwrap();
            cmd.env("ATLAS_SOURCE_URL", url)
                .arg("extract")
                .arg("--skip-upload")
                .arg("--output")
                .arg(&output)
                .assert()
        }
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Extract complete: 1 records"));

    let bytes = std::fs::read(&output).unwrap();
    let rows: Vec<RawCountry> = atlas_etl::parquet::decode(bytes).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].common_name(), Some("Iceland"));
}

#[tokio::test]
async fn extract_fails_on_source_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("raw_data.parquet");

    let assert = tokio::task::spawn_blocking({
        let url = format!("{}/v3.1/all", server.uri());
        move || {
            let mut cmd = Command::cargo_bin("atlas-etl").unwrap();
            cmd.env("ATLAS_SOURCE_URL", url)
                .arg("extract")
                .arg("--skip-upload")
                .arg("--output")
                .arg(&output)
                .assert()
        }
    })
    .await
    .unwrap();

    assert
        .failure()
        .stderr(predicate::str::contains("Unexpected status 500"));
}
