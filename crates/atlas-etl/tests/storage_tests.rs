//! Object storage contract tests against a mock S3-compatible endpoint

use atlas_common::AtlasError;
use atlas_etl::storage::{Storage, StorageConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn storage_for(server: &MockServer) -> Storage {
    // Path-style addressing keeps object URLs under the mock server's host
    Storage::new(StorageConfig::for_minio(server.uri(), "test-bucket"))
        .await
        .unwrap()
}

#[tokio::test]
async fn upload_reports_key_checksum_and_size() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/test-bucket/raw_data.parquet"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let storage = storage_for(&server).await;
    let result = storage
        .upload("raw_data.parquet", b"hello".to_vec(), None)
        .await
        .unwrap();

    assert_eq!(result.key, "raw_data.parquet");
    assert_eq!(result.size, 5);
    assert_eq!(
        result.checksum,
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

#[tokio::test]
async fn download_returns_the_object_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-bucket/raw_data.parquet"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
        .mount(&server)
        .await;

    let storage = storage_for(&server).await;
    let bytes = storage.download("raw_data.parquet").await.unwrap();

    assert_eq!(bytes, b"payload");
}

#[tokio::test]
async fn missing_object_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-bucket/raw_data.parquet"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Error><Code>NoSuchKey</Code>\
             <Message>The specified key does not exist.</Message></Error>",
        ))
        .mount(&server)
        .await;

    let storage = storage_for(&server).await;
    let err = storage.download("raw_data.parquet").await.unwrap_err();

    match err {
        AtlasError::Storage(message) => {
            assert!(message.contains("raw_data.parquet"));
        },
        other => panic!("unexpected error: {other}"),
    }
}
