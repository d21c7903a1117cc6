//! Cloud Storage and Secret Manager client tests against stub servers.

use modelbox::{Error, SecretManagerClient, SecretStore, StorageClient};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

fn storage(server: &mockito::ServerGuard) -> StorageClient {
    StorageClient::new("test-bucket")
        .with_base_url(server.url())
        .with_access_token("stub-token")
}

#[test]
fn upload_then_download_returns_identical_bytes() {
    let mut server = mockito::Server::new();
    let payload = b"model weights \x00\x01\x02 and other bytes".to_vec();

    let upload = server
        .mock("POST", "/b/test-bucket/o")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("uploadType".into(), "media".into()),
            mockito::Matcher::UrlEncoded("name".into(), "runs/weights.bin".into()),
        ]))
        .match_header("authorization", "Bearer stub-token")
        .with_body("{}")
        .create();
    let download = server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"^/b/test-bucket/o/runs(%2F|/)weights\.bin$".to_string()),
        )
        .match_query(mockito::Matcher::UrlEncoded("alt".into(), "media".into()))
        .with_body(payload.clone())
        .create();

    let tmp = tempfile::tempdir().unwrap();
    let local = tmp.path().join("weights.bin");
    std::fs::write(&local, &payload).unwrap();

    let client = storage(&server);
    client.upload_file(&local, "runs/weights.bin").unwrap();

    let fetched = tmp.path().join("fetched/weights.bin");
    client.download_file("runs/weights.bin", &fetched).unwrap();

    assert_eq!(std::fs::read(&fetched).unwrap(), payload);
    upload.assert();
    download.assert();
}

#[test]
fn list_files_follows_result_pages() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/b/test-bucket/o")
        .match_query(mockito::Matcher::Regex("^prefix=data(%2F|/)$".to_string()))
        .with_body(
            serde_json::json!({
                "items": [{"name": "data/a.csv"}, {"name": "data/b.csv"}],
                "nextPageToken": "page-2",
            })
            .to_string(),
        )
        .create();
    server
        .mock("GET", "/b/test-bucket/o")
        .match_query(mockito::Matcher::Regex("pageToken=page-2".to_string()))
        .with_body(serde_json::json!({"items": [{"name": "data/c.csv"}]}).to_string())
        .create();

    let names = storage(&server).list_files("data/").unwrap();
    assert_eq!(names, ["data/a.csv", "data/b.csv", "data/c.csv"]);
}

#[test]
fn download_of_missing_object_is_a_storage_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/b/test-bucket/o/missing.txt")
        .match_query(mockito::Matcher::Any)
        .with_status(404)
        .with_body(r#"{"error":{"message":"No such object"}}"#)
        .create();

    let tmp = tempfile::tempdir().unwrap();
    let err = storage(&server)
        .download_file("missing.txt", tmp.path().join("missing.txt"))
        .unwrap_err();
    assert!(matches!(err, Error::Storage { status: Some(404), .. }));
}

#[test]
fn last_modified_returns_none_for_missing_objects() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/b/test-bucket/o/present.txt")
        .with_body(
            serde_json::json!({
                "name": "present.txt",
                "updated": "2026-08-01T12:00:00Z",
            })
            .to_string(),
        )
        .create();
    server
        .mock("GET", "/b/test-bucket/o/absent.txt")
        .with_status(404)
        .create();

    let client = storage(&server);
    let updated = client.last_modified("present.txt").unwrap().unwrap();
    assert_eq!(updated.to_rfc3339(), "2026-08-01T12:00:00+00:00");
    assert_eq!(client.last_modified("absent.txt").unwrap(), None);
}

#[test]
fn secret_manager_decodes_base64_payloads() {
    let mut server = mockito::Server::new();
    server
        .mock(
            "GET",
            "/projects/test-project/secrets/API_KEY_OPENAI/versions/latest:access",
        )
        .match_header("authorization", "Bearer stub-token")
        .with_body(
            serde_json::json!({
                "payload": {"data": BASE64.encode("sk-super-secret")},
            })
            .to_string(),
        )
        .create();

    let client = SecretManagerClient::new("test-project")
        .with_base_url(server.url())
        .with_access_token("stub-token");
    assert_eq!(client.secret("API_KEY_OPENAI").unwrap(), "sk-super-secret");
}

#[test]
fn secret_if_exists_returns_none_on_missing_secret() {
    let mut server = mockito::Server::new();
    server
        .mock(
            "GET",
            "/projects/test-project/secrets/NOT_THERE/versions/latest:access",
        )
        .with_status(404)
        .create();

    let client = SecretManagerClient::new("test-project")
        .with_base_url(server.url())
        .with_access_token("stub-token");
    assert_eq!(client.secret_if_exists("NOT_THERE").unwrap(), None);
}
