//! Credential configuration scenarios, including the Secret Manager path
//! against a stub server.

use modelbox::{Error, Provider, ProviderKeys, SecretManagerClient};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

#[test]
fn secret_manager_flag_loads_all_six_providers() {
    let mut server = mockito::Server::new();
    for provider in Provider::ALL {
        server
            .mock(
                "GET",
                format!(
                    "/projects/test-project/secrets/{}/versions/latest:access",
                    provider.secret_name()
                )
                .as_str(),
            )
            .with_body(
                serde_json::json!({
                    "payload": {"data": BASE64.encode(format!("key-{}", provider.name()))},
                })
                .to_string(),
            )
            .create();
    }

    let store = SecretManagerClient::new("test-project")
        .with_base_url(server.url())
        .with_access_token("stub-token");
    let keys = ProviderKeys::builder()
        .from_secret_manager()
        .build_with(&store)
        .unwrap();

    for provider in Provider::ALL {
        let expected = format!("key-{}", provider.name());
        assert_eq!(keys.key_for(provider), Some(expected.as_str()));
    }
}

#[test]
fn missing_secret_fails_configuration() {
    let mut server = mockito::Server::new();
    // Only one secret exists; the first missing one fails the whole build.
    server
        .mock(
            "GET",
            mockito::Matcher::Regex("/versions/latest:access$".to_string()),
        )
        .with_status(404)
        .with_body(r#"{"error":{"message":"Secret not found"}}"#)
        .create();

    let store = SecretManagerClient::new("test-project")
        .with_base_url(server.url())
        .with_access_token("stub-token");
    let err = ProviderKeys::builder()
        .from_secret_manager()
        .build_with(&store)
        .unwrap_err();

    assert!(matches!(err, Error::Configuration(ref m) if m.contains("API_KEY_")));
}

#[test]
fn explicit_and_secret_manager_are_mutually_exclusive() {
    let store = SecretManagerClient::new("unused-project");
    let err = ProviderKeys::builder()
        .openai("sk-explicit")
        .from_secret_manager()
        .build_with(&store)
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn explicit_configuration_is_additive_and_last_write_wins() {
    let mut keys = ProviderKeys::builder()
        .openai("sk-one")
        .xai("xai-one")
        .build()
        .unwrap();

    keys.set(Provider::Together, "together-late");
    keys.set(Provider::OpenAi, "sk-two");

    assert_eq!(keys.key_for(Provider::OpenAi), Some("sk-two"));
    assert_eq!(keys.key_for(Provider::Xai), Some("xai-one"));
    assert_eq!(keys.key_for(Provider::Together), Some("together-late"));
    assert_eq!(keys.configured().count(), 3);
}
