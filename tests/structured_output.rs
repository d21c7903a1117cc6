//! Schema-constrained response tests against stub HTTP servers.

use modelbox::{Error, LlmClient, Provider, ProviderKeys, ResponseOptions};

fn client_for(provider: Provider, key: &str, base_url: &str) -> LlmClient {
    let mut keys = ProviderKeys::default();
    keys.set(provider, key);
    LlmClient::new(keys).with_base_url(provider, base_url)
}

fn dish_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "dish": {"type": "string"},
            "pieces": {"type": "integer"},
        },
        "required": ["dish", "pieces"],
    })
}

#[test]
fn structured_request_embeds_schema_and_parses_fenced_reply() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(mockito::Matcher::Regex(
            "valid JSON object matching this schema".to_string(),
        ))
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "choices": [{"message": {"content":
                    "Here you go:\n```json\n{\"dish\": \"har gow\", \"pieces\": 4}\n```",
                }}],
            })
            .to_string(),
        )
        .create();

    let client = client_for(Provider::Together, "together-key", &server.url());
    let value = client
        .get_structured_response(
            "DeepSeek-V3.1",
            "Pick a dim sum dish.",
            &dish_schema(),
            &ResponseOptions::new(),
        )
        .unwrap();

    assert_eq!(value["dish"], "har gow");
    assert_eq!(value["pieces"], 4);
    mock.assert();
}

#[test]
fn schema_violations_surface_as_provider_errors() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/chat/completions")
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "choices": [{"message": {"content": r#"{"dish": "har gow"}"#}}],
            })
            .to_string(),
        )
        .create();

    let client = client_for(Provider::Mistral, "mistral-key", &server.url());
    let err = client
        .get_structured_response(
            "mistral-large-2411",
            "Pick a dim sum dish.",
            &dish_schema(),
            &ResponseOptions::new(),
        )
        .unwrap_err();

    match err {
        Error::Provider {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, Provider::Mistral);
            assert_eq!(status, None);
            assert!(message.contains("schema"));
        }
        other => panic!("expected Provider error, got {other}"),
    }
}

#[test]
fn non_json_reply_is_a_provider_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1/chat/completions")
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "choices": [{"message": {"content": "I would rather describe it in prose."}}],
            })
            .to_string(),
        )
        .create();

    let client = client_for(Provider::Together, "together-key", &server.url());
    let err = client
        .get_structured_response(
            "DeepSeek-V3.1",
            "Pick a dim sum dish.",
            &dish_schema(),
            &ResponseOptions::new(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Provider { status: None, .. }));
}
