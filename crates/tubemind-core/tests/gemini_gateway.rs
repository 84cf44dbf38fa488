use serde_json::{Value, json};
use tubemind_core::{
    Gateway, GatewayConfig, GatewayError, GeminiGateway, GenerateRequest, Schema, Source,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const MODEL: &str = "test-model";

fn gateway_for(server: &MockServer) -> GeminiGateway {
    GeminiGateway::new(
        GatewayConfig::default()
            .with_base_url(format!("{}/v1beta", server.uri()))
            .with_model(MODEL)
            .with_api_key("secret"),
    )
}

async fn mount_reply(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", "secret"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn sent_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests[0].body_json::<Value>().unwrap()
}

#[tokio::test]
async fn grounded_request_and_sources() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        200,
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "```json\n{\"summary\":\"s\"}\n```" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "title": "youtube.com", "uri": "https://vertexaisearch.example/1" } },
                        {},
                        { "web": { "title": "blog", "uri": "https://vertexaisearch.example/2" } }
                    ]
                }
            }]
        }),
    )
    .await;

    let response = gateway_for(&server)
        .generate(
            GenerateRequest::new("analyze this")
                .with_system_instruction("be grounded")
                .with_temperature(0.5)
                .with_search_grounding(),
        )
        .await
        .unwrap();

    assert_eq!(response.text, "```json\n{\"summary\":\"s\"}\n```");
    assert_eq!(
        response.sources,
        vec![
            Source {
                title: "youtube.com".into(),
                uri: "https://vertexaisearch.example/1".into()
            },
            Source {
                title: "blog".into(),
                uri: "https://vertexaisearch.example/2".into()
            },
        ]
    );

    let body = sent_body(&server).await;
    assert_eq!(
        body["contents"],
        json!([{ "role": "user", "parts": [{ "text": "analyze this" }] }])
    );
    assert_eq!(
        body["systemInstruction"],
        json!({ "parts": [{ "text": "be grounded" }] })
    );
    assert_eq!(body["tools"], json!([{ "googleSearch": {} }]));
    assert_eq!(body["generationConfig"], json!({ "temperature": 0.5 }));
}

#[tokio::test]
async fn schema_request_forces_json_mime_type() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        200,
        json!({ "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }] }),
    )
    .await;

    let schema = Schema::object([("title", Schema::string())]).all_required();
    gateway_for(&server)
        .generate(GenerateRequest::new("concept").with_schema(schema))
        .await
        .unwrap();

    let body = sent_body(&server).await;
    assert!(body.get("tools").is_none());
    assert!(body.get("systemInstruction").is_none());
    assert_eq!(
        body["generationConfig"],
        json!({
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": { "title": { "type": "STRING" } },
                "required": ["title"],
                "propertyOrdering": ["title"]
            }
        })
    );
}

#[tokio::test]
async fn no_candidates_is_empty_text() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        200,
        json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await;

    let response = gateway_for(&server)
        .generate(GenerateRequest::new("hello"))
        .await
        .unwrap();
    assert_eq!(response.text, "");
    assert!(response.sources.is_empty());
}

#[tokio::test]
async fn error_status_carries_api_message() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        403,
        json!({ "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" } }),
    )
    .await;

    let err = gateway_for(&server)
        .generate(GenerateRequest::new("hello"))
        .await
        .unwrap_err();
    match err {
        GatewayError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("unexpected error: {other}"),
    }
}
