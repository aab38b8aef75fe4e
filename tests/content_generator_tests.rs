use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use acegre_backend::services::catalog::{gre_words, WordRecord};
use acegre_backend::services::fallback_content::generate_fallback_content;
use acegre_backend::services::llm_provider::{ProviderConfig, ProviderKind, SYSTEM_INSTRUCTION};
use acegre_backend::services::word_content::ContentGenerator;

mod common;

use common::{closed_port, spawn_server};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Option<(HeaderMap, Value)>>>);

impl Captured {
    fn take(&self) -> (HeaderMap, Value) {
        self.0.lock().take().expect("provider was called")
    }
}

fn record(word: &str) -> WordRecord {
    gre_words()
        .into_iter()
        .find(|w| w.word == word)
        .expect("catalog word")
}

fn openai_config(addr: SocketAddr) -> ProviderConfig {
    ProviderConfig {
        provider: ProviderKind::OpenAi,
        model_name: "gpt-test".to_string(),
        api_key: Some("sk-test".to_string()),
        endpoint: format!("http://{addr}/v1"),
    }
}

fn zhipu_config(addr: SocketAddr, api_key: Option<&str>) -> ProviderConfig {
    ProviderConfig {
        provider: ProviderKind::Zhipu,
        model_name: String::new(),
        api_key: api_key.map(str::to_string),
        endpoint: format!("http://{addr}/invoke"),
    }
}

/// OpenAI-style server answering every completion with `content`.
async fn openai_server(content: &'static str, captured: Captured) -> SocketAddr {
    async fn handler(
        State((content, captured)): State<(&'static str, Captured)>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        *captured.0.lock() = Some((headers, body));
        Json(json!({"choices": [{"message": {"role": "assistant", "content": content}}]}))
    }

    let app = Router::new()
        .route("/v1/chat/completions", post(handler))
        .with_state((content, captured));
    spawn_server(app).await
}

/// Zhipu-style server answering with a fixed status and JSON body.
async fn zhipu_server(status: StatusCode, body: Value) -> SocketAddr {
    let app = Router::new().route(
        "/invoke",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)).into_response() }
        }),
    );
    spawn_server(app).await
}

#[tokio::test]
async fn test_openai_json_overrides_only_present_fields() {
    let addr = openai_server(r#"{"memory_story": "X"}"#, Captured::default()).await;
    let generator = ContentGenerator::new(&openai_config(addr));
    assert_eq!(generator.provider_name(), "openai");

    let original = record("castigate");
    let enhanced = generator.generate("castigate", &original).await;

    assert_eq!(enhanced.memory_story, "X");
    assert_eq!(enhanced.memory_phonetic, original.memory_phonetic);
    assert_eq!(enhanced.memory_visual, original.memory_visual);
    assert_eq!(enhanced.etymology, original.etymology);
    assert_eq!(enhanced.synonyms, original.synonyms);
}

#[tokio::test]
async fn test_openai_request_shape() {
    let captured = Captured::default();
    let addr = openai_server("{}", captured.clone()).await;
    let generator = ContentGenerator::new(&openai_config(addr));

    let original = record("laconic");
    let enhanced = generator.generate("laconic", &original).await;
    assert_eq!(enhanced, original);

    let (headers, body) = captured.take();
    assert_eq!(
        headers.get(header::AUTHORIZATION).unwrap(),
        "Bearer sk-test"
    );
    assert_eq!(body["model"], "gpt-test");
    assert_eq!(body["max_tokens"], 1500);
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], SYSTEM_INSTRUCTION);
    assert_eq!(messages[1]["role"], "user");
    assert!(messages[1]["content"].as_str().unwrap().contains("\"laconic\""));
}

#[tokio::test]
async fn test_openai_full_json_replaces_quiz_fields() {
    let content = r#"{
        "etymology_parts": [{"part": "lac", "meaning": "Sparta"}],
        "etymology_explanation": "new explanation",
        "synonym_options": ["a", "b", "c", "d", "e", "f"],
        "correct_synonyms": [2, 5],
        "definition_options": ["w", "x", "y", "z"],
        "correct_definition_index": 3
    }"#;
    let addr = openai_server(content, Captured::default()).await;
    let generator = ContentGenerator::new(&openai_config(addr));

    let original = record("laconic");
    let enhanced = generator.generate("laconic", &original).await;

    assert_eq!(enhanced.etymology.parts[0].part, "lac");
    assert_eq!(enhanced.etymology.explanation, "new explanation");
    assert_eq!(enhanced.synonym_options[5], "f");
    assert_eq!(enhanced.synonyms, vec![2, 5]);
    assert_eq!(enhanced.correct_definition, 3);
    assert_eq!(enhanced.memory_story, original.memory_story);
}

#[tokio::test]
async fn test_openai_server_error_uses_fallback() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let addr = spawn_server(app).await;
    let generator = ContentGenerator::new(&openai_config(addr));

    let original = record("ameliorate");
    let enhanced = generator.generate("ameliorate", &original).await;
    assert_eq!(enhanced, generate_fallback_content("ameliorate", &original));
}

#[tokio::test]
async fn test_openai_empty_content_keeps_record() {
    let addr = openai_server("", Captured::default()).await;
    let generator = ContentGenerator::new(&openai_config(addr));

    let original = record("ephemeral");
    assert_eq!(generator.generate("ephemeral", &original).await, original);
}

#[tokio::test]
async fn test_openai_unreachable_uses_fallback() {
    let generator = ContentGenerator::new(&openai_config(closed_port().await));

    let original = record("abstruse");
    let enhanced = generator.generate("abstruse", &original).await;
    assert_eq!(enhanced, generate_fallback_content("abstruse", &original));
}

#[tokio::test]
async fn test_zhipu_free_text_sections() {
    let text = "词根词缀分析：\nlac- 来自斯巴达\n联想记忆法：\n第一行\n斯巴达人说话很少\n\n谐音记忆法：\n'来控你'\n视觉记忆法：\n一个只说一个字的斯巴达战士";
    let addr = zhipu_server(
        StatusCode::OK,
        json!({"code": 200, "data": {"choices": [{"role": "assistant", "content": text}]}}),
    )
    .await;
    let generator = ContentGenerator::new(&zhipu_config(addr, Some("zp-key")));

    let original = record("laconic");
    let enhanced = generator.generate("laconic", &original).await;

    assert_eq!(enhanced.memory_story, "斯巴达人说话很少");
    assert_eq!(enhanced.memory_phonetic, "'来控你'");
    assert_eq!(enhanced.memory_visual, "一个只说一个字的斯巴达战士");
    assert_eq!(enhanced.etymology, original.etymology);
}

#[tokio::test]
async fn test_zhipu_non_200_uses_fallback() {
    let addr = zhipu_server(StatusCode::TOO_MANY_REQUESTS, json!({"msg": "slow down"})).await;
    let generator = ContentGenerator::new(&zhipu_config(addr, Some("zp-key")));

    let original = record("gregarious");
    let enhanced = generator.generate("gregarious", &original).await;
    assert_eq!(enhanced, generate_fallback_content("gregarious", &original));
}

#[tokio::test]
async fn test_zhipu_broken_json_keeps_record() {
    let addr = zhipu_server(
        StatusCode::OK,
        json!({"data": {"choices": [{"content": "{oops"}]}}),
    )
    .await;
    let generator = ContentGenerator::new(&zhipu_config(addr, Some("zp-key")));

    let original = record("castigate");
    assert_eq!(generator.generate("castigate", &original).await, original);
}

#[tokio::test]
async fn test_zhipu_empty_choices_uses_fallback() {
    let addr = zhipu_server(StatusCode::OK, json!({"data": {"choices": []}})).await;
    let generator = ContentGenerator::new(&zhipu_config(addr, Some("zp-key")));

    let original = record("laconic");
    let enhanced = generator.generate("laconic", &original).await;
    assert_eq!(enhanced, generate_fallback_content("laconic", &original));
}

#[tokio::test]
async fn test_zhipu_without_key_uses_fallback() {
    let addr = zhipu_server(StatusCode::OK, json!({})).await;
    let generator = ContentGenerator::new(&zhipu_config(addr, None));

    let original = record("abstruse");
    let enhanced = generator.generate("abstruse", &original).await;
    assert_eq!(enhanced, generate_fallback_content("abstruse", &original));
}

#[tokio::test]
async fn test_enhance_route_with_openai_provider() {
    use axum::http::Method;
    use common::{create_test_app_with, json_request, login_as, send};

    let addr = openai_server(r#"{"memory_visual": "mock visual"}"#, Captured::default()).await;
    let app = create_test_app_with(openai_config(addr));
    let token = login_as(&app.router, "mock@example.com").await;

    let (status, _, body) = send(
        &app.router,
        json_request(
            Method::POST,
            "/api/word/enhance",
            json!({"word": "laconic", "content_type": "memory"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["memory_visual"], "mock visual");
    assert_eq!(body["memory_story"], record("laconic").memory_story);
}
