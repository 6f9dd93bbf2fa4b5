//! Integration tests for the email processing API.
//!
//! Each test spins up the Axum server on a random port with a stub
//! completion gateway and exercises the real REST contract.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use mail_triage::context::AppContext;
use mail_triage::error::LlmError;
use mail_triage::llm::{CompletionGateway, CompletionRequest, CompletionResponse};
use mail_triage::server::{ApiState, api_routes};

/// Stub gateway that replays scripted completions (or failures) in
/// call order, then repeats the last entry.
struct ScriptedGateway {
    script: Mutex<Vec<Result<String, ()>>>,
}

impl ScriptedGateway {
    fn new(script: Vec<Result<String, ()>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script),
        })
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.remove(0)
        } else {
            script[0].clone()
        };
        match next {
            Ok(content) => Ok(CompletionResponse {
                content,
                input_tokens: 200,
                output_tokens: 120,
            }),
            Err(()) => Err(LlmError::RequestFailed {
                provider: "scripted".to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

/// Start the server on a random port and return its base URL.
async fn spawn_server(gateway: Arc<dyn CompletionGateway>) -> String {
    let context = AppContext::with_gateway(gateway).expect("context init");
    let app = api_routes(ApiState {
        classifier: context.classifier,
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}

fn greeting_completion() -> String {
    json!({
        "is_productive": false,
        "category": "greeting",
        "suggested_subject": "Re: Happy Holidays",
        "suggested_body": "Thank you so much for your kind wishes! We wish you and your family a wonderful holiday season.",
    })
    .to_string()
}

#[tokio::test]
async fn batch_round_trip_preserves_order_and_shape() {
    let gateway = ScriptedGateway::new(vec![
        Ok(greeting_completion()),
        // Second completion is garbage → server must degrade to the
        // fallback template, not fail.
        Ok("sorry, no JSON today".to_string()),
    ]);
    let base = spawn_server(gateway).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/process-email"))
        .json(&json!({
            "emails": [
                {"subject": "Happy Holidays", "body": "Merry Christmas!"},
                {"subject": "App broken", "body": "The app crashes on startup every time"},
            ]
        }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 200);
    let results: Vec<Value> = response.json().await.expect("body");
    assert_eq!(results.len(), 2);

    // First item: accepted model output, camelCase wire shape.
    assert_eq!(results[0]["isProductive"], false);
    assert_eq!(results[0]["category"], "greeting");
    assert_eq!(results[0]["suggestedSubject"], "Re: Happy Holidays");
    assert_eq!(results[0]["originalEmail"]["subject"], "Happy Holidays");
    assert!(results[0]["detectedLanguage"].is_string());

    // Second item: fallback for technical_support, still well-formed.
    assert_eq!(results[1]["category"], "technical_support");
    assert_eq!(results[1]["isProductive"], true);
    assert_eq!(results[1]["originalEmail"]["subject"], "App broken");
    let subject = results[1]["suggestedSubject"].as_str().unwrap();
    let body = results[1]["suggestedBody"].as_str().unwrap();
    assert!(subject.chars().count() >= 5);
    assert!(body.chars().count() >= 50);
}

#[tokio::test]
async fn provider_outage_surfaces_as_bad_gateway() {
    let gateway = ScriptedGateway::new(vec![Err(())]);
    let base = spawn_server(gateway).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/process-email"))
        .json(&json!({
            "emails": [
                {"subject": "One", "body": "first email"},
                {"subject": "Two", "body": "second email"},
            ]
        }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["code"], "LlmServiceError");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn batch_size_bounds_enforced() {
    let gateway = ScriptedGateway::new(vec![Ok(greeting_completion())]);
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/process-email"))
        .json(&json!({"emails": []}))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 422);

    let eleven: Vec<Value> = (0..11)
        .map(|i| json!({"subject": format!("s{i}"), "body": "b"}))
        .collect();
    let response = client
        .post(format!("{base}/process-email"))
        .json(&json!({"emails": eleven}))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["code"], "InvalidBatch");
}

#[tokio::test]
async fn invalid_draft_falls_back_to_proposed_category() {
    // Valid JSON shape, but the body is 10 chars — fails the quality
    // gate, so the payment_issue fallback template is served.
    let gateway = ScriptedGateway::new(vec![Ok(json!({
        "is_productive": true,
        "category": "payment_issue",
        "suggested_subject": "Re: Invoice",
        "suggested_body": "Fixed soon",
    })
    .to_string())]);
    let base = spawn_server(gateway).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/process-email"))
        .json(&json!({
            "emails": [{"subject": "Overdue Invoice", "body": "I cannot pay my invoice."}]
        }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 200);
    let results: Vec<Value> = response.json().await.expect("body");
    assert_eq!(results[0]["category"], "payment_issue");
    assert_eq!(results[0]["isProductive"], true);
    assert!(
        results[0]["suggestedBody"].as_str().unwrap().chars().count() >= 50,
        "fallback body must satisfy the length invariant"
    );
}

#[tokio::test]
async fn health_probe() {
    let gateway = ScriptedGateway::new(vec![Ok(greeting_completion())]);
    let base = spawn_server(gateway).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("body");
    assert_eq!(body["status"], "ok");
}
