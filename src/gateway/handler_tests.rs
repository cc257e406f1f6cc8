//! Router-level tests for the gateway handlers.

use axum::{Router, body::Body, http::Request, http::StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::gateway::{GatewayState, GenerateGate, SEMANTLE_STATUS_HEADER, create_router};
use crate::history::date_key;
use crate::oracle::MockOracle;
use crate::pipeline::{DailyPipeline, PipelineConfig};
use crate::ranking::SimilarityRecord;
use crate::snapshot::{DailySnapshot, write_snapshot};

struct TestApp {
    dir: TempDir,
    router: Router,
}

impl TestApp {
    fn new(gate: GenerateGate) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("semantle_wordlist.txt"),
            "chat\nchien\ntable\nvoiture\n",
        )
        .unwrap();

        let oracle = MockOracle::new()
            .with_similarity("chat", "chien", 0.9)
            .with_similarity("chat", "table", 0.1)
            .with_similarity("chat", "voiture", 0.05);

        let config = PipelineConfig::new(
            dir.path().join("semantle_wordlist.txt"),
            dir.path().join("history.json"),
            dir.path().join("daily.json"),
        );
        let pipeline = DailyPipeline::new(config, Arc::new(oracle)).expect("valid pipeline");
        let state = GatewayState::new(Arc::new(pipeline), gate);

        Self {
            router: create_router(state),
            dir,
        }
    }

    fn closed() -> Self {
        Self::new(GenerateGate::secret_only("s3cret"))
    }

    fn write_snapshot(&self) {
        let snapshot = DailySnapshot::new(
            "2024-01-01",
            "chat",
            vec![
                ranked("chien", 90.0, 2),
                ranked("table", 10.0, 1),
                ranked("voiture", 5.0, 0),
            ],
        );
        write_snapshot(&self.dir.path().join("daily.json"), &snapshot).unwrap();
    }

    fn pin_today(&self, word: &str) {
        let today = date_key(Utc::now().date_naive());
        std::fs::write(
            self.dir.path().join("history.json"),
            serde_json::json!({ today: word }).to_string(),
        )
        .unwrap();
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn guess(&self, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.send(
            Request::post("/api/guess")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

fn ranked(word: &str, similarity: f64, rank: u32) -> SimilarityRecord {
    SimilarityRecord {
        word: word.to_string(),
        similarity,
        rank: Some(rank),
        score: None,
    }
}

#[tokio::test]
async fn test_healthz() {
    let app = TestApp::closed();
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(SEMANTLE_STATUS_HEADER).unwrap(),
        "healthy"
    );
}

mod daily_word {
    use super::*;

    #[tokio::test]
    async fn test_missing_snapshot_is_404() {
        let app = TestApp::closed();
        let (status, body) = app.get("/api/daily-word").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_returns_snapshot() {
        let app = TestApp::closed();
        app.write_snapshot();

        let (status, body) = app.get("/api/daily-word").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2024-01-01");
        assert_eq!(body["word"], "chat");
        assert_eq!(body["similarities"].as_array().unwrap().len(), 3);
        assert_eq!(body["similarities"][0]["rank"], 2);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_500() {
        let app = TestApp::closed();
        std::fs::write(app.dir.path().join("daily.json"), "{ nope").unwrap();

        let (status, body) = app.get("/api/daily-word").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }
}

mod top_words {
    use super::*;

    #[tokio::test]
    async fn test_default_limit() {
        let app = TestApp::closed();
        app.write_snapshot();

        let (status, body) = app.get("/api/top-words").await;

        assert_eq!(status, StatusCode::OK);
        let words = body.as_array().unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0]["word"], "chien");
        assert_eq!(words[0]["similarity"], 90.0);
    }

    #[tokio::test]
    async fn test_explicit_limit() {
        let app = TestApp::closed();
        app.write_snapshot();

        let (_, body) = app.get("/api/top-words?limit=1").await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}

mod guess {
    use super::*;

    #[tokio::test]
    async fn test_correct_guess() {
        let app = TestApp::closed();
        app.write_snapshot();

        let (status, body) = app.guess(serde_json::json!({ "guess": " Chat " })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isCorrect"], true);
        assert_eq!(body["similarity"], 100.0);
        assert_eq!(body["rank"], 1000);
    }

    #[tokio::test]
    async fn test_listed_guess() {
        let app = TestApp::closed();
        app.write_snapshot();

        let (status, body) = app.guess(serde_json::json!({ "guess": "table" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isCorrect"], false);
        assert_eq!(body["similarity"], 10.0);
        assert_eq!(body["rank"], 1);
    }

    #[tokio::test]
    async fn test_unknown_guess_is_rejected() {
        let app = TestApp::closed();
        app.write_snapshot();

        let (status, body) = app.guess(serde_json::json!({ "guess": "maison" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("not a valid word"));
    }

    #[tokio::test]
    async fn test_blank_guess_is_rejected() {
        let app = TestApp::closed();
        app.write_snapshot();

        let (status, _) = app.guess(serde_json::json!({ "guess": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.guess(serde_json::json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_guess_without_snapshot_is_404() {
        let app = TestApp::closed();
        let (status, _) = app.guess(serde_json::json!({ "guess": "chat" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod generate {
    use super::*;

    fn trigger(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::get("/api/generate-daily-word")
            .header("x-forwarded-for", "203.0.113.7");
        if let Some(auth) = auth {
            builder = builder.header("Authorization", auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let app = TestApp::closed();

        let (status, body) = app.send(trigger(None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");

        let (status, _) = app.send(trigger(Some("Bearer wrong"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!app.dir.path().join("daily.json").exists());
    }

    #[tokio::test]
    async fn test_bearer_secret_runs_pipeline() {
        let app = TestApp::closed();
        app.pin_today("chat");

        let (status, body) = app.send(trigger(Some("Bearer s3cret"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["word"], "chat");
        assert_eq!(body["fresh"], false);
        assert_eq!(body["date"], date_key(Utc::now().date_naive()));
        assert_eq!(body["similarities"][0]["word"], "chien");
        assert_eq!(body["similarities"][0]["similarity"], 90.0);

        let (status, body) = app.get("/api/daily-word").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["word"], "chat");
    }

    #[tokio::test]
    async fn test_open_gate_records_fresh_word() {
        let app = TestApp::new(GenerateGate::new(false, true, None));

        let (status, body) = app.send(trigger(None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fresh"], true);
        let history: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(app.dir.path().join("history.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(history[date_key(Utc::now().date_naive())], body["word"]);
    }

    #[tokio::test]
    async fn test_generation_failure_is_500() {
        let app = TestApp::new(GenerateGate::new(true, false, None));
        std::fs::remove_file(app.dir.path().join("semantle_wordlist.txt")).unwrap();

        let (status, body) = app.send(trigger(None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "daily generation failed");
    }
}
