//! TTS Handlers
//!
//! - POST /tts          按 engine 字段或语言选择引擎
//! - POST /tts/google   固定 Google
//! - POST /tts/voicevox 固定 VOICEVOX

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::{ApplicationError, SynthesizeSpeech, SynthesizeSpeechResponse};
use crate::domain::{parse_synthesis_request, Engine, SynthesisRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 响应头：实际使用的引擎
pub const ENGINE_HEADER: &str = "x-tts-engine";

type RawBody = Result<Bytes, BytesRejection>;

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    body: RawBody,
) -> Result<Response, ApiError> {
    let request = parse_body(body)?;
    dispatch(&state, SynthesizeSpeech::auto(request)).await
}

pub async fn synthesize_google(
    State(state): State<Arc<AppState>>,
    body: RawBody,
) -> Result<Response, ApiError> {
    let request = parse_body(body)?;
    dispatch(&state, SynthesizeSpeech::fixed(request, Engine::Google)).await
}

pub async fn synthesize_voicevox(
    State(state): State<Arc<AppState>>,
    body: RawBody,
) -> Result<Response, ApiError> {
    let request = parse_body(body)?;
    dispatch(&state, SynthesizeSpeech::fixed(request, Engine::Voicevox)).await
}

fn parse_body(body: RawBody) -> Result<SynthesisRequest, ApiError> {
    let bytes = body.map_err(|rejection| ApiError::Rejected {
        status: rejection.status(),
        detail: rejection.body_text(),
    })?;
    Ok(parse_synthesis_request(&bytes)?)
}

async fn dispatch(state: &AppState, command: SynthesizeSpeech) -> Result<Response, ApiError> {
    let result = state.synthesize_handler.handle(command).await?;
    audio_response(result)
}

/// 一次性写出完整音频
fn audio_response(result: SynthesizeSpeechResponse) -> Result<Response, ApiError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename={}", result.filename),
        )
        .header(ENGINE_HEADER, result.engine.as_str())
        .body(Body::from(result.audio_data))
        .map_err(|e| ApplicationError::internal(format!("Failed to build response: {}", e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{RateLimiterPort, TtsError, TtsEnginePort};
    use crate::domain::SpeakerId;
    use crate::infrastructure::adapters::FakeTtsClient;
    use crate::infrastructure::http::server::{HttpServer, ServerConfig};
    use crate::infrastructure::memory::InMemoryRateLimiter;
    use axum::{body::to_bytes, http::Request, Router};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::util::ServiceExt;

    struct TestApp {
        google: Arc<FakeTtsClient>,
        voicevox: Arc<FakeTtsClient>,
        router: Router,
    }

    fn app_with(google: FakeTtsClient, voicevox: FakeTtsClient) -> TestApp {
        let google = Arc::new(google);
        let voicevox = Arc::new(voicevox);
        let state = AppState::new(
            google.clone() as Arc<dyn TtsEnginePort>,
            voicevox.clone() as Arc<dyn TtsEnginePort>,
            None,
        );
        let router = HttpServer::new(ServerConfig::default(), state).build_router();
        TestApp {
            google,
            voicevox,
            router,
        }
    }

    fn app() -> TestApp {
        app_with(
            FakeTtsClient::returning(Engine::Google, vec![0x01, 0x02]),
            FakeTtsClient::returning(Engine::Voicevox, vec![0x03, 0x04]),
        )
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        post(uri, body.to_string())
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_english_returns_google_audio() {
        let app = app();

        let response = app
            .router
            .oneshot(post_json("/tts", json!({ "text": "hello", "lang": "en" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
        assert_eq!(response.headers()[ENGINE_HEADER], "google");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("inline; filename=tts_"));
        assert!(disposition.ends_with(".mp3"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), &[0x01, 0x02]);
        assert_eq!(app.google.call_count(), 1);
        assert_eq!(app.voicevox.call_count(), 0);
    }

    #[tokio::test]
    async fn test_japanese_uses_voicevox_default_speaker() {
        let app = app();

        let response = app
            .router
            .oneshot(post_json("/tts", json!({ "text": "こんにちは", "lang": "ja" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let calls = app.voicevox.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text, "こんにちは");
        assert_eq!(calls[0].speaker, SpeakerId::new(3));
        assert_eq!(app.google.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_object_is_missing_text() {
        let app = app();

        let response = app.router.oneshot(post_json("/tts", json!({}))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "error": "Missing 'text'" }));
        assert_eq!(app.google.call_count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_text_is_rejected() {
        let app = app();

        let response = app
            .router
            .oneshot(post_json("/tts", json!({ "text": "   " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected() {
        let app = app();

        let response = app.router.oneshot(post("/tts", "{text:")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid JSON body");
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_unsupported_engine_makes_no_upstream_call() {
        let app = app();

        let response = app
            .router
            .oneshot(post_json("/tts", json!({ "text": "hello", "engine": "polly" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Unsupported engine");
        assert_eq!(app.google.call_count(), 0);
        assert_eq!(app.voicevox.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_status_is_forwarded() {
        let app = app_with(
            FakeTtsClient::failing(
                Engine::Google,
                TtsError::ServiceError {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                },
            ),
            FakeTtsClient::returning(Engine::Voicevox, vec![]),
        );

        let response = app
            .router
            .oneshot(post_json("/tts", json!({ "text": "hello" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["error"], "TTS failed");
        assert!(body["detail"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_upstream_failure_without_status_is_500() {
        let app = app_with(
            FakeTtsClient::returning(Engine::Google, vec![]),
            FakeTtsClient::failing(Engine::Voicevox, TtsError::MissingAudioUrl(None)),
        );

        let response = app
            .router
            .oneshot(post_json("/tts/voicevox", json!({ "text": "テスト" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "TTS failed");
        assert_eq!(
            body["detail"],
            "mp3StreamingUrl missing from synthesis response"
        );
    }

    #[tokio::test]
    async fn test_google_shortcut_ignores_language_rule() {
        let app = app();

        let response = app
            .router
            .oneshot(post_json("/tts/google", json!({ "text": "こんにちは", "lang": "ja" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ENGINE_HEADER], "google");
        let calls = app.google.calls();
        assert_eq!(calls[0].language, "ja");
        assert_eq!(app.voicevox.call_count(), 0);
    }

    #[tokio::test]
    async fn test_voicevox_shortcut_passes_speaker() {
        let app = app();

        let response = app
            .router
            .oneshot(post_json("/tts/voicevox", json!({ "text": "テスト", "speaker": 8 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), &[0x03, 0x04]);
        assert_eq!(app.voicevox.calls()[0].speaker, SpeakerId::new(8));
    }

    #[tokio::test]
    async fn test_shortcut_validates_text() {
        let app = app();

        let response = app
            .router
            .oneshot(post_json("/tts/google", json!({ "lang": "en" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.google.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_body_is_json_error() {
        let app = app();
        let state = AppState::new(app.google.clone(), app.voicevox.clone(), None);
        let config = ServerConfig {
            max_body_bytes: 16,
            ..ServerConfig::default()
        };
        let router = HttpServer::new(config, state).build_router();

        let response = router
            .oneshot(post_json("/tts", json!({ "text": "a rather long sentence to speak" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(app.google.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rate_limit_rejects_thirty_first_request() {
        let google = Arc::new(FakeTtsClient::returning(Engine::Google, vec![0x01]));
        let voicevox = Arc::new(FakeTtsClient::returning(Engine::Voicevox, vec![0x02]));
        let limiter: Arc<dyn RateLimiterPort> =
            Arc::new(InMemoryRateLimiter::new(30, Duration::from_secs(60)));
        let state = AppState::new(google.clone(), voicevox, Some(limiter));
        let router = HttpServer::new(ServerConfig::default(), state).build_router();

        for i in 1..=30u32 {
            let response = router
                .clone()
                .oneshot(post_json("/tts", json!({ "text": "hello" })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "request {}", i);
            assert_eq!(
                response.headers()["ratelimit-remaining"],
                (30 - i).to_string().as_str()
            );
        }

        let response = router
            .clone()
            .oneshot(post_json("/tts", json!({ "text": "hello" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["ratelimit-limit"], "30");
        assert!(response.headers().contains_key(header::RETRY_AFTER));
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(google.call_count(), 30);
    }

    #[tokio::test]
    async fn test_rate_limit_runs_before_validation() {
        let google = Arc::new(FakeTtsClient::returning(Engine::Google, vec![0x01]));
        let voicevox = Arc::new(FakeTtsClient::returning(Engine::Voicevox, vec![0x02]));
        let limiter: Arc<dyn RateLimiterPort> =
            Arc::new(InMemoryRateLimiter::new(1, Duration::from_secs(60)));
        let state = AppState::new(google, voicevox, Some(limiter));
        let router = HttpServer::new(ServerConfig::default(), state).build_router();

        let first = router.clone().oneshot(post_json("/tts", json!({}))).await.unwrap();
        assert_eq!(first.status(), StatusCode::BAD_REQUEST);

        let second = router.oneshot(post_json("/tts", json!({}))).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
