//! Streaming answer tests against a local SSE-style server
//!
//! Each test stands up an axum route that plays back `data:`-prefixed frames
//! and asserts what the typed answer stream makes of them: delta ordering,
//! reassembly of frames split across network reads, malformed-frame
//! tolerance, server aborts, disconnects without a terminal frame, and
//! cancellation.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{self, Body, Bytes};
use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use axum::{Router, routing::post};
use futures_util::StreamExt;
use tokio::sync::Mutex;
use tokio_test::assert_ok;

use tutorwire::prelude::*;

fn chunk_frame(text: &str) -> String {
    format!("data: {}\n\n", serde_json::json!({ "chunk": text }))
}

fn done_frame() -> String {
    "data: {\"done\":true}\n\n".to_string()
}

fn error_frame(message: &str) -> String {
    format!("data: {}\n\n", serde_json::json!({ "error": message }))
}

fn sse_response<S>(stream: S) -> Response
where
    S: futures_util::Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
{
    Response::builder()
        .header("content-type", HeaderValue::from_static("text/event-stream"))
        .body(Body::from_stream(stream))
        .unwrap()
}

async fn start_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}:{}", addr.ip(), addr.port())
}

fn test_client(base_url: &str) -> TutorClient {
    TutorClient::builder()
        .base_url(base_url)
        .api_key("test-key")
        .build()
        .expect("client")
}

#[tokio::test]
async fn streams_deltas_in_order_then_completes() {
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move {
            let stream = async_stream::stream! {
                yield Ok::<Bytes, std::io::Error>(Bytes::from(chunk_frame("Hel")));
                yield Ok(Bytes::from(chunk_frame("lo")));
                yield Ok(Bytes::from(done_frame()));
            };
            sse_response(stream)
        }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let stream = client
        .ask_stream(AskRequest::new("bio-101", "What is osmosis?"))
        .await
        .expect("stream start");
    let events: Vec<_> = stream.collect().await;

    let deltas: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            Ok(AnswerStreamEvent::Delta { delta }) => Some(delta.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec!["Hel", "lo"]);

    let completions = events
        .iter()
        .filter(|e| matches!(e, Ok(AnswerStreamEvent::Completed { .. })))
        .count();
    assert_eq!(completions, 1);
    match events.last() {
        Some(Ok(AnswerStreamEvent::Completed { answer })) => assert_eq!(answer.text(), "Hello"),
        other => panic!("expected terminal completion, got {other:?}"),
    }
}

#[tokio::test]
async fn frames_split_across_reads_reassemble() {
    // Frame boundaries deliberately disagree with write boundaries: the first
    // write ends mid-JSON and the delimiter itself is split across writes.
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move {
            let stream = async_stream::stream! {
                yield Ok::<Bytes, std::io::Error>(Bytes::from("data: {\"chu"));
                tokio::time::sleep(Duration::from_millis(5)).await;
                yield Ok(Bytes::from("nk\":\"Hel\"}\n\ndata: {\"chunk\":\"lo\"}\n"));
                tokio::time::sleep(Duration::from_millis(5)).await;
                yield Ok(Bytes::from("\n"));
                yield Ok(Bytes::from(done_frame()));
            };
            sse_response(stream)
        }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let stream = client
        .ask_stream(AskRequest::new("bio-101", "What is osmosis?"))
        .await
        .expect("stream start");
    let events: Vec<_> = stream.collect().await;

    let deltas: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            Ok(AnswerStreamEvent::Delta { delta }) => Some(delta.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec!["Hel", "lo"]);
    match events.last() {
        Some(Ok(AnswerStreamEvent::Completed { answer })) => assert_eq!(answer.text(), "Hello"),
        other => panic!("expected terminal completion, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_and_unprefixed_frames_are_skipped() {
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move {
            let stream = async_stream::stream! {
                yield Ok::<Bytes, std::io::Error>(Bytes::from("data: {not json}\n\n"));
                yield Ok(Bytes::from(": keepalive\n\n"));
                yield Ok(Bytes::from("event: ping\n\n"));
                yield Ok(Bytes::from(chunk_frame("Fine")));
                yield Ok(Bytes::from(done_frame()));
            };
            sse_response(stream)
        }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let stream = client
        .ask_stream(AskRequest::new("bio-101", "Still there?"))
        .await
        .expect("stream start");
    let events: Vec<_> = stream.collect().await;

    assert!(events.iter().all(|e| e.is_ok()), "noise frames must not error");
    let deltas: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            Ok(AnswerStreamEvent::Delta { delta }) => Some(delta.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec!["Fine"]);
    match events.last() {
        Some(Ok(AnswerStreamEvent::Completed { answer })) => assert_eq!(answer.text(), "Fine"),
        other => panic!("expected terminal completion, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_frame_ends_stream_without_completion() {
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move {
            let stream = async_stream::stream! {
                yield Ok::<Bytes, std::io::Error>(Bytes::from(chunk_frame("One ")));
                yield Ok(Bytes::from(chunk_frame("two ")));
                yield Ok(Bytes::from(chunk_frame("thr")));
                yield Ok(Bytes::from(error_frame("quota exceeded")));
                yield Ok(Bytes::from(chunk_frame("never")));
            };
            sse_response(stream)
        }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let stream = client
        .ask_stream(AskRequest::new("bio-101", "What is osmosis?"))
        .await
        .expect("stream start");
    let events: Vec<_> = stream.collect().await;

    let deltas: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            Ok(AnswerStreamEvent::Delta { delta }) => Some(delta.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec!["One ", "two ", "thr"]);
    match events.last() {
        Some(Err(TutorError::StreamError(message))) => assert_eq!(message, "quota exceeded"),
        other => panic!("expected stream error, got {other:?}"),
    }
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, Ok(AnswerStreamEvent::Completed { .. }))),
        "an aborted answer must not complete"
    );
}

#[tokio::test]
async fn disconnect_without_done_completes_with_accumulated_text() {
    // Server closes the body after two deltas and never sends a done frame.
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move {
            let stream = async_stream::stream! {
                yield Ok::<Bytes, std::io::Error>(Bytes::from(chunk_frame("Photo")));
                yield Ok(Bytes::from(chunk_frame("syn")));
                tokio::time::sleep(Duration::from_millis(10)).await;
            };
            sse_response(stream)
        }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let stream = client
        .ask_stream(AskRequest::new("bio-101", "Explain photosynthesis"))
        .await
        .expect("stream start");
    let events: Vec<_> = stream.collect().await;

    match events.last() {
        Some(Ok(AnswerStreamEvent::Completed { answer })) => {
            assert_eq!(answer.text(), "Photosyn");
        }
        other => panic!("expected completion with partial text, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_status_surfaces_api_error() {
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let err = client
        .ask_stream(AskRequest::new("bio-101", "What is osmosis?"))
        .await
        .err()
        .expect("expected status rejection");
    match err {
        TutorError::ApiError { code, ref message } => {
            assert_eq!(code, 429);
            assert_eq!(message, "slow down");
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status_code(), Some(429));
    assert_eq!(err.category(), ErrorCategory::Client);
}

#[tokio::test]
async fn rejected_status_without_body_gets_generic_message() {
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let err = client
        .ask_stream(AskRequest::new("bio-101", "What is osmosis?"))
        .await
        .err()
        .expect("expected status rejection");
    match err {
        TutorError::ApiError { code, message } => {
            assert_eq!(code, 500);
            assert!(message.contains("500"), "generic message names the status: {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn stalled_handshake_maps_to_timeout_error() {
    // Server accepts the connection but holds the response headers back
    // far longer than the configured request timeout.
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let base_url = start_server(app).await;

    let client = TutorClient::builder()
        .base_url(base_url)
        .api_key("test-key")
        .http_config(HttpConfig::builder().timeout(Duration::from_millis(200)).build())
        .build()
        .expect("client");

    let err = client
        .ask_stream(AskRequest::new("bio-101", "Anyone?"))
        .await
        .err()
        .expect("expected timeout");

    assert!(matches!(err, TutorError::TimeoutError(_)), "got {err:?}");
    assert!(err.is_transport());
    assert_eq!(err.category(), ErrorCategory::Network);
}

#[tokio::test]
async fn cancel_stops_stream_between_events() {
    // Endless delta feed; only cancellation ends this stream.
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move {
            let stream = async_stream::stream! {
                loop {
                    yield Ok::<Bytes, std::io::Error>(Bytes::from(chunk_frame("tick")));
                    tokio::time::sleep(Duration::from_millis(20)).await;
                }
            };
            sse_response(stream)
        }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let mut handle = client
        .ask_stream_with_cancel(AskRequest::new("bio-101", "Count forever"))
        .await
        .expect("stream start");

    let first = handle.stream.next().await;
    assert!(matches!(
        first,
        Some(Ok(AnswerStreamEvent::Delta { ref delta })) if delta == "tick"
    ));

    handle.cancel.cancel();
    assert!(handle.cancel.is_cancelled());
    assert!(
        handle.stream.next().await.is_none(),
        "a cancelled stream must stop yielding"
    );
}

#[tokio::test]
async fn ask_with_options_fires_callbacks_in_order() {
    let app = Router::new().route(
        "/api/tutor/ask/stream",
        post(|| async move {
            let stream = async_stream::stream! {
                yield Ok::<Bytes, std::io::Error>(Bytes::from(chunk_frame("Hel")));
                yield Ok(Bytes::from(chunk_frame("lo")));
                yield Ok(Bytes::from(done_frame()));
            };
            sse_response(stream)
        }),
    );
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let log = Arc::new(std::sync::Mutex::new(Vec::<String>::new()));
    let options = AskOptions {
        on_delta: Some(Arc::new({
            let log = log.clone();
            move |delta: &str| log.lock().unwrap().push(format!("delta:{delta}"))
        })),
        on_complete: Some(Arc::new({
            let log = log.clone();
            move |text: &str| log.lock().unwrap().push(format!("complete:{text}"))
        })),
        on_success: Some(Arc::new({
            let log = log.clone();
            move |answer: &Answer| log.lock().unwrap().push(format!("success:{}", answer.text()))
        })),
        on_error: Some(Arc::new({
            let log = log.clone();
            move |err: &TutorError| log.lock().unwrap().push(format!("error:{err}"))
        })),
    };

    let answer = tokio_test::assert_ok!(
        client
            .ask_with_options(
                AskRequest::new("bio-101", "What is osmosis?"),
                AskMode::Streaming,
                options,
            )
            .await
    );

    assert_eq!(answer.text(), "Hello");
    assert_eq!(
        *log.lock().unwrap(),
        vec!["delta:Hel", "delta:lo", "complete:Hello", "success:Hello"]
    );
}

#[derive(Default, Clone, Debug)]
struct SeenRequest {
    accept_is_sse: bool,
    auth_is_bearer: bool,
    body_subject: Option<String>,
    body_text: Option<String>,
}

async fn capture_handler(req: Request, state: Arc<Mutex<SeenRequest>>) -> Response {
    let (parts, req_body) = req.into_parts();

    let mut seen = SeenRequest::default();
    if let Some(v) = parts.headers.get("accept") {
        seen.accept_is_sse = v == HeaderValue::from_static("text/event-stream");
    }
    if let Some(v) = parts.headers.get("authorization") {
        seen.auth_is_bearer = v == HeaderValue::from_static("Bearer test-key");
    }
    let body_bytes = body::to_bytes(req_body, 64 * 1024).await.unwrap_or_default();
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(&body_bytes) {
        seen.body_subject = json
            .get("subjectId")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        seen.body_text = json.get("text").and_then(|v| v.as_str()).map(str::to_string);
    }
    *state.lock().await = seen;

    let sse_body = concat!("data: {\"chunk\":\"Hi\"}\n\n", "data: {\"done\":true}\n\n");
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/event-stream")
        .body(Body::from(sse_body))
        .unwrap()
}

#[tokio::test]
async fn streaming_request_sends_sse_headers_and_camel_case_body() {
    let state = Arc::new(Mutex::new(SeenRequest::default()));
    let app = {
        let state = state.clone();
        Router::new().route(
            "/api/tutor/ask/stream",
            post(move |req| capture_handler(req, state.clone())),
        )
    };
    let base_url = start_server(app).await;
    let client = test_client(&base_url);

    let stream = client
        .ask_stream(AskRequest::new("bio-101", "Hi"))
        .await
        .expect("stream start");
    let _events: Vec<_> = stream.collect().await;

    let seen = state.lock().await.clone();
    assert!(seen.accept_is_sse, "Accept header should be text/event-stream");
    assert!(seen.auth_is_bearer, "Authorization should carry the bearer key");
    assert_eq!(seen.body_subject.as_deref(), Some("bio-101"));
    assert_eq!(seen.body_text.as_deref(), Some("Hi"));
}
