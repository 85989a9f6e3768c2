mod common;

use std::time::Duration;

use tokio::time::Instant;

use gemchat::{Error, send_with_retry};

use common::{RecordingRenderer, ScriptedChat, rate_limit_error};

#[tokio::test(start_paused = true)]
async fn rate_limit_retries_once_after_parsed_delay() {
    let mut chat = ScriptedChat::new(vec![
        Err(rate_limit_error("Quota exceeded. Please retry in 12.5s.")),
        Ok("hi there".to_string()),
    ]);
    let mut renderer = RecordingRenderer::default();

    let start = Instant::now();
    let reply = send_with_retry(&mut chat, "hello", &mut renderer).await.unwrap();
    let waited = start.elapsed();

    assert_eq!(reply, "hi there");
    assert_eq!(chat.sent, vec!["hello", "hello"]);
    assert!(waited >= Duration::from_secs_f64(12.5), "waited {waited:?}");
    assert!(waited < Duration::from_secs(13), "waited {waited:?}");
    assert_eq!(
        renderer.warnings(),
        vec!["Rate limit hit. Retrying in 12.5s..."]
    );
}

#[tokio::test(start_paused = true)]
async fn retry_delay_field_is_used() {
    let mut chat = ScriptedChat::new(vec![
        Err(Error::api(
            429,
            Some("RESOURCE_EXHAUSTED".to_string()),
            "quota",
            Some(r#"[{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"7s"}]"#.to_string()),
        )),
        Ok("ok".to_string()),
    ]);
    let mut renderer = RecordingRenderer::default();

    let start = Instant::now();
    send_with_retry(&mut chat, "x", &mut renderer).await.unwrap();
    let waited = start.elapsed();

    assert!(waited >= Duration::from_secs(7));
    assert!(waited < Duration::from_secs(8));
    assert_eq!(renderer.warnings(), vec!["Rate limit hit. Retrying in 7.0s..."]);
}

#[tokio::test(start_paused = true)]
async fn missing_delay_waits_thirty_seconds() {
    let mut chat = ScriptedChat::new(vec![
        Err(Error::api(429, None, "Too Many Requests", None)),
        Ok("ok".to_string()),
    ]);
    let mut renderer = RecordingRenderer::default();

    let start = Instant::now();
    send_with_retry(&mut chat, "x", &mut renderer).await.unwrap();

    assert!(start.elapsed() >= Duration::from_secs(30));
    assert_eq!(renderer.warnings(), vec!["Rate limit hit. Retrying in 30.0s..."]);
}

#[tokio::test(start_paused = true)]
async fn second_rate_limit_propagates() {
    let mut chat = ScriptedChat::new(vec![
        Err(rate_limit_error("retry in 1s")),
        Err(rate_limit_error("retry in 1s, again")),
        Ok("never reached".to_string()),
    ]);
    let mut renderer = RecordingRenderer::default();

    let err = send_with_retry(&mut chat, "x", &mut renderer)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("again"));
    assert_eq!(chat.sent.len(), 2);
    assert_eq!(renderer.warnings().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failure_after_retry_propagates() {
    let mut chat = ScriptedChat::new(vec![
        Err(rate_limit_error("retry in 1s")),
        Err(Error::api(500, Some("INTERNAL".to_string()), "boom", None)),
    ]);
    let mut renderer = RecordingRenderer::default();

    let err = send_with_retry(&mut chat, "x", &mut renderer)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(chat.sent.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn other_failures_are_not_retried() {
    let mut chat = ScriptedChat::new(vec![
        Err(Error::api(400, Some("INVALID_ARGUMENT".to_string()), "bad", None)),
        Ok("never reached".to_string()),
    ]);
    let mut renderer = RecordingRenderer::default();

    let start = Instant::now();
    let err = send_with_retry(&mut chat, "x", &mut renderer)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(chat.sent.len(), 1);
    assert!(renderer.warnings().is_empty());
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn first_success_sends_once() {
    let mut chat = ScriptedChat::replying(&["fine"]);
    let mut renderer = RecordingRenderer::default();

    let reply = send_with_retry(&mut chat, "x", &mut renderer).await.unwrap();

    assert_eq!(reply, "fine");
    assert_eq!(chat.sent.len(), 1);
    assert!(renderer.shown.is_empty());
}

#[tokio::test(start_paused = true)]
async fn oversized_delay_waits_the_default() {
    let mut chat = ScriptedChat::new(vec![
        Err(rate_limit_error("Please retry in 99999999999999999999999s.")),
        Ok("ok".to_string()),
    ]);
    let mut renderer = RecordingRenderer::default();

    let start = Instant::now();
    let reply = send_with_retry(&mut chat, "x", &mut renderer).await.unwrap();
    let waited = start.elapsed();

    assert_eq!(reply, "ok");
    assert_eq!(chat.sent.len(), 2);
    assert!(waited >= Duration::from_secs(30));
    assert!(waited < Duration::from_secs(31));
    assert_eq!(renderer.warnings(), vec!["Rate limit hit. Retrying in 30.0s..."]);
}
