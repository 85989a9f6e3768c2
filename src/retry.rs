//! Rate-limit retry around a single chat send.
//!
//! The API reports quota exhaustion as ordinary error text, so detection and
//! the wait are both scraped from the error's display form.  The scrape is
//! best-effort: when no delay can be found the default is used.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use crate::error::Result;
use crate::observability::{SEND_RETRIES, SEND_RETRY_BACKOFF};
use crate::render::Renderer;
use crate::session::ChatSession;

/// Retry attempts after the initial send.
pub const MAX_RETRIES: u32 = 1;
/// Wait used when the error text carries no delay.
pub const DEFAULT_RETRY_DELAY_SECS: f64 = 30.0;

/// Markers that identify a rate-limit failure.
const RATE_LIMIT_MARKERS: [&str; 2] = ["RESOURCE_EXHAUSTED", "429"];

/// Delay patterns in priority order; the first capture group is seconds.
fn retry_delay_regexes() -> &'static [Regex; 2] {
    static CACHED: OnceLock<[Regex; 2]> = OnceLock::new();
    CACHED.get_or_init(|| {
        [
            Regex::new(r"(?i)retry in ([0-9]+(?:\.[0-9]+)?)s").expect("retry regex must compile"),
            Regex::new(r#"['"]retryDelay['"]\s*:\s*['"]([0-9]+(?:\.[0-9]+)?)s['"]"#)
                .expect("retryDelay regex must compile"),
        ]
    })
}

/// Returns true if `error_text` describes a rate-limit condition.
pub fn is_rate_limited(error_text: &str) -> bool {
    RATE_LIMIT_MARKERS
        .iter()
        .any(|marker| error_text.contains(marker))
}

/// Seconds to wait before retrying, scraped from `error_text`.
///
/// Patterns are tried in order:
///
/// 1. `retry in <seconds>s`, as in "Please retry in 12.5s."
/// 2. a `retryDelay` field, either `'retryDelay': '7s'` or `"retryDelay":"7s"`
///
/// A value too large to be a [`Duration`] is ignored.  Falls back to
/// [`DEFAULT_RETRY_DELAY_SECS`].
pub fn retry_delay_secs(error_text: &str) -> f64 {
    for regex in retry_delay_regexes() {
        if let Some(secs) = regex
            .captures(error_text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|secs| Duration::try_from_secs_f64(*secs).is_ok())
        {
            return secs;
        }
    }
    DEFAULT_RETRY_DELAY_SECS
}

/// [`retry_delay_secs`] as a [`Duration`].
pub fn retry_delay(error_text: &str) -> Duration {
    Duration::from_secs_f64(retry_delay_secs(error_text))
}

/// Send `message`, retrying once after a delay if the first failure is a
/// rate limit.
///
/// Any other failure, and any failure of the retry, is returned as is.
pub async fn send_with_retry<C: ChatSession + ?Sized>(
    chat: &mut C,
    message: &str,
    renderer: &mut dyn Renderer,
) -> Result<String> {
    let mut attempt = 0;
    loop {
        match chat.send_message(message).await {
            Ok(reply) => return Ok(reply),
            Err(err) => {
                let text = err.to_string();
                if attempt >= MAX_RETRIES || !is_rate_limited(&text) {
                    return Err(err);
                }
                let wait = retry_delay_secs(&text);
                renderer.print_warning(&format!("Rate limit hit. Retrying in {wait:.1}s..."));
                SEND_RETRIES.click();
                SEND_RETRY_BACKOFF.add(wait);
                tokio::time::sleep(Duration::from_secs_f64(wait)).await;
                attempt += 1;
            }
        }
    }
}
