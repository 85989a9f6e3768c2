use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("gemchat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("gemchat.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("gemchat.client.request_duration_seconds");

pub(crate) static SEND_RETRIES: Counter = Counter::new("gemchat.send.retries");
pub(crate) static SEND_RETRY_BACKOFF: Moments = Moments::new("gemchat.send.retry_backoff_seconds");
pub(crate) static SEND_REPLAYED: Counter = Counter::new("gemchat.send.replayed_messages");

pub(crate) static HISTORY_LOADS: Counter = Counter::new("gemchat.history.loads");
pub(crate) static HISTORY_LOAD_FALLBACKS: Counter = Counter::new("gemchat.history.load_fallbacks");
pub(crate) static HISTORY_DROPPED_RECORDS: Counter =
    Counter::new("gemchat.history.dropped_records");
pub(crate) static HISTORY_SAVES: Counter = Counter::new("gemchat.history.saves");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SEND_RETRIES);
    collector.register_moments(&SEND_RETRY_BACKOFF);
    collector.register_counter(&SEND_REPLAYED);

    collector.register_counter(&HISTORY_LOADS);
    collector.register_counter(&HISTORY_LOAD_FALLBACKS);
    collector.register_counter(&HISTORY_DROPPED_RECORDS);
    collector.register_counter(&HISTORY_SAVES);
}
