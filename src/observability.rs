use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("aiteam.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("aiteam.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("aiteam.client.request_duration_seconds");

pub(crate) static AUTH_LOGINS: Counter = Counter::new("aiteam.auth.logins");
pub(crate) static AUTH_LOGIN_ERRORS: Counter = Counter::new("aiteam.auth.login_errors");

pub(crate) static ROUNDTRIP_STARTED: Counter = Counter::new("aiteam.roundtrip.started");
pub(crate) static ROUNDTRIP_POLLS: Counter = Counter::new("aiteam.roundtrip.polls");
pub(crate) static ROUNDTRIP_TIMEOUTS: Counter = Counter::new("aiteam.roundtrip.timeouts");
pub(crate) static ROUNDTRIP_DURATION: Moments =
    Moments::new("aiteam.roundtrip.duration_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&AUTH_LOGINS);
    collector.register_counter(&AUTH_LOGIN_ERRORS);

    collector.register_counter(&ROUNDTRIP_STARTED);
    collector.register_counter(&ROUNDTRIP_POLLS);
    collector.register_counter(&ROUNDTRIP_TIMEOUTS);
    collector.register_moments(&ROUNDTRIP_DURATION);
}
