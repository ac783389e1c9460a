//! Provider call metrics
//!
//! Every outbound call to an external provider is counted and timed with the
//! provider name and outcome as attributes.

use std::{sync::OnceLock, time::Instant};

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

pub const PROVIDER_REQUEST_COUNT: &str = "spotme.provider.request.count";
pub const PROVIDER_REQUEST_DURATION: &str = "spotme.provider.request.duration";

/// External provider an outbound call went to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Provider {
    Vision,
    Gemini,
    Tts,
    Storage,
    ReferenceImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Success,
    Error,
}

impl Outcome {
    pub const fn from_ok(ok: bool) -> Self {
        if ok { Self::Success } else { Self::Error }
    }
}

struct Instruments {
    count: Counter<u64>,
    duration: Histogram<f64>,
}

fn instruments() -> &'static Instruments {
    static INSTRUMENTS: OnceLock<Instruments> = OnceLock::new();
    INSTRUMENTS.get_or_init(|| {
        let meter = global::meter("spotme");
        Instruments {
            count: meter
                .u64_counter(PROVIDER_REQUEST_COUNT)
                .with_description("Outbound provider requests")
                .build(),
            duration: meter
                .f64_histogram(PROVIDER_REQUEST_DURATION)
                .with_unit("s")
                .with_description("Outbound provider request duration")
                .build(),
        }
    })
}

/// Record a duration measurement on a histogram
pub fn record_duration(histogram: &Histogram<f64>, start: Instant, attributes: &[KeyValue]) {
    histogram.record(start.elapsed().as_secs_f64(), attributes);
}

/// Count and time one provider call that started at `start`
pub fn record_provider_call(provider: Provider, outcome: Outcome, start: Instant) {
    let attributes = [
        KeyValue::new("provider", <&'static str>::from(provider)),
        KeyValue::new("outcome", <&'static str>::from(outcome)),
    ];

    let instruments = instruments();
    instruments.count.add(1, &attributes);
    record_duration(&instruments.duration, start, &attributes);
}
