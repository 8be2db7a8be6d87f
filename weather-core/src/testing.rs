//! Shared test fixtures and a log-capturing subscriber.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    subscriber::DefaultGuard,
};
use tracing_subscriber::{
    Layer, Registry,
    layer::{Context, SubscriberExt},
};

use crate::WeatherSnapshot;

pub(crate) const CURRENT_LONDON: &str = include_str!("../fixtures/current_london.json");

pub(crate) fn london_snapshot() -> WeatherSnapshot {
    serde_json::from_str(CURRENT_LONDON).expect("fixture must decode")
}

#[derive(Debug, Clone)]
pub(crate) struct Record {
    pub level: Level,
    pub message: String,
}

/// Records events emitted from this crate.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    records: Arc<Mutex<Vec<Record>>>,
}

impl CapturedLogs {
    /// Install as the thread's default subscriber until the guard drops.
    pub fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let subscriber = Registry::default().with(logs.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .expect("log capture poisoned")
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("weather_core") {
            return;
        }

        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);

        self.records
            .lock()
            .expect("log capture poisoned")
            .push(Record {
                level: *event.metadata().level(),
                message: visitor.0,
            });
    }
}
