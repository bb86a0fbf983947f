//! A `tracing-subscriber` layer that records spans and events so tests can
//! assert on instrumentation.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use ::tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// Structured fields keyed by field name, values rendered as text.
pub type Fields = HashMap<String, String>;

/// A span captured when it closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name from its metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: Fields,
}

/// An emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Event level.
    pub level: Level,
    /// Event target, usually the emitting module path.
    pub target: String,
    /// Event fields; the message, when present, is stored under `message`.
    pub fields: Fields,
}

impl EventRecord {
    /// The event's message, if it has one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

#[derive(Default)]
struct Journal {
    spans: Vec<SpanRecord>,
    events: Vec<EventRecord>,
}

/// Layer that keeps every closed span and every event in memory.
///
/// Clones share one journal, so a test can hand one clone to the subscriber
/// and inspect another.
///
/// # Examples
/// ```
/// use netgen_test_support::tracing::RecordingLayer;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let layer = RecordingLayer::default();
/// let subscriber = tracing_subscriber::registry().with(layer.clone());
/// tracing::subscriber::with_default(subscriber, || {
///     let _span = tracing::info_span!("demo", step = 1).entered();
///     tracing::info!(arcs = 3, "done");
/// });
/// assert_eq!(layer.spans_named("demo").len(), 1);
/// assert_eq!(layer.events_with_message("done").len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingLayer {
    journal: Arc<Mutex<Journal>>,
}

impl RecordingLayer {
    fn journal(&self) -> MutexGuard<'_, Journal> {
        // A panicking test thread must not hide what was recorded.
        self.journal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Closed spans in completion order.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.journal().spans.clone()
    }

    /// Events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        self.journal().events.clone()
    }

    /// Closed spans with the given name.
    #[must_use]
    pub fn spans_named(&self, name: &str) -> Vec<SpanRecord> {
        self.journal()
            .spans
            .iter()
            .filter(|span| span.name == name)
            .cloned()
            .collect()
    }

    /// Events whose message equals `message`.
    #[must_use]
    pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
        self.journal()
            .events
            .iter()
            .filter(|event| event.message() == Some(message))
            .cloned()
            .collect()
    }
}

/// Span state kept in the registry's extensions until the span closes.
struct OpenSpan(SpanRecord);

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut record = SpanRecord {
            name: attrs.metadata().name().to_owned(),
            fields: Fields::new(),
        };
        attrs.record(&mut FieldCollector(&mut record.fields));
        span.extensions_mut().insert(OpenSpan(record));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id)
            && let Some(OpenSpan(record)) = span.extensions_mut().get_mut::<OpenSpan>()
        {
            values.record(&mut FieldCollector(&mut record.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let closed = ctx
            .span(&id)
            .and_then(|span| span.extensions_mut().remove::<OpenSpan>());
        if let Some(OpenSpan(record)) = closed {
            self.journal().spans.push(record);
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut FieldCollector(&mut fields));
        let metadata = event.metadata();
        self.journal().events.push(EventRecord {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            fields,
        });
    }
}

struct FieldCollector<'a>(&'a mut Fields);

impl FieldCollector<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldCollector<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }
}
