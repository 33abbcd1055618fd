#![cfg(feature = "tracing")]
#![forbid(unsafe_code)]

//! Structured log events emitted by `PannableRow`.
//!
//! Triggered actions log at INFO; every other transition logs at DEBUG with
//! structured fields.
//!
//! Run:
//!   cargo test -p panrow-widgets --features tracing --test tracing_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use panrow_core::geometry::{Point, Size};
use panrow_core::gesture::PanEvent;
use panrow_widgets::{
    ActionGlyph, DetachedList, ListContext, ListController, ListDelegate, PannableRow, RowPosition,
    RowStyle, Surface, TriggeredLeftAction,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use web_time::{Duration, Instant};

// ============================================================================
// Capture layer
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> Option<&'a CapturedEvent> {
    events.iter().find(|e| e.message() == message)
}

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Default)]
struct Counter(usize);

impl TriggeredLeftAction for Counter {
    fn triggered_left_action(&mut self, _list: ListContext, _position: RowPosition) {
        self.0 += 1;
    }
}

impl ListDelegate for Counter {
    fn left_action_handler(&mut self) -> Option<&mut dyn TriggeredLeftAction> {
        Some(self as &mut dyn TriggeredLeftAction)
    }
}

#[derive(Default)]
struct Table(Counter);

impl ListController for Table {
    fn context(&self) -> ListContext {
        ListContext(3)
    }

    fn delegate(&mut self) -> Option<&mut dyn ListDelegate> {
        Some(&mut self.0 as &mut dyn ListDelegate)
    }
}

fn row() -> PannableRow {
    let mut row = PannableRow::new(RowStyle::Default, "log", Some(Surface::new("front")), None)
        .with_left_action_glyph(ActionGlyph::new("archive", Size::new(24.0, 24.0)));
    row.bind_position(RowPosition::new(1, 2));
    row
}

fn swipe(row: &mut PannableRow, list: &mut dyn ListController, t: Instant, dx: f32) {
    row.handle_pan(
        PanEvent::Began {
            origin: Point::new(100.0, 20.0),
        },
        t,
        list,
    );
    row.handle_pan(
        PanEvent::Changed {
            delta_x: dx,
            translation_x: dx,
        },
        t,
        list,
    );
    row.handle_pan(PanEvent::Ended { translation_x: dx }, t, list);
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn triggered_action_logs_at_info() {
    let events = with_captured_events(|| {
        let mut table = Table::default();
        let mut row = row();
        let t = Instant::now();
        swipe(&mut row, &mut table, t, 40.0);
        row.finish_animation(t, &mut table);
        assert_eq!(table.0.0, 1);
    });

    let triggered = find(&events, "row action triggered").expect("info event");
    assert_eq!(triggered.level, tracing::Level::INFO);
    assert_eq!(triggered.field("side"), Some("Left"));
    assert!(triggered.field("position").is_some());

    let began = find(&events, "row drag began").expect("drag began");
    assert_eq!(began.level, tracing::Level::DEBUG);
    assert_eq!(began.field("max_left"), Some("44"));
    assert_eq!(began.field("max_right"), Some("0"));

    let released = find(&events, "row released past threshold").expect("release");
    assert_eq!(released.field("side"), Some("Left"));
}

#[test]
fn below_threshold_release_logs_no_info() {
    let events = with_captured_events(|| {
        let mut table = Table::default();
        let mut row = row();
        let t = Instant::now();
        swipe(&mut row, &mut table, t, 10.0);
        row.finish_animation(t, &mut table);
    });

    assert!(find(&events, "row released below threshold").is_some());
    assert!(events.iter().all(|e| e.level != tracing::Level::INFO));
}

#[test]
fn undelivered_action_logs_reason() {
    let events = with_captured_events(|| {
        let mut row = row();
        let t = Instant::now();
        swipe(&mut row, &mut DetachedList, t, 40.0);
        row.finish_animation(t, &mut DetachedList);
    });

    let skipped = find(&events, "row action not delivered").expect("skip event");
    assert_eq!(skipped.level, tracing::Level::DEBUG);
    assert_eq!(skipped.field("reason"), Some("NoDelegate"));
    assert!(find(&events, "row action triggered").is_none());
}

#[test]
fn confirmation_lifecycle_is_logged() {
    let events = with_captured_events(|| {
        let mut table = Table::default();
        let mut row = row().with_left_requires_confirmation(true);
        let t = Instant::now();
        swipe(&mut row, &mut table, t, 40.0);
        row.finish_animation(t, &mut table);
        assert!(row.poll_timeout(t + Duration::from_secs(2)));
        row.prepare_for_reuse();
    });

    let armed = find(&events, "row armed").expect("armed");
    assert_eq!(armed.field("timeout_ms"), Some("1500"));
    assert!(find(&events, "row confirmation timed out").is_some());
    assert!(find(&events, "row prepared for reuse").is_some());
    assert!(find(&events, "row action triggered").is_none());
}
