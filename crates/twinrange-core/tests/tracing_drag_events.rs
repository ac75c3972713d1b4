#![cfg(feature = "tracing")]
#![forbid(unsafe_code)]

//! Tracing output of the drag tracker.
//!
//! Run:
//!   cargo test -p twinrange-core --features tracing --test tracing_drag_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use twinrange_core::Handle;
use twinrange_core::drag::PointerDragTracker;
use twinrange_core::event::{Event, TouchEvent, TouchPhase, TouchPoint};

#[derive(Debug, Clone)]
struct CapturedEvent {
    message: String,
    fields: HashMap<String, String>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct Capture(Arc<Mutex<Vec<CapturedEvent>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.get("message").cloned().unwrap_or_default();
        self.0.lock().unwrap().push(CapturedEvent { message, fields });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(Capture(Arc::clone(&events)));
    tracing::subscriber::with_default(subscriber, f);
    let out = events.lock().unwrap().clone();
    out
}

fn touch(phase: TouchPhase, id: u64) -> Event {
    Event::Touch(TouchEvent::single(phase, TouchPoint::new(id, 1.0, 1.0)))
}

#[test]
fn two_finger_session_is_logged() {
    let events = with_capture(|| {
        let mut tracker = PointerDragTracker::default();
        tracker.process(&touch(TouchPhase::Start, 1), Some(Handle::Min));
        tracker.process(&touch(TouchPhase::Start, 2), Some(Handle::Max));
        tracker.process(&touch(TouchPhase::End, 1), None);
        tracker.process(&touch(TouchPhase::End, 2), None);
    });

    let starts: Vec<_> = events
        .iter()
        .filter(|e| e.message == "drag session start")
        .collect();
    assert_eq!(starts.len(), 2);
    assert_eq!(starts[0].fields.get("handle").map(String::as_str), Some("min"));
    assert_eq!(starts[0].fields.get("touch").map(String::as_str), Some("1"));
    assert_eq!(starts[1].fields.get("handle").map(String::as_str), Some("max"));

    let releases = events
        .iter()
        .filter(|e| e.message == "drag session release")
        .count();
    assert_eq!(releases, 2);

    let ends: Vec<_> = events.iter().filter(|e| e.message == "drag end").collect();
    assert_eq!(ends.len(), 1, "strict-zero policy ends once");
    assert_eq!(ends[0].fields.get("remaining").map(String::as_str), Some("0"));
}

#[test]
fn ignored_second_finger_is_not_logged() {
    let events = with_capture(|| {
        let mut tracker = PointerDragTracker::default();
        tracker.process(&touch(TouchPhase::Start, 1), Some(Handle::Min));
        tracker.process(&touch(TouchPhase::Start, 2), Some(Handle::Min));
    });
    let starts = events
        .iter()
        .filter(|e| e.message == "drag session start")
        .count();
    assert_eq!(starts, 1);
}
