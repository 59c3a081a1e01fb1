use std::sync::{Arc, Mutex};
use std::time::Duration;

use insights::{EventRecorder, InsightsError, Mode, Properties, TelemetrySink};

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<(String, Properties)>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<(String, Properties)> {
        self.events.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingSink {
    fn track_event(&self, name: &str, properties: &Properties) {
        self.events
            .lock()
            .unwrap()
            .push((name.to_string(), properties.clone()));
    }

    fn set_user_properties(&self, _properties: &Properties) {}
}

fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn stop_appends_one_duration_property() {
    let sink = Arc::new(RecordingSink::default());
    let mut recorder = EventRecorder::new("Load", Properties::new(), sink.clone(), Mode::Live);

    recorder.start();
    recorder.stop().unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let (name, properties) = &events[0];
    assert_eq!(name, "Load");
    assert_eq!(properties.len(), 1, "only Duration should be present");

    let duration = properties.get("Duration").expect("Duration property");
    let secs = duration
        .strip_suffix('s')
        .expect("trailing unit marker")
        .parse::<u64>()
        .expect("non-negative integer seconds");
    assert_eq!(secs, 0, "no time elapsed");
}

#[tokio::test]
async fn stop_before_start_is_invalid_state() {
    let sink = Arc::new(RecordingSink::default());
    let mut recorder = EventRecorder::new(
        "Load",
        props(&[("screen", "home")]),
        sink.clone(),
        Mode::Live,
    );

    let err = recorder.stop().unwrap_err();
    assert!(matches!(err, InsightsError::InvalidState));
    assert!(sink.events().is_empty(), "failed stop must not transmit");

    let mut bare = EventRecorder::new("", Properties::new(), sink.clone(), Mode::Live);
    assert!(matches!(bare.stop(), Err(InsightsError::InvalidState)));
}

#[tokio::test(start_paused = true)]
async fn login_scenario_reports_three_seconds() {
    let sink = Arc::new(RecordingSink::default());
    let mut recorder = EventRecorder::new(
        "Login",
        props(&[("key", "value")]),
        sink.clone(),
        Mode::Live,
    );

    recorder.start();
    tokio::time::advance(Duration::from_secs(3)).await;
    recorder.stop().unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    let (name, properties) = &events[0];
    assert_eq!(name, "Login");
    assert_eq!(properties, &props(&[("key", "value"), ("Duration", "3s")]));
}

#[tokio::test(start_paused = true)]
async fn second_start_overwrites_the_first() {
    let sink = Arc::new(RecordingSink::default());
    let mut recorder = EventRecorder::new("Sync", Properties::new(), sink.clone(), Mode::Live);

    recorder.start();
    tokio::time::advance(Duration::from_secs(5)).await;
    recorder.start();
    tokio::time::advance(Duration::from_secs(2)).await;
    recorder.stop().unwrap();

    let events = sink.events();
    assert_eq!(events[0].1.get("Duration").map(String::as_str), Some("2s"));
}

#[tokio::test(start_paused = true)]
async fn stop_twice_transmits_twice_with_a_single_duration_key() {
    let sink = Arc::new(RecordingSink::default());
    let mut recorder = EventRecorder::new("Export", Properties::new(), sink.clone(), Mode::Live);

    recorder.start();
    tokio::time::advance(Duration::from_secs(1)).await;
    recorder.stop().unwrap();
    tokio::time::advance(Duration::from_secs(2)).await;
    recorder.stop().unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 2, "stop is not idempotent");
    assert_eq!(events[0].1.get("Duration").map(String::as_str), Some("1s"));
    // Map semantics: the key is overwritten, not duplicated.
    assert_eq!(events[1].1.get("Duration").map(String::as_str), Some("3s"));
    assert_eq!(events[1].1.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn debug_mode_stop_transmits_nothing() {
    let sink = Arc::new(RecordingSink::default());
    let mut recorder = EventRecorder::new("Load", Properties::new(), sink.clone(), Mode::Debug);

    recorder.start();
    tokio::time::advance(Duration::from_secs(4)).await;
    recorder.stop().unwrap();

    assert!(sink.events().is_empty());
    // The record itself is still finalized, only transmission is suppressed.
    assert_eq!(
        recorder.properties().get("Duration").map(String::as_str),
        Some("4s")
    );
}
