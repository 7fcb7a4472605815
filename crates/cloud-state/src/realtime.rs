//! Synthetic real-time infrastructure metrics
//!
//! A random-walk generator produces [`MetricPoint`]s, a [`RealtimeFeed`]
//! emits them on a timer, and [`use_realtime_metrics`] ties the feed to the
//! lifetime of the calling component.

use crate::window::SlidingWindow;
use chrono::{DateTime, Duration, Utc};
use cloud_core::ChartDatum;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen_futures::spawn_local;

/// Tick interval for the metric feed
pub const DEFAULT_INTERVAL_MS: u32 = 1000;
/// Points kept on screen
pub const DEFAULT_WINDOW: usize = 20;

// ============================================================================
// METRIC POINT
// ============================================================================

/// One sample of host metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub timestamp: DateTime<Utc>,
    /// CPU utilisation, percent
    pub cpu: f64,
    /// Memory utilisation, percent
    pub memory: f64,
    /// Network throughput, MB/s
    pub network: f64,
    /// Request latency, ms
    pub latency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricField {
    Cpu,
    Memory,
    Network,
    Latency,
}

impl MetricField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Memory => "Memory",
            Self::Network => "Network",
            Self::Latency => "Latency",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Cpu | Self::Memory => "%",
            Self::Network => " MB/s",
            Self::Latency => " ms",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Cpu, Self::Memory, Self::Network, Self::Latency]
    }
}

impl ChartDatum for MetricPoint {
    type Field = MetricField;

    fn category(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    fn value(&self, field: MetricField) -> Option<f64> {
        Some(match field {
            MetricField::Cpu => self.cpu,
            MetricField::Memory => self.memory,
            MetricField::Network => self.network,
            MetricField::Latency => self.latency,
        })
    }
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Bounded random walk: (start, min, max, max step)
const WALKS: [(f64, f64, f64, f64); 4] = [
    (45.0, 5.0, 95.0, 8.0),
    (60.0, 20.0, 90.0, 4.0),
    (400.0, 0.0, 1000.0, 80.0),
    (80.0, 10.0, 250.0, 20.0),
];

/// Random-walk source of plausible metric samples
pub struct MetricGenerator<R: Rng = StdRng> {
    rng: R,
    current: [f64; 4],
}

impl MetricGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> MetricGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            current: WALKS.map(|(start, ..)| start),
        }
    }

    /// Advance every walk one step and sample at `timestamp`
    pub fn next_point(&mut self, timestamp: DateTime<Utc>) -> MetricPoint {
        for (value, (_, min, max, step)) in self.current.iter_mut().zip(WALKS) {
            let delta = self.rng.gen_range(-step..=step);
            *value = (*value + delta).clamp(min, max);
        }
        let [cpu, memory, network, latency] = self.current.map(|v| (v * 10.0).round() / 10.0);
        MetricPoint {
            timestamp,
            cpu,
            memory,
            network,
            latency,
        }
    }

    /// `count` points spaced `interval_ms` apart, the last one at `end`
    pub fn backfill(&mut self, count: usize, end: DateTime<Utc>, interval_ms: u32) -> Vec<MetricPoint> {
        let step = Duration::milliseconds(i64::from(interval_ms));
        (0..count)
            .rev()
            .map(|back| {
                let ago = i32::try_from(back).unwrap_or(i32::MAX);
                self.next_point(end - step * ago)
            })
            .collect()
    }
}

// ============================================================================
// FEED
// ============================================================================

/// Feed timing and buffer size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub interval_ms: u32,
    pub window: usize,
    /// Pre-fill the window on start so charts are not empty
    pub backfill: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            window: DEFAULT_WINDOW,
            backfill: true,
        }
    }
}

impl FeedConfig {
    pub fn new(interval_ms: u32, window: usize) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            window: window.max(1),
            ..Self::default()
        }
    }

    pub fn with_backfill(mut self, backfill: bool) -> Self {
        self.backfill = backfill;
        self
    }
}

/// Stop flag shared with a running feed loop
#[derive(Clone)]
pub struct FeedHandle {
    stopped: Arc<AtomicBool>,
}

impl FeedHandle {
    fn new() -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop the feed; the loop exits on its next tick
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        !self.is_stopped()
    }
}

/// Timer-driven metric source
pub struct RealtimeFeed;

impl RealtimeFeed {
    /// Spawn a feed with a fresh generator
    pub fn start<F>(config: FeedConfig, sink: F) -> FeedHandle
    where
        F: FnMut(MetricPoint) + 'static,
    {
        Self::start_with(config, MetricGenerator::from_entropy(), sink)
    }

    /// Spawn a feed that continues an existing generator's walk
    pub fn start_with<R, F>(config: FeedConfig, mut generator: MetricGenerator<R>, mut sink: F) -> FeedHandle
    where
        R: Rng + 'static,
        F: FnMut(MetricPoint) + 'static,
    {
        let handle = FeedHandle::new();
        let loop_handle = handle.clone();

        tracing::info!("Realtime feed started ({}ms interval)", config.interval_ms);
        spawn_local(async move {
            loop {
                TimeoutFuture::new(config.interval_ms).await;
                if !Self::tick(&loop_handle, &mut generator, &mut sink, Utc::now()) {
                    tracing::info!("Realtime feed stopped by handle");
                    break;
                }
            }
        });

        handle
    }

    /// Emit one point unless `handle` is stopped; `false` ends the loop
    fn tick<R, F>(handle: &FeedHandle, generator: &mut MetricGenerator<R>, sink: &mut F, now: DateTime<Utc>) -> bool
    where
        R: Rng,
        F: FnMut(MetricPoint),
    {
        if handle.is_stopped() {
            return false;
        }
        sink(generator.next_point(now));
        true
    }
}

// ============================================================================
// LEPTOS INTEGRATION
// ============================================================================

/// Reactive view over a running feed
#[derive(Clone, Copy)]
pub struct RealtimeMetrics {
    window: RwSignal<SlidingWindow<MetricPoint>>,
    /// When false, ticks are dropped but the timer keeps running
    pub collecting: RwSignal<bool>,
}

impl RealtimeMetrics {
    pub fn new(window: usize) -> Self {
        Self {
            window: RwSignal::new(SlidingWindow::new(window)),
            collecting: RwSignal::new(true),
        }
    }

    /// Append a point unless collection is paused
    pub fn record(&self, point: MetricPoint) {
        if !self.collecting.try_get_untracked().unwrap_or(false) {
            return;
        }
        self.window.try_update(|w| {
            w.push(point);
        });
    }

    pub fn extend(&self, points: Vec<MetricPoint>) {
        self.window.update(|w| {
            for p in points {
                w.push(p);
            }
        });
    }

    /// Oldest-first snapshot of the window
    pub fn points(&self) -> Signal<Vec<MetricPoint>> {
        let window = self.window;
        Signal::derive(move || window.with(|w| w.to_vec()))
    }

    pub fn latest(&self) -> Option<MetricPoint> {
        self.window.with(|w| w.latest().cloned())
    }

    pub fn toggle(&self) {
        self.collecting.update(|c| *c = !*c);
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting.get()
    }

    pub fn clear(&self) {
        self.window.update(|w| w.clear());
    }
}

/// Start a feed owned by the current reactive scope.
///
/// The feed is stopped when the scope is cleaned up.
pub fn use_realtime_metrics(config: FeedConfig) -> RealtimeMetrics {
    let metrics = RealtimeMetrics::new(config.window);
    let mut generator = MetricGenerator::from_entropy();
    if config.backfill {
        metrics.extend(generator.backfill(config.window, Utc::now(), config.interval_ms));
    }

    let handle = RealtimeFeed::start_with(config, generator, move |point| metrics.record(point));
    on_cleanup(move || handle.stop());

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MetricGenerator<StdRng> {
        MetricGenerator::new(StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_generator_stays_in_bounds() {
        let mut generator = seeded();
        let now = Utc::now();
        for _ in 0..500 {
            let p = generator.next_point(now);
            assert!((5.0..=95.0).contains(&p.cpu));
            assert!((20.0..=90.0).contains(&p.memory));
            assert!((0.0..=1000.0).contains(&p.network));
            assert!((10.0..=250.0).contains(&p.latency));
        }
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let now = Utc::now();
        let a = seeded().backfill(5, now, 1000);
        let b = seeded().backfill(5, now, 1000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_backfill_spacing() {
        let end = Utc::now();
        let points = seeded().backfill(4, end, 1500);
        assert_eq!(points.len(), 4);
        assert_eq!(points[3].timestamp, end);
        assert_eq!(points[3].timestamp - points[0].timestamp, Duration::milliseconds(4500));
    }

    #[test]
    fn test_metric_point_datum() {
        let p = seeded().next_point(Utc::now());
        assert_eq!(p.value(MetricField::Cpu), Some(p.cpu));
        assert_eq!(p.value(MetricField::Latency), Some(p.latency));
        assert_eq!(p.category().len(), "12:00:00".len());
        assert_eq!(MetricField::all().len(), 4);
    }

    #[test]
    fn test_feed_handle() {
        let handle = FeedHandle::new();
        let shared = handle.clone();
        assert!(handle.is_running());

        shared.stop();
        assert!(handle.is_stopped());
    }

    #[test]
    fn test_stopped_feed_appends_nothing() {
        let owner = Owner::new();
        owner.with(|| {
            let metrics = RealtimeMetrics::new(20);
            let handle = FeedHandle::new();
            let mut generator = seeded();
            let mut sink = move |p: MetricPoint| metrics.record(p);

            assert!(RealtimeFeed::tick(&handle, &mut generator, &mut sink, Utc::now()));
            assert!(RealtimeFeed::tick(&handle, &mut generator, &mut sink, Utc::now()));
            assert_eq!(metrics.points().get_untracked().len(), 2);

            handle.clone().stop();
            assert!(!RealtimeFeed::tick(&handle, &mut generator, &mut sink, Utc::now()));
            assert_eq!(metrics.points().get_untracked().len(), 2);
        });
    }

    #[test]
    fn test_feed_config() {
        let config = FeedConfig::default();
        assert_eq!((config.interval_ms, config.window), (1000, 20));
        assert_eq!(FeedConfig::new(0, 0).window, 1);
    }

    #[test]
    fn test_recording_window_and_pause() {
        let owner = Owner::new();
        owner.with(|| {
            let metrics = RealtimeMetrics::new(20);
            let mut generator = seeded();
            let points = generator.backfill(25, Utc::now(), 1000);
            for p in points.iter().cloned() {
                metrics.record(p);
            }

            let kept = metrics.points().get_untracked();
            assert_eq!(kept.len(), 20);
            assert_eq!(kept, points[5..].to_vec());

            metrics.toggle();
            metrics.record(generator.next_point(Utc::now()));
            assert_eq!(metrics.latest(), points.last().cloned());
        });
    }
}
