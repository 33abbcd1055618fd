#![forbid(unsafe_code)]

//! Horizontal pan recognition: transforms raw pointer events into pan events.
//!
//! [`PanRecognizer`] is a stateful processor that converts raw [`Event`]
//! sequences (press, move, release) into [`PanEvent`]s that a pannable row
//! consumes. It also settles the conflict with the host list's own scroll
//! handling: a sequence whose motion is predominantly vertical is yielded
//! and never claimed.
//!
//! # State Machine
//!
//! ```text
//! Idle ──Down──▶ Pending ──Move past slop, |dx| >= |dy|──▶ Panning ──Up──▶ Idle (Ended)
//!                   │                                         └──Cancel──▶ Idle (Cancelled)
//!                   ├──Move past slop, |dy| > |dx|──▶ Yielded ──Up──▶ Idle
//!                   └──Up──▶ Idle (Tap)
//! ```
//!
//! # Invariants
//!
//! 1. `Began` is always followed by `Ended` or `Cancelled` before another
//!    `Began` is emitted.
//! 2. A yielded sequence never emits `Began`, `Changed` or `Tap`.
//! 3. `Tap` and `Began` never both emit for the same press.
//! 4. After `reset()`, the recognizer is idle and emits nothing for the
//!    remainder of the interrupted sequence.
//!
//! # Failure Modes
//!
//! - `Move`/`Up` without a prior `Down` (e.g. the press landed on another
//!   view) is ignored.
//! - If focus is lost mid-pan, `Cancelled` is emitted.
//! - A `Down` while panning (the release was lost) emits `Cancelled` and
//!   starts a new sequence.

use web_time::{Duration, Instant};

use crate::event::{Event, PointerKind};
use crate::geometry::Point;

/// Touch slop in logical pixels.
///
/// Movement below this distance from the press point is treated as finger
/// jitter; crossing it commits the sequence to either a pan or a yield.
pub const DEFAULT_SLOP: f32 = 8.0;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for pan recognition.
#[derive(Debug, Clone)]
pub struct PanConfig {
    /// Minimum euclidean distance before a pan or yield is decided (default: 8.0).
    pub slop: f32,
    /// A press held longer than this never becomes a tap (default: 500ms).
    pub tap_timeout: Duration,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            slop: DEFAULT_SLOP,
            tap_timeout: Duration::from_millis(500),
        }
    }
}

impl PanConfig {
    #[must_use]
    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop.max(0.0);
        self
    }

    #[must_use]
    pub fn with_tap_timeout(mut self, timeout: Duration) -> Self {
        self.tap_timeout = timeout;
        self
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Recognized pan gesture events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanEvent {
    /// Horizontal pan claimed, starting at `origin`.
    Began { origin: Point },

    /// Horizontal motion. `delta_x` is the change since the previous event;
    /// `translation_x` is the cumulative change since the press.
    Changed { delta_x: f32, translation_x: f32 },

    /// Pointer released after a pan.
    Ended { translation_x: f32 },

    /// Pan interrupted (pointer cancel or focus loss).
    Cancelled,

    /// Motion was predominantly vertical; the sequence belongs to the host
    /// list's scroll/selection handling.
    Yielded,

    /// Press and release without crossing the slop.
    Tap { pos: Point },
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackState {
    Pending,
    Panning,
    Yielded,
}

/// Tracks one pointer sequence.
#[derive(Debug, Clone)]
struct PanTracker {
    start_pos: Point,
    start_time: Instant,
    last_x: f32,
    state: TrackState,
}

// ---------------------------------------------------------------------------
// PanRecognizer
// ---------------------------------------------------------------------------

/// Stateful horizontal pan recognizer.
///
/// Call [`process`](PanRecognizer::process) for each incoming [`Event`].
#[derive(Debug, Clone, Default)]
pub struct PanRecognizer {
    config: PanConfig,
    tracker: Option<PanTracker>,
}

impl PanRecognizer {
    /// Create a new recognizer with the given configuration.
    #[must_use]
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            tracker: None,
        }
    }

    /// Process a raw event, returning any pan events produced.
    ///
    /// Most events produce 0 or 1 pan events. The move that crosses the slop
    /// produces `Began` followed by `Changed`.
    pub fn process(&mut self, event: &Event, now: Instant) -> Vec<PanEvent> {
        let mut out = Vec::with_capacity(2);

        match event {
            Event::Pointer(pointer) => match pointer.kind {
                PointerKind::Down => self.on_down(pointer.pos, now, &mut out),
                PointerKind::Move => self.on_move(pointer.pos, &mut out),
                PointerKind::Up => self.on_up(pointer.pos, now, &mut out),
                PointerKind::Cancel => self.on_cancel(&mut out),
            },
            Event::Focus(false) => self.on_cancel(&mut out),
            Event::Focus(true) | Event::Tick => {}
        }

        out
    }

    /// Whether a horizontal pan is currently claimed.
    #[inline]
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.state() == Some(TrackState::Panning)
    }

    /// Whether the current sequence was handed over to the host.
    #[inline]
    #[must_use]
    pub fn is_yielded(&self) -> bool {
        self.state() == Some(TrackState::Yielded)
    }

    /// Reset to idle without emitting anything.
    pub fn reset(&mut self) {
        self.tracker = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Update the configuration. Takes effect for the next press.
    pub fn set_config(&mut self, config: PanConfig) {
        self.config = config;
    }

    fn state(&self) -> Option<TrackState> {
        self.tracker.as_ref().map(|t| t.state)
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl PanRecognizer {
    fn on_down(&mut self, pos: Point, now: Instant, out: &mut Vec<PanEvent>) {
        // A press without a matching release terminates the open pan.
        self.on_cancel(out);
        self.tracker = Some(PanTracker {
            start_pos: pos,
            start_time: now,
            last_x: pos.x,
            state: TrackState::Pending,
        });
    }

    fn on_move(&mut self, pos: Point, out: &mut Vec<PanEvent>) {
        let Some(ref mut tracker) = self.tracker else {
            return;
        };

        match tracker.state {
            TrackState::Pending => {
                if tracker.start_pos.distance(pos) < self.config.slop {
                    return;
                }
                let dx = pos.x - tracker.start_pos.x;
                let dy = pos.y - tracker.start_pos.y;
                if dy.abs() > dx.abs() {
                    tracker.state = TrackState::Yielded;
                    out.push(PanEvent::Yielded);
                    return;
                }
                tracker.state = TrackState::Panning;
                tracker.last_x = pos.x;
                out.push(PanEvent::Began {
                    origin: tracker.start_pos,
                });
                out.push(PanEvent::Changed {
                    delta_x: dx,
                    translation_x: dx,
                });
            }
            TrackState::Panning => {
                let delta_x = pos.x - tracker.last_x;
                tracker.last_x = pos.x;
                if delta_x != 0.0 {
                    out.push(PanEvent::Changed {
                        delta_x,
                        translation_x: pos.x - tracker.start_pos.x,
                    });
                }
            }
            TrackState::Yielded => {}
        }
    }

    fn on_up(&mut self, pos: Point, now: Instant, out: &mut Vec<PanEvent>) {
        let Some(tracker) = self.tracker.take() else {
            return;
        };

        match tracker.state {
            TrackState::Panning => out.push(PanEvent::Ended {
                translation_x: pos.x - tracker.start_pos.x,
            }),
            TrackState::Pending => {
                if now.duration_since(tracker.start_time) <= self.config.tap_timeout {
                    out.push(PanEvent::Tap { pos });
                }
            }
            TrackState::Yielded => {}
        }
    }

    fn on_cancel(&mut self, out: &mut Vec<PanEvent>) {
        if let Some(tracker) = self.tracker.take()
            && tracker.state == TrackState::Panning
        {
            out.push(PanEvent::Cancelled);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
