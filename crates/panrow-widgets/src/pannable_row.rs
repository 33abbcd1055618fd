#![forbid(unsafe_code)]

//! A list row whose front surface can be dragged sideways to reveal an
//! action glyph on the back surface.
//!
//! # State Machine
//!
//! ```text
//! Idle ──Began──▶ Dragging ──Ended──▶ Releasing ──▶ Idle              (below threshold, or after firing)
//!                    │                    └───────▶ Armed ──confirm──▶ Releasing (fires first)
//!                    └──Cancelled──▶ Releasing        └──timeout / tap elsewhere / new drag──▶ Releasing
//! ```
//!
//! # Invariants
//!
//! 1. At most one side is armed for confirmation at any time.
//! 2. Front displacement stays within `[-max_right, +max_left]`, where a
//!    side's max is `glyph.width + 2 × margin`, or 0 without a glyph.
//! 3. A notification fires at most once per release or confirmation, and
//!    never while a drag is in progress.
//! 4. After `prepare_for_reuse()` the row is idle at displacement 0 with no
//!    armed side and no live timer token, whatever it was doing before.
//!
//! # Failure Modes
//!
//! None are surfaced. A side without a glyph has max 0, so its threshold
//! is unreachable; a confirmation flag on such a side is inert. A row
//! without a front surface ignores all input.

use panrow_core::animation::{Animation, Spring};
use panrow_core::event::Event;
use panrow_core::geometry::{Point, Rect, Size};
use panrow_core::gesture::{PanConfig, PanEvent, PanRecognizer};
use web_time::{Duration, Instant};

use crate::config::{DEFAULT_CONFIRMATION_TIMEOUT, PanningMode, RowStyle, RowTuning, TuningError};
use crate::confirmation::{ConfirmationTimer, TimerToken};
use crate::delegate::{self, ListController, RowPosition};
use crate::glyph::{ActionGlyph, ActionSide};
use crate::surface::{BackSurface, RowLayout, Surface};

/// Bounds a row assumes until the host lays it out.
pub const DEFAULT_ROW_SIZE: Size = Size::new(320.0, 44.0);

/// Distance (logical pixels) from target at which the settle spring rests.
const SETTLE_REST_THRESHOLD: f64 = 0.25;

/// Velocity (logical pixels/sec) below which the settle spring may rest.
const SETTLE_VELOCITY_THRESHOLD: f64 = 1.0;

/// Observable phase of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowPhase {
    Idle,
    Dragging,
    Releasing,
    Armed(ActionSide),
}

/// What the host should do with the pointer sequence it just delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureDisposition {
    /// The row owns the sequence.
    Claimed,
    /// Vertical motion: hand the sequence to the list's scroll/selection.
    Yielded,
    /// The row took no interest.
    Ignored,
}

// ---------------------------------------------------------------------------
// Transient state
// ---------------------------------------------------------------------------

/// Configuration captured when a drag begins.
#[derive(Debug, Clone, Copy)]
struct PanLimits {
    max_left: f32,
    max_right: f32,
    mode: PanningMode,
    left_requires_confirmation: bool,
    right_requires_confirmation: bool,
    threshold_fraction: f32,
    confirmation_timeout: Duration,
}

impl PanLimits {
    fn max(&self, side: ActionSide) -> f32 {
        match side {
            ActionSide::Left => self.max_left,
            ActionSide::Right => self.max_right,
        }
    }

    fn requires_confirmation(&self, side: ActionSide) -> bool {
        match side {
            ActionSide::Left => self.left_requires_confirmation,
            ActionSide::Right => self.right_requires_confirmation,
        }
    }

    /// Front displacement and glyph excess for a raw cumulative drag.
    fn resolve(&self, raw: f32) -> (f32, f32) {
        let displacement = raw.clamp(-self.max_right, self.max_left);
        let excess = raw - displacement;
        let glyph_offset = match self.mode {
            PanningMode::MoveImage
                if (excess > 0.0 && self.max_left > 0.0)
                    || (excess < 0.0 && self.max_right > 0.0) =>
            {
                excess
            }
            _ => 0.0,
        };
        (displacement, glyph_offset)
    }

    /// Side a release at `displacement` commits to, if any.
    fn committed_side(&self, displacement: f32) -> Option<ActionSide> {
        let side = ActionSide::revealed_by(displacement)?;
        let max = self.max(side);
        if max <= 0.0 {
            return None;
        }
        (displacement.abs() >= self.threshold_fraction * max).then_some(side)
    }
}

/// Effect applied when a settle animation arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Arrival {
    Rest,
    Fire(ActionSide),
    Arm(ActionSide, Duration),
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Dragging { raw: f32, limits: PanLimits },
    /// `span` is the closed interval between the start and the target.
    Releasing {
        spring: Spring,
        span: (f32, f32),
        arrival: Arrival,
    },
    Armed(ActionSide),
}

// ---------------------------------------------------------------------------
// PannableRow
// ---------------------------------------------------------------------------

/// A list row with a draggable front over a stationary back.
///
/// The host feeds it pointer events ([`handle_event`](Self::handle_event))
/// or pre-recognized pans ([`handle_pan`](Self::handle_pan)), advances it
/// every frame ([`advance`](Self::advance)), and delivers confirmation
/// timeouts ([`on_timer`](Self::on_timer) or
/// [`poll_timeout`](Self::poll_timeout)). Triggered actions reach the list's
/// delegate through the [`ListController`] passed to each call.
#[derive(Debug, Clone)]
pub struct PannableRow {
    style: RowStyle,
    reuse_identifier: String,
    front: Option<Surface>,
    back: BackSurface,
    left_requires_confirmation: bool,
    right_requires_confirmation: bool,
    confirmation_timeout: Duration,
    panning_mode: PanningMode,
    tuning: RowTuning,
    bounds: Rect,
    position: Option<RowPosition>,
    recognizer: PanRecognizer,
    timer: ConfirmationTimer,
    phase: Phase,
    displacement: f32,
    glyph_offset: f32,
}

impl PannableRow {
    /// Create a row.
    ///
    /// A `None` front disables panning for this row. A `None` back is
    /// replaced by [`BackSurface::default`].
    #[must_use]
    pub fn new(
        style: RowStyle,
        reuse_identifier: impl Into<String>,
        front: Option<Surface>,
        back: Option<BackSurface>,
    ) -> Self {
        Self {
            style,
            reuse_identifier: reuse_identifier.into(),
            front,
            back: back.unwrap_or_default(),
            left_requires_confirmation: false,
            right_requires_confirmation: false,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            panning_mode: PanningMode::default(),
            tuning: RowTuning::default(),
            bounds: Rect::from_size(DEFAULT_ROW_SIZE),
            position: None,
            recognizer: PanRecognizer::default(),
            timer: ConfirmationTimer::new(),
            phase: Phase::Idle,
            displacement: 0.0,
            glyph_offset: 0.0,
        }
    }

    // --- Builders ----------------------------------------------------------

    #[must_use]
    pub fn with_left_action_glyph(mut self, glyph: ActionGlyph) -> Self {
        self.set_left_action_glyph(Some(glyph));
        self
    }

    #[must_use]
    pub fn with_right_action_glyph(mut self, glyph: ActionGlyph) -> Self {
        self.set_right_action_glyph(Some(glyph));
        self
    }

    #[must_use]
    pub fn with_left_requires_confirmation(mut self, required: bool) -> Self {
        self.left_requires_confirmation = required;
        self
    }

    #[must_use]
    pub fn with_right_requires_confirmation(mut self, required: bool) -> Self {
        self.right_requires_confirmation = required;
        self
    }

    #[must_use]
    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_panning_mode(mut self, mode: PanningMode) -> Self {
        self.panning_mode = mode;
        self
    }

    #[must_use]
    pub fn with_pan_config(mut self, config: PanConfig) -> Self {
        self.recognizer.set_config(config);
        self
    }

    // --- Configuration -----------------------------------------------------
    //
    // Setters only affect gestures that begin after the call.

    pub fn set_left_action_glyph(&mut self, glyph: Option<ActionGlyph>) {
        self.back.set_glyph(ActionSide::Left, glyph);
    }

    pub fn set_right_action_glyph(&mut self, glyph: Option<ActionGlyph>) {
        self.back.set_glyph(ActionSide::Right, glyph);
    }

    pub fn set_left_requires_confirmation(&mut self, required: bool) {
        self.left_requires_confirmation = required;
    }

    pub fn set_right_requires_confirmation(&mut self, required: bool) {
        self.right_requires_confirmation = required;
    }

    pub fn set_confirmation_timeout(&mut self, timeout: Duration) {
        self.confirmation_timeout = timeout;
    }

    pub fn set_panning_mode(&mut self, mode: PanningMode) {
        self.panning_mode = mode;
    }

    /// Replace the tuning constants.
    ///
    /// # Errors
    ///
    /// Rejects out-of-range tuning and keeps the current one.
    pub fn set_tuning(&mut self, tuning: RowTuning) -> Result<(), TuningError> {
        tuning.validate()?;
        self.tuning = tuning;
        Ok(())
    }

    /// Row bounds used for layout and for hit-testing the revealed region.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Bind the row to a list position (host `configure` step).
    pub fn bind_position(&mut self, position: RowPosition) {
        self.position = Some(position);
    }

    // --- Accessors ---------------------------------------------------------

    #[must_use]
    pub fn style(&self) -> RowStyle {
        self.style
    }

    #[must_use]
    pub fn reuse_identifier(&self) -> &str {
        &self.reuse_identifier
    }

    #[must_use]
    pub fn front_surface(&self) -> Option<&Surface> {
        self.front.as_ref()
    }

    #[must_use]
    pub fn back_surface(&self) -> &BackSurface {
        &self.back
    }

    #[must_use]
    pub fn left_action_glyph(&self) -> Option<&ActionGlyph> {
        self.back.glyph(ActionSide::Left)
    }

    #[must_use]
    pub fn right_action_glyph(&self) -> Option<&ActionGlyph> {
        self.back.glyph(ActionSide::Right)
    }

    #[must_use]
    pub fn left_requires_confirmation(&self) -> bool {
        self.left_requires_confirmation
    }

    #[must_use]
    pub fn right_requires_confirmation(&self) -> bool {
        self.right_requires_confirmation
    }

    #[must_use]
    pub fn confirmation_timeout(&self) -> Duration {
        self.confirmation_timeout
    }

    #[must_use]
    pub fn panning_mode(&self) -> PanningMode {
        self.panning_mode
    }

    #[must_use]
    pub fn tuning(&self) -> &RowTuning {
        &self.tuning
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn position(&self) -> Option<RowPosition> {
        self.position
    }

    /// Whether a drag can reveal anything: a front surface and at least
    /// one glyph.
    #[must_use]
    pub fn is_pannable(&self) -> bool {
        self.front.is_some()
            && (self.left_action_glyph().is_some() || self.right_action_glyph().is_some())
    }

    #[must_use]
    pub fn phase(&self) -> RowPhase {
        match self.phase {
            Phase::Idle => RowPhase::Idle,
            Phase::Dragging { .. } => RowPhase::Dragging,
            Phase::Releasing { .. } => RowPhase::Releasing,
            Phase::Armed(side) => RowPhase::Armed(side),
        }
    }

    /// Current front-surface displacement (positive = dragged right).
    #[must_use]
    pub fn displacement(&self) -> f32 {
        self.displacement
    }

    /// Glyph displacement past the reveal edge (`MoveImage` only).
    #[must_use]
    pub fn glyph_offset(&self) -> f32 {
        self.glyph_offset
    }

    #[must_use]
    pub fn armed_side(&self) -> Option<ActionSide> {
        match self.phase {
            Phase::Armed(side) => Some(side),
            _ => None,
        }
    }

    /// Token and deadline of the armed confirmation, for hosts that
    /// schedule a callback instead of polling.
    #[must_use]
    pub fn pending_timeout(&self) -> Option<(TimerToken, Instant)> {
        self.timer.pending()
    }

    /// Max reveal for `side` under the current configuration.
    #[must_use]
    pub fn max_reveal(&self, side: ActionSide) -> f32 {
        self.back
            .glyph(side)
            .map_or(0.0, |g| g.size().width + 2.0 * self.tuning.glyph_margin)
    }

    /// Layout within the current bounds.
    #[must_use]
    pub fn layout(&self) -> RowLayout {
        self.layout_in(self.bounds)
    }

    /// Layout within arbitrary bounds.
    #[must_use]
    pub fn layout_in(&self, bounds: Rect) -> RowLayout {
        RowLayout::compute(bounds, self.front.as_ref(), &self.back, self.tuning.glyph_margin)
    }

    // --- Input -------------------------------------------------------------

    /// Feed a raw event through the row's own pan recognizer.
    pub fn handle_event(
        &mut self,
        event: &Event,
        now: Instant,
        list: &mut dyn ListController,
    ) -> GestureDisposition {
        // Nothing to reveal: leave the sequence to the list unless a
        // settle or confirmation is still running.
        if self.front.is_none() || (!self.is_pannable() && self.phase() == RowPhase::Idle) {
            return GestureDisposition::Ignored;
        }

        let mut disposition = GestureDisposition::Ignored;
        for pan in self.recognizer.process(event, now) {
            if pan == PanEvent::Yielded {
                disposition = GestureDisposition::Yielded;
            } else if self.handle_pan(pan, now, list) {
                disposition = GestureDisposition::Claimed;
            }
        }

        if disposition == GestureDisposition::Ignored {
            if self.recognizer.is_panning() {
                disposition = GestureDisposition::Claimed;
            } else if self.recognizer.is_yielded() {
                disposition = GestureDisposition::Yielded;
            }
        }
        disposition
    }

    /// Apply one recognized pan event. Returns whether the row consumed it.
    pub fn handle_pan(
        &mut self,
        pan: PanEvent,
        now: Instant,
        list: &mut dyn ListController,
    ) -> bool {
        if self.front.is_none() {
            return false;
        }

        match pan {
            PanEvent::Began { .. } => {
                if !self.is_pannable() {
                    return false;
                }
                self.begin_drag(list);
                true
            }
            PanEvent::Changed { delta_x, .. } => self.drag_by(delta_x),
            PanEvent::Ended { .. } => self.release(),
            PanEvent::Cancelled => {
                if !matches!(self.phase, Phase::Dragging { .. }) {
                    return false;
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(displacement = self.displacement, "row drag cancelled");
                self.settle_to(0.0, Arrival::Rest);
                true
            }
            PanEvent::Tap { pos } => self.tap(pos, now, list),
            PanEvent::Yielded => false,
        }
    }

    /// Confirm the armed action programmatically.
    ///
    /// Returns `true` if an armed confirmation was resolved by this call.
    /// After the deadline the confirmation counts as timed out and nothing
    /// fires.
    pub fn confirm(&mut self, now: Instant, list: &mut dyn ListController) -> bool {
        let Phase::Armed(side) = self.phase else {
            return false;
        };
        if !self.timer.is_open(now) {
            self.timer.cancel();
            self.time_out(side);
            return false;
        }
        self.timer.cancel();
        self.notify(side, list);
        self.settle_to(0.0, Arrival::Rest);
        true
    }

    /// Abandon an armed confirmation without firing.
    pub fn cancel_confirmation(&mut self) -> bool {
        if !matches!(self.phase, Phase::Armed(_)) {
            return false;
        }
        self.timer.cancel();
        #[cfg(feature = "tracing")]
        tracing::debug!("row confirmation cancelled");
        self.settle_to(0.0, Arrival::Rest);
        true
    }

    // --- Time --------------------------------------------------------------

    /// Advance the settle animation by one frame.
    pub fn advance(&mut self, dt: Duration, now: Instant, list: &mut dyn ListController) {
        let Phase::Releasing {
            ref mut spring,
            span: (lo, hi),
            arrival,
        } = self.phase
        else {
            return;
        };
        spring.tick(dt);
        let position = spring.value().clamp(lo, hi);
        let at_rest = spring.is_complete();
        self.set_displacement(position, 0.0);
        if at_rest {
            self.arrive(arrival, now, list);
        }
    }

    /// Jump any in-flight animation to its end, applying every effect on
    /// the way (fire, arm, rest).
    pub fn finish_animation(&mut self, now: Instant, list: &mut dyn ListController) {
        while let Phase::Releasing {
            ref mut spring,
            arrival,
            ..
        } = self.phase
        {
            spring.snap_to_target();
            let target = spring.value();
            self.set_displacement(target, 0.0);
            self.arrive(arrival, now, list);
        }
    }

    /// Scheduled timeout callback. Stale tokens are ignored.
    pub fn on_timer(&mut self, token: TimerToken, now: Instant) -> bool {
        match self.timer.fire(token, now) {
            Some(side) if self.armed_side() == Some(side) => {
                self.time_out(side);
                true
            }
            _ => false,
        }
    }

    /// Polling alternative to [`on_timer`](Self::on_timer).
    pub fn poll_timeout(&mut self, now: Instant) -> bool {
        match self.timer.expired(now) {
            Some(side) if self.armed_side() == Some(side) => {
                self.time_out(side);
                true
            }
            _ => false,
        }
    }

    // --- Lifecycle ---------------------------------------------------------

    /// Reset every piece of transient state before the host reuses this row
    /// for another item. Configuration is kept; the position binding is not.
    pub fn prepare_for_reuse(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            phase = ?self.phase(),
            displacement = self.displacement,
            "row prepared for reuse"
        );
        self.timer.cancel();
        self.recognizer.reset();
        self.phase = Phase::Idle;
        self.position = None;
        self.set_displacement(0.0, 0.0);
    }
}

// ---------------------------------------------------------------------------
// Internal transitions
// ---------------------------------------------------------------------------

impl PannableRow {
    fn limits(&self) -> PanLimits {
        PanLimits {
            max_left: self.max_reveal(ActionSide::Left),
            max_right: self.max_reveal(ActionSide::Right),
            mode: self.panning_mode,
            left_requires_confirmation: self.left_requires_confirmation,
            right_requires_confirmation: self.right_requires_confirmation,
            threshold_fraction: self.tuning.threshold_fraction,
            confirmation_timeout: self.confirmation_timeout,
        }
    }

    fn begin_drag(&mut self, list: &mut dyn ListController) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Armed(_) => {
                // A new drag resolves the pending confirmation as a timeout.
                self.timer.cancel();
            }
            Phase::Releasing {
                arrival: Arrival::Fire(side),
                ..
            } => {
                // Commit was already decided on release.
                self.notify(side, list);
            }
            Phase::Idle | Phase::Dragging { .. } | Phase::Releasing { .. } => {}
        }

        let limits = self.limits();
        // Grab the front where it currently is.
        let raw = self.displacement.clamp(-limits.max_right, limits.max_left);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            max_left = limits.max_left,
            max_right = limits.max_right,
            mode = ?limits.mode,
            start = raw,
            "row drag began"
        );
        self.set_displacement(raw, 0.0);
        self.phase = Phase::Dragging { raw, limits };
    }

    fn drag_by(&mut self, delta_x: f32) -> bool {
        let Phase::Dragging {
            ref mut raw,
            limits,
        } = self.phase
        else {
            return false;
        };
        *raw += delta_x;
        let (displacement, glyph_offset) = limits.resolve(*raw);
        // Only excess the glyph shows is kept, so reversing moves the
        // front at once.
        *raw = displacement + glyph_offset;
        self.set_displacement(displacement, glyph_offset);
        true
    }

    fn release(&mut self) -> bool {
        let Phase::Dragging { limits, .. } = self.phase else {
            return false;
        };
        let displacement = self.displacement;
        self.glyph_offset = 0.0;
        self.back.set_glyph_offset(0.0);

        match limits.committed_side(displacement) {
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(displacement, "row released below threshold");
                self.settle_to(0.0, Arrival::Rest);
            }
            Some(side) => {
                let target = side.sign() * limits.max(side);
                let arrival = if limits.requires_confirmation(side) {
                    Arrival::Arm(side, limits.confirmation_timeout)
                } else {
                    Arrival::Fire(side)
                };
                #[cfg(feature = "tracing")]
                tracing::debug!(displacement, ?side, ?arrival, "row released past threshold");
                self.settle_to(target, arrival);
            }
        }
        true
    }

    fn tap(&mut self, pos: Point, now: Instant, list: &mut dyn ListController) -> bool {
        let Phase::Armed(side) = self.phase else {
            return false;
        };
        if self.revealed_region(side).contains(pos) {
            self.confirm(now, list);
        } else {
            self.cancel_confirmation();
        }
        true
    }

    /// Strip of the back surface currently uncovered, in row-local
    /// coordinates.
    fn revealed_region(&self, side: ActionSide) -> Rect {
        let width = self.displacement.abs();
        let height = self.bounds.height;
        match side {
            ActionSide::Left => Rect::new(0.0, 0.0, width, height),
            ActionSide::Right => Rect::new(self.bounds.width - width, 0.0, width, height),
        }
    }

    fn settle_to(&mut self, target: f32, arrival: Arrival) {
        let spring = Spring::new(f64::from(self.displacement), f64::from(target))
            .with_stiffness(self.tuning.settle_stiffness)
            .with_damping(self.tuning.settle_damping)
            .with_rest_threshold(SETTLE_REST_THRESHOLD)
            .with_velocity_threshold(SETTLE_VELOCITY_THRESHOLD);
        let span = (self.displacement.min(target), self.displacement.max(target));
        self.phase = Phase::Releasing {
            spring,
            span,
            arrival,
        };
    }

    fn arrive(&mut self, arrival: Arrival, now: Instant, list: &mut dyn ListController) {
        match arrival {
            Arrival::Rest => {
                self.phase = Phase::Idle;
                self.set_displacement(0.0, 0.0);
            }
            Arrival::Fire(side) => {
                self.notify(side, list);
                self.settle_to(0.0, Arrival::Rest);
            }
            Arrival::Arm(side, timeout) => {
                self.timer.arm(side, now, timeout);
                #[cfg(feature = "tracing")]
                tracing::debug!(?side, timeout_ms = timeout.as_millis() as u64, "row armed");
                self.phase = Phase::Armed(side);
            }
        }
    }

    fn time_out(&mut self, _side: ActionSide) {
        #[cfg(feature = "tracing")]
        tracing::debug!(side = ?_side, "row confirmation timed out");
        self.settle_to(0.0, Arrival::Rest);
    }

    fn notify(&mut self, side: ActionSide, list: &mut dyn ListController) {
        match delegate::dispatch(list, side, self.position) {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::info!(?side, position = ?self.position, "row action triggered");
            }
            Err(_skip) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?side, reason = ?_skip, "row action not delivered");
            }
        }
    }

    fn set_displacement(&mut self, displacement: f32, glyph_offset: f32) {
        self.displacement = displacement;
        self.glyph_offset = glyph_offset;
        if let Some(front) = self.front.as_mut() {
            front.set_offset_x(displacement);
        }
        self.back.set_glyph_offset(glyph_offset);
    }
}
