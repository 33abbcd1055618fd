#![forbid(unsafe_code)]

//! Row configuration: panning mode, row style and tuning constants.

use std::fmt;

use panrow_core::animation::critical_damping;
use web_time::Duration;

/// Default window for a second, confirming input.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_millis(1500);

/// Fraction of a side's max reveal a release must reach to commit.
pub const DEFAULT_THRESHOLD_FRACTION: f32 = 0.5;

/// Horizontal padding around a glyph inside the back surface.
pub const DEFAULT_GLYPH_MARGIN: f32 = 10.0;

/// Stiffness of the settle spring.
pub const DEFAULT_SETTLE_STIFFNESS: f64 = 170.0;

/// Accepted settle stiffness range. Softer springs take seconds to settle;
/// stiffer ones outrun the spring's 4ms integration step.
pub const SETTLE_STIFFNESS_RANGE: (f64, f64) = (1.0, 10_000.0);

/// Upper bound on settle damping, as a multiple of critical damping.
pub const MAX_DAMPING_RATIO: f64 = 2.0;

/// Behavior once the front surface reaches the max reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanningMode {
    /// The front surface stops; further drag has no visual effect.
    StopAtMax,
    /// The front surface stops and the glyph follows the excess drag.
    #[default]
    MoveImage,
}

/// Host row style, passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowStyle {
    #[default]
    Default,
    Value1,
    Value2,
    Subtitle,
}

/// Tunable constants for reveal geometry and settle motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowTuning {
    /// Commit threshold as a fraction of max reveal, in `(0, 1]` (default: 0.5).
    pub threshold_fraction: f32,
    /// Padding on each side of a glyph; max reveal = glyph width + 2 × margin
    /// (default: 10.0).
    pub glyph_margin: f32,
    /// Settle spring stiffness (default: 170.0).
    pub settle_stiffness: f64,
    /// Settle spring damping, between critical (`2√k`) and
    /// [`MAX_DAMPING_RATIO`] × critical (default: critical).
    pub settle_damping: f64,
}

impl Default for RowTuning {
    fn default() -> Self {
        Self {
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
            glyph_margin: DEFAULT_GLYPH_MARGIN,
            settle_stiffness: DEFAULT_SETTLE_STIFFNESS,
            settle_damping: critical_damping(DEFAULT_SETTLE_STIFFNESS),
        }
    }
}

impl RowTuning {
    #[must_use]
    pub fn with_threshold_fraction(mut self, fraction: f32) -> Self {
        self.threshold_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_glyph_margin(mut self, margin: f32) -> Self {
        self.glyph_margin = margin;
        self
    }

    /// Set stiffness and switch damping to the matching critical value.
    #[must_use]
    pub fn with_critical_spring(mut self, stiffness: f64) -> Self {
        self.settle_stiffness = stiffness;
        self.settle_damping = critical_damping(stiffness);
        self
    }

    #[must_use]
    pub fn with_settle_damping(mut self, damping: f64) -> Self {
        self.settle_damping = damping;
        self
    }

    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), TuningError> {
        let fraction = self.threshold_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(TuningError::ThresholdFraction(fraction));
        }
        if !self.glyph_margin.is_finite() || self.glyph_margin < 0.0 {
            return Err(TuningError::GlyphMargin(self.glyph_margin));
        }
        let (min_k, max_k) = SETTLE_STIFFNESS_RANGE;
        if !(self.settle_stiffness >= min_k && self.settle_stiffness <= max_k) {
            return Err(TuningError::Stiffness(self.settle_stiffness));
        }
        // Below critical the front overshoots the reveal edge and rest.
        let critical = critical_damping(self.settle_stiffness);
        let damping = self.settle_damping;
        if !(damping >= critical && damping <= MAX_DAMPING_RATIO * critical) {
            return Err(TuningError::Damping { damping, critical });
        }
        Ok(())
    }
}

/// An out-of-range [`RowTuning`] field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuningError {
    ThresholdFraction(f32),
    GlyphMargin(f32),
    Stiffness(f64),
    Damping { damping: f64, critical: f64 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdFraction(v) => {
                write!(f, "threshold fraction must be in (0, 1], got {v}")
            }
            Self::GlyphMargin(v) => write!(f, "glyph margin must be finite and >= 0, got {v}"),
            Self::Stiffness(v) => {
                let (min, max) = SETTLE_STIFFNESS_RANGE;
                write!(f, "settle stiffness must be in [{min}, {max}], got {v}")
            }
            Self::Damping { damping, critical } => write!(
                f,
                "settle damping must be in [{critical}, {}] for this stiffness, got {damping}",
                MAX_DAMPING_RATIO * critical
            ),
        }
    }
}

impl std::error::Error for TuningError {}
