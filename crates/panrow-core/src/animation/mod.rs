#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! Animations are advanced explicitly by the host with a frame delta; nothing
//! here reads a clock, so the same inputs always produce the same motion.

pub mod spring;

pub use spring::{Spring, critical_damping};

use web_time::Duration;

/// A value that evolves over time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current value.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}
