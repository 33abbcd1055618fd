#![forbid(unsafe_code)]

//! Core: geometry, pointer events, pan recognition and settle animation.
//!
//! # Role in panrow
//! `panrow-core` is the input layer. It normalizes host pointer input into
//! [`event::Event`]s, turns them into horizontal [`gesture::PanEvent`]s
//! (yielding vertical motion back to the host list), and provides the
//! spring used to settle a row's front surface.
//!
//! # How it fits in the system
//! `panrow-widgets` owns the row state machine and consumes the types
//! defined here. Nothing in this crate reads a clock: every time-dependent
//! call takes `now` or a frame delta from the host.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
