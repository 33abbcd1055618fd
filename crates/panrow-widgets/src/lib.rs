#![forbid(unsafe_code)]

//! Pannable list row widget.
//!
//! [`PannableRow`] exposes a draggable front surface over a stationary back
//! surface. Dragging past a threshold reveals an [`ActionGlyph`] and, on
//! release or after a confirming tap, notifies the owning list's delegate
//! through the capabilities in [`delegate`].
//!
//! The row is headless: hosts draw from [`PannableRow::layout`] and feed
//! input, frame deltas and timeouts back in. Everything runs on the host's
//! UI thread.

pub mod config;
pub mod confirmation;
pub mod delegate;
pub mod glyph;
pub mod pannable_row;
pub mod surface;

pub use config::{PanningMode, RowStyle, RowTuning, TuningError};
pub use confirmation::{ConfirmationTimer, TimerToken};
pub use delegate::{
    DetachedList, ListContext, ListController, ListDelegate, RowPosition, TriggeredLeftAction,
    TriggeredRightAction,
};
pub use glyph::{ActionGlyph, ActionSide};
pub use pannable_row::{GestureDisposition, PannableRow, RowPhase};
pub use surface::{BackSurface, GlyphLayout, RowLayout, Surface};
