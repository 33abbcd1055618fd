#![forbid(unsafe_code)]

//! panrow public facade crate.
//!
//! Re-exports the row widget and the input types hosts need to drive it,
//! plus a prelude for day-to-day usage.
//!
//! ```
//! use panrow::prelude::*;
//!
//! let mut row = PannableRow::new(RowStyle::Default, "mail", Some(Surface::new("front")), None)
//!     .with_left_action_glyph(ActionGlyph::new("archive", Size::new(24.0, 24.0)));
//! let mut list = DetachedList;
//! let now = Instant::now();
//!
//! row.handle_event(&PointerEvent::down(10.0, 20.0).into(), now, &mut list);
//! row.handle_event(&PointerEvent::moved(50.0, 21.0).into(), now, &mut list);
//! assert_eq!(row.phase(), RowPhase::Dragging);
//! ```

mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use panrow_core::animation::{Animation, Spring};
pub use panrow_core::event::{Event, PointerEvent, PointerKind};
pub use panrow_core::geometry::{Point, Rect, Size};
pub use panrow_core::gesture::{PanConfig, PanEvent, PanRecognizer};

#[cfg(feature = "tracing-json")]
pub use panrow_core::logging::init_json_logging;

pub use web_time::{Duration, Instant};

// --- Widget re-exports -----------------------------------------------------

pub use panrow_widgets::{
    ActionGlyph, ActionSide, BackSurface, ConfirmationTimer, DetachedList, GestureDisposition,
    GlyphLayout, ListContext, ListController, ListDelegate, PannableRow, PanningMode, RowLayout,
    RowPhase, RowPosition, RowStyle, RowTuning, Surface, TimerToken, TriggeredLeftAction,
    TriggeredRightAction, TuningError,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ActionGlyph, ActionSide, DetachedList, Duration, Error, Event, GestureDisposition,
        Instant, ListContext, ListController, ListDelegate, PannableRow, PanningMode,
        PointerEvent, Result, RowPhase, RowPosition, RowStyle, Size, Surface,
        TriggeredLeftAction, TriggeredRightAction,
    };
    pub use crate::{core, widgets};
}

pub use panrow_core as core;
pub use panrow_widgets as widgets;
