#![forbid(unsafe_code)]

//! panrow error model.
//!
//! The gesture path never fails: missing glyphs, delegates or capabilities
//! degrade to "nothing happens". The only fallible operations are
//! configuration changes, which are rejected and leave the row unchanged.

use std::fmt;

use panrow_widgets::TuningError;

/// Top-level error type for panrow hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Row tuning rejected by [`PannableRow::set_tuning`](crate::PannableRow::set_tuning).
    Tuning(TuningError),
}

/// Standard result type for panrow APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Tuning(_) => "tuning",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tuning(err) => write!(f, "invalid row tuning: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tuning(err) => Some(err),
        }
    }
}

impl From<TuningError> for Error {
    fn from(err: TuningError) -> Self {
        Self::Tuning(err)
    }
}
