#![forbid(unsafe_code)]

//! Action sides and the glyphs drawn for them in the back surface.

use panrow_core::geometry::Size;

/// Which side of the row an action lives on.
///
/// Dragging the front surface to the right uncovers the **left** glyph;
/// dragging it to the left uncovers the **right** glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionSide {
    Left,
    Right,
}

impl ActionSide {
    /// Sign of the front-surface displacement that reveals this side.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// The side revealed by a displacement, if any.
    #[must_use]
    pub fn revealed_by(displacement: f32) -> Option<Self> {
        if displacement > 0.0 {
            Some(Self::Left)
        } else if displacement < 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// An image representing a revealable action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionGlyph {
    name: String,
    size: Size,
}

impl ActionGlyph {
    /// Create a glyph. Negative dimensions are clamped to zero.
    #[must_use]
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size: Size::new(size.width.max(0.0), size.height.max(0.0)),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_signs() {
        assert_eq!(ActionSide::Left.sign(), 1.0);
        assert_eq!(ActionSide::Right.sign(), -1.0);
    }

    #[test]
    fn revealed_side_follows_displacement() {
        assert_eq!(ActionSide::revealed_by(12.0), Some(ActionSide::Left));
        assert_eq!(ActionSide::revealed_by(-0.5), Some(ActionSide::Right));
        assert_eq!(ActionSide::revealed_by(0.0), None);
    }

    #[test]
    fn glyph_size_clamped() {
        let glyph = ActionGlyph::new("archive", Size::new(-4.0, 24.0));
        assert_eq!(glyph.size(), Size::new(0.0, 24.0));
        assert_eq!(glyph.name(), "archive");
    }
}
