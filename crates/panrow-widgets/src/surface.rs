#![forbid(unsafe_code)]

//! Front and back surfaces of a pannable row, and their computed layout.

use panrow_core::geometry::Rect;

use crate::glyph::{ActionGlyph, ActionSide};

/// A view owned by a row.
///
/// The row is the only writer of `offset_x`; hosts read it when drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    name: String,
    offset_x: f32,
}

impl Surface {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset_x: 0.0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Horizontal displacement from the rest position.
    #[must_use]
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub(crate) fn set_offset_x(&mut self, offset_x: f32) {
        self.offset_x = offset_x;
    }
}

/// Slot in the back surface holding an optional action glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphSlot {
    glyph: Option<ActionGlyph>,
    offset_x: f32,
}

impl GlyphSlot {
    #[must_use]
    pub fn glyph(&self) -> Option<&ActionGlyph> {
        self.glyph.as_ref()
    }

    /// Extra displacement applied past the reveal edge (`MoveImage` mode).
    #[must_use]
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }
}

/// The stationary surface revealed behind the front.
#[derive(Debug, Clone, PartialEq)]
pub struct BackSurface {
    surface: Surface,
    left: GlyphSlot,
    right: GlyphSlot,
}

impl Default for BackSurface {
    fn default() -> Self {
        Self::new(Surface::new("back"))
    }
}

impl BackSurface {
    /// Wrap a custom view; glyph slots start empty.
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            left: GlyphSlot::default(),
            right: GlyphSlot::default(),
        }
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn slot(&self, side: ActionSide) -> &GlyphSlot {
        match side {
            ActionSide::Left => &self.left,
            ActionSide::Right => &self.right,
        }
    }

    #[must_use]
    pub fn glyph(&self, side: ActionSide) -> Option<&ActionGlyph> {
        self.slot(side).glyph()
    }

    pub(crate) fn set_glyph(&mut self, side: ActionSide, glyph: Option<ActionGlyph>) {
        self.slot_mut(side).glyph = glyph;
    }

    /// Split a signed excess between the two slots: positive moves the left
    /// glyph right, negative moves the right glyph left.
    pub(crate) fn set_glyph_offset(&mut self, excess: f32) {
        self.left.offset_x = excess.max(0.0);
        self.right.offset_x = excess.min(0.0);
    }

    fn slot_mut(&mut self, side: ActionSide) -> &mut GlyphSlot {
        match side {
            ActionSide::Left => &mut self.left,
            ActionSide::Right => &mut self.right,
        }
    }
}

/// Placement of one action glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphLayout {
    pub rect: Rect,
    /// The front surface has moved off this glyph's side.
    pub revealed: bool,
}

/// Computed geometry for a row within some bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// `None` when the row has no front surface.
    pub front: Option<Rect>,
    pub back: Rect,
    pub left_glyph: Option<GlyphLayout>,
    pub right_glyph: Option<GlyphLayout>,
}

impl RowLayout {
    pub(crate) fn compute(
        bounds: Rect,
        front: Option<&Surface>,
        back: &BackSurface,
        margin: f32,
    ) -> Self {
        let displacement = front.map_or(0.0, Surface::offset_x);
        let centered_y = |height: f32| bounds.y + (bounds.height - height) / 2.0;

        let left_glyph = back.left.glyph.as_ref().map(|glyph| {
            let size = glyph.size();
            GlyphLayout {
                rect: Rect::new(
                    bounds.x + margin + back.left.offset_x,
                    centered_y(size.height),
                    size.width,
                    size.height,
                ),
                revealed: displacement > 0.0,
            }
        });
        let right_glyph = back.right.glyph.as_ref().map(|glyph| {
            let size = glyph.size();
            GlyphLayout {
                rect: Rect::new(
                    bounds.right() - margin - size.width + back.right.offset_x,
                    centered_y(size.height),
                    size.width,
                    size.height,
                ),
                revealed: displacement < 0.0,
            }
        });

        Self {
            front: front.map(|f| bounds.offset_x(f.offset_x())),
            back: bounds,
            left_glyph,
            right_glyph,
        }
    }
}
