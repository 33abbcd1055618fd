#![forbid(unsafe_code)]

//! Delegate capabilities for triggered row actions.
//!
//! A row never calls an arbitrary object. It asks its owning
//! [`ListController`] for the list's [`ListDelegate`], then asks that
//! delegate whether it implements the capability for the triggered side.
//! Both capabilities are optional: a delegate that only cares about the
//! right-hand action simply leaves [`ListDelegate::left_action_handler`] at
//! its default.
//!
//! ```
//! use panrow_widgets::delegate::{
//!     ListContext, ListDelegate, RowPosition, TriggeredRightAction,
//! };
//!
//! #[derive(Default)]
//! struct Inbox {
//!     deleted: Vec<RowPosition>,
//! }
//!
//! impl TriggeredRightAction for Inbox {
//!     fn triggered_right_action(&mut self, _list: ListContext, position: RowPosition) {
//!         self.deleted.push(position);
//!     }
//! }
//!
//! impl ListDelegate for Inbox {
//!     fn right_action_handler(&mut self) -> Option<&mut dyn TriggeredRightAction> {
//!         Some(self)
//!     }
//! }
//! ```

use crate::glyph::ActionSide;

/// Opaque handle identifying the list a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ListContext(pub u64);

/// Position of a row within its list, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RowPosition {
    pub section: usize,
    pub item: usize,
}

impl RowPosition {
    #[must_use]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Capability: react to the left action (front dragged to the right).
pub trait TriggeredLeftAction {
    fn triggered_left_action(&mut self, list: ListContext, position: RowPosition);
}

/// Capability: react to the right action (front dragged to the left).
pub trait TriggeredRightAction {
    fn triggered_right_action(&mut self, list: ListContext, position: RowPosition);
}

/// The list's delegate, extended with optional row-action capabilities.
pub trait ListDelegate {
    /// Left-action capability, if implemented.
    fn left_action_handler(&mut self) -> Option<&mut dyn TriggeredLeftAction> {
        None
    }

    /// Right-action capability, if implemented.
    fn right_action_handler(&mut self) -> Option<&mut dyn TriggeredRightAction> {
        None
    }
}

/// The list that owns a row.
pub trait ListController {
    fn context(&self) -> ListContext;

    /// The list's delegate, if one is attached.
    fn delegate(&mut self) -> Option<&mut dyn ListDelegate>;
}

/// Controller for a row that is not attached to any list.
///
/// Every notification routed through it is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedList;

impl ListController for DetachedList {
    fn context(&self) -> ListContext {
        ListContext::default()
    }

    fn delegate(&mut self) -> Option<&mut dyn ListDelegate> {
        None
    }
}

/// Why a notification did not reach a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchSkip {
    /// The row has no bound position.
    Unpositioned,
    /// The list has no delegate.
    NoDelegate,
    /// The delegate does not implement the side's capability.
    NotImplemented,
}

/// Route a triggered action through the list's delegate chain.
pub(crate) fn dispatch(
    list: &mut dyn ListController,
    side: ActionSide,
    position: Option<RowPosition>,
) -> Result<(), DispatchSkip> {
    let position = position.ok_or(DispatchSkip::Unpositioned)?;
    let context = list.context();
    let delegate = list.delegate().ok_or(DispatchSkip::NoDelegate)?;

    match side {
        ActionSide::Left => {
            let handler = delegate
                .left_action_handler()
                .ok_or(DispatchSkip::NotImplemented)?;
            handler.triggered_left_action(context, position);
        }
        ActionSide::Right => {
            let handler = delegate
                .right_action_handler()
                .ok_or(DispatchSkip::NotImplemented)?;
            handler.triggered_right_action(context, position);
        }
    }
    Ok(())
}
