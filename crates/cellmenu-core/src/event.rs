#![forbid(unsafe_code)]

//! Click events delivered by the host.
//!
//! The engine never interprets a [`ClickEvent`] beyond its cell index; the
//! rest is forwarded untouched to button and compound callbacks.

use bitflags::bitflags;

/// Identifies the viewer a surface instance is shown to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewerId(pub u64);

/// How the cell was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickKind {
    /// Primary button.
    #[default]
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
    /// Double click with the primary button.
    Double,
    /// Drop key pressed while hovering the cell.
    Drop,
    /// Number key pressed while hovering the cell (0-based key).
    Swap(u8),
}

bitflags! {
    /// Modifier keys held during a click.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

/// A click on one concrete cell of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickEvent {
    /// Concrete, 0-based cell index.
    pub slot: usize,
    pub kind: ClickKind,
    pub modifiers: Modifiers,
    pub viewer: ViewerId,
}

impl ClickEvent {
    /// Create a plain left click on `slot`.
    #[must_use]
    pub const fn new(slot: usize) -> Self {
        Self {
            slot,
            kind: ClickKind::Left,
            modifiers: Modifiers::NONE,
            viewer: ViewerId(0),
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: ClickKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_viewer(mut self, viewer: ViewerId) -> Self {
        self.viewer = viewer;
        self
    }

    /// Check if Shift was held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}
