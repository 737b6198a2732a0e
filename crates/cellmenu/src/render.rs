#![forbid(unsafe_code)]

//! The render collaborator.
//!
//! The engine never draws anything itself. It pushes per-cell icon updates
//! and precomputed transitions into a [`SurfaceRenderer`] supplied by the
//! host. [`HeadlessRenderer`] keeps everything in memory for tests and for
//! hosts that diff state themselves.

use crate::transition::{Direction, Frame, PageChangeEffect, TransitionAnimation};

/// Receives cell updates for one live surface.
pub trait SurfaceRenderer<I> {
    /// Show `icon` in `cell`, or clear the cell when `None`.
    fn set_cell(&mut self, cell: usize, icon: Option<&I>);

    /// Show a new title.
    fn set_title(&mut self, _title: &str) {}

    /// Play a page transition.
    ///
    /// The default skips straight to the final frame. Hosts that animate
    /// should show every frame and leave the final one in place.
    fn play(&mut self, animation: &TransitionAnimation<I>) {
        if let Some(frame) = animation.final_frame() {
            for (cell, icon) in frame.iter().enumerate() {
                self.set_cell(cell, icon.as_ref());
            }
        }
    }
}

/// A transition recorded by [`HeadlessRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedTransition {
    pub effect: PageChangeEffect,
    pub direction: Direction,
    pub frames: usize,
}

/// In-memory renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessRenderer<I> {
    cells: Frame<I>,
    title: String,
    updates: usize,
    played: Vec<PlayedTransition>,
}

impl<I> HeadlessRenderer<I> {
    /// Create a renderer with `cell_count` empty cells.
    pub fn new(cell_count: usize) -> Self {
        Self {
            cells: std::iter::repeat_with(|| None).take(cell_count).collect(),
            title: String::new(),
            updates: 0,
            played: Vec::new(),
        }
    }

    /// Icon currently shown in `cell`.
    pub fn cell(&self, cell: usize) -> Option<&I> {
        self.cells.get(cell).and_then(Option::as_ref)
    }

    pub fn cells(&self) -> &[Option<I>] {
        &self.cells
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of `set_cell` calls so far, including those made by [`SurfaceRenderer::play`].
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn played(&self) -> &[PlayedTransition] {
        &self.played
    }

    /// Forget update and transition history, keeping the cells.
    pub fn clear_history(&mut self) {
        self.updates = 0;
        self.played.clear();
    }
}

impl<I: Clone> SurfaceRenderer<I> for HeadlessRenderer<I> {
    fn set_cell(&mut self, cell: usize, icon: Option<&I>) {
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = icon.cloned();
            self.updates += 1;
        }
    }

    fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    fn play(&mut self, animation: &TransitionAnimation<I>) {
        self.played.push(PlayedTransition {
            effect: animation.effect(),
            direction: animation.direction(),
            frames: animation.frames().len(),
        });
        if let Some(frame) = animation.final_frame() {
            for (cell, icon) in frame.iter().enumerate() {
                self.set_cell(cell, icon.as_ref());
            }
        }
    }
}
