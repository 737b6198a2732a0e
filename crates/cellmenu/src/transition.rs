#![forbid(unsafe_code)]

//! Page and surface transition effects.
//!
//! A transition is computed up front as a list of full-surface frames. The
//! host decides how fast to play them; the engine only guarantees that the
//! last frame is the destination page.
//!
//! # Effects
//!
//! - **Slide**: old and new page move together, one column (or row) per frame.
//! - **Swipe**: the new page moves in over the old one, which stays put.
//!
//! Moving [`Direction::Forward`] the new page enters from the right (or
//! bottom); [`Direction::Backward`] enters from the left (or top).

use cellmenu_core::geometry::SurfaceType;

/// A full-surface snapshot: one optional icon per concrete cell.
pub type Frame<I> = Vec<Option<I>>;

/// Effect used when switching between pages of one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageChangeEffect {
    #[default]
    Instant,
    SlideHorizontally,
    SlideVertically,
    SwipeHorizontally,
    SwipeVertically,
}

/// Effect used when switching from one surface to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceChangeEffect {
    #[default]
    Instant,
}

/// Which way a page change moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Forward when moving to a higher page index.
    pub fn between(from: u32, to: u32) -> Self {
        if to >= from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Precomputed frames of one page transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionAnimation<I> {
    effect: PageChangeEffect,
    direction: Direction,
    frames: Vec<Frame<I>>,
}

impl<I: Clone> TransitionAnimation<I> {
    /// Compute the frames leading from `from` to `to`.
    ///
    /// Both frames must hold `surface_type.cell_count()` entries.
    pub fn new(
        from: &[Option<I>],
        to: &[Option<I>],
        effect: PageChangeEffect,
        direction: Direction,
        surface_type: SurfaceType,
    ) -> Self {
        debug_assert_eq!(from.len(), surface_type.cell_count());
        debug_assert_eq!(to.len(), surface_type.cell_count());

        let rows = surface_type.rows() as usize;
        let columns = surface_type.columns() as usize;
        let frames = match effect {
            PageChangeEffect::Instant => vec![to.to_vec()],
            PageChangeEffect::SlideHorizontally => (1..=columns)
                .map(|step| {
                    frame_by(rows, columns, |r, c| {
                        slide(from, to, direction, step, columns, c, |col| r * columns + col)
                    })
                })
                .collect(),
            PageChangeEffect::SlideVertically => (1..=rows)
                .map(|step| {
                    frame_by(rows, columns, |r, c| {
                        slide(from, to, direction, step, rows, r, |row| row * columns + c)
                    })
                })
                .collect(),
            PageChangeEffect::SwipeHorizontally => (1..=columns)
                .map(|step| {
                    frame_by(rows, columns, |r, c| {
                        swipe(from, to, direction, step, columns, c, |col| r * columns + col)
                    })
                })
                .collect(),
            PageChangeEffect::SwipeVertically => (1..=rows)
                .map(|step| {
                    frame_by(rows, columns, |r, c| {
                        swipe(from, to, direction, step, rows, r, |row| row * columns + c)
                    })
                })
                .collect(),
        };

        Self {
            effect,
            direction,
            frames,
        }
    }
}

impl<I> TransitionAnimation<I> {
    #[inline]
    pub fn effect(&self) -> PageChangeEffect {
        self.effect
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// All frames in playback order. Never empty for a non-empty surface.
    #[inline]
    pub fn frames(&self) -> &[Frame<I>] {
        &self.frames
    }

    /// The destination page as the host should show it once done.
    pub fn final_frame(&self) -> Option<&Frame<I>> {
        self.frames.last()
    }
}

fn frame_by<I>(rows: usize, columns: usize, mut cell: impl FnMut(usize, usize) -> Option<I>) -> Frame<I> {
    let mut frame = Vec::with_capacity(rows * columns);
    for r in 0..rows {
        for c in 0..columns {
            frame.push(cell(r, c));
        }
    }
    frame
}

/// Both pages shifted by `step` along an axis of length `len`.
fn slide<I: Clone>(
    from: &[Option<I>],
    to: &[Option<I>],
    direction: Direction,
    step: usize,
    len: usize,
    pos: usize,
    index: impl Fn(usize) -> usize,
) -> Option<I> {
    match direction {
        Direction::Forward => {
            let shifted = pos + step;
            if shifted < len {
                from[index(shifted)].clone()
            } else {
                to[index(shifted - len)].clone()
            }
        }
        Direction::Backward => {
            if pos >= step {
                from[index(pos - step)].clone()
            } else {
                to[index(pos + len - step)].clone()
            }
        }
    }
}

/// New page moved in by `step` over the stationary old page.
fn swipe<I: Clone>(
    from: &[Option<I>],
    to: &[Option<I>],
    direction: Direction,
    step: usize,
    len: usize,
    pos: usize,
    index: impl Fn(usize) -> usize,
) -> Option<I> {
    match direction {
        Direction::Forward => {
            if pos + step >= len {
                to[index(pos + step - len)].clone()
            } else {
                from[index(pos)].clone()
            }
        }
        Direction::Backward => {
            if pos < step {
                to[index(pos + len - step)].clone()
            } else {
                from[index(pos)].clone()
            }
        }
    }
}
