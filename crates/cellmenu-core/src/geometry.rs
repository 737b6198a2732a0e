#![forbid(unsafe_code)]

//! Surface dimensions and cell addressing.
//!
//! Cells are addressed two ways:
//!
//! - **Coordinates** ([`Slot`]): 1-based `(row, column)`, row 1 is the top row.
//! - **Concrete indices** (`usize`): 0-based, row-major, `0..rows * columns`.
//!
//! [`Slots`] describes a set of coordinates. Resolving it against a
//! [`SurfaceType`] yields concrete indices, silently dropping anything that
//! falls outside the grid.

/// Fixed grid dimensions of a surface.
///
/// Created once and copied into every page and compound of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceType {
    rows: u16,
    columns: u16,
}

impl SurfaceType {
    pub const ONE_BY_NINE: Self = Self::new(1, 9);
    pub const TWO_BY_NINE: Self = Self::new(2, 9);
    pub const THREE_BY_NINE: Self = Self::new(3, 9);
    pub const FOUR_BY_NINE: Self = Self::new(4, 9);
    pub const FIVE_BY_NINE: Self = Self::new(5, 9);
    pub const SIX_BY_NINE: Self = Self::new(6, 9);
    pub const THREE_BY_THREE: Self = Self::new(3, 3);
    pub const ONE_BY_FIVE: Self = Self::new(1, 5);

    /// Create a surface type with the given number of rows and columns.
    #[inline]
    pub const fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }

    #[inline]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    #[inline]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    /// Total number of addressable cells.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// A grid with zero rows or zero columns has no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Check whether a coordinate lies inside the grid.
    #[inline]
    pub const fn contains(&self, slot: Slot) -> bool {
        slot.row >= 1 && slot.row <= self.rows && slot.column >= 1 && slot.column <= self.columns
    }

    /// Convert a concrete index back into its coordinate.
    ///
    /// Returns `None` for indices past the last cell.
    pub fn slot_of(&self, index: usize) -> Option<Slot> {
        if index >= self.cell_count() {
            return None;
        }
        let columns = self.columns as usize;
        Some(Slot::new(
            (index / columns) as u16 + 1,
            (index % columns) as u16 + 1,
        ))
    }
}

/// A single cell coordinate (1-based, row 1 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub row: u16,
    pub column: u16,
}

impl Slot {
    #[inline]
    pub const fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }

    /// Concrete index of this coordinate, or `None` when out of bounds.
    #[inline]
    pub fn index_in(self, surface_type: SurfaceType) -> Option<usize> {
        if !surface_type.contains(self) {
            return None;
        }
        Some((self.row as usize - 1) * surface_type.columns as usize + (self.column as usize - 1))
    }

    /// The rectangle spanned by this slot and `other` (either corner order).
    #[inline]
    pub const fn rect_to(self, other: Slot) -> Slots {
        Slots::Rect {
            from: self,
            to: other,
        }
    }

    /// Every cell between this slot and `other` in reading order.
    #[inline]
    pub const fn linear_to(self, other: Slot) -> Slots {
        Slots::Linear {
            from: self,
            to: other,
        }
    }
}

/// A set of cell coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slots {
    /// One coordinate.
    Single(Slot),
    /// One concrete, 0-based cell index.
    Index(usize),
    /// Rectangle between two corners, enumerated row-major.
    Rect { from: Slot, to: Slot },
    /// Every cell between two coordinates in reading order.
    Linear { from: Slot, to: Slot },
    /// A full row.
    Row(u16),
    /// A full column.
    Column(u16),
    /// The ring of cells `padding` cells in from the outer edge.
    Border { padding: u16 },
    /// The four corner cells.
    Corners,
    /// Every cell.
    All,
    /// Several sets, in order.
    Many(Vec<Slots>),
}

impl Slots {
    /// Resolve this set into concrete cell indices.
    ///
    /// Out-of-bounds coordinates are dropped rather than reported. The result
    /// contains no duplicates; the first occurrence of an index keeps its
    /// position.
    pub fn resolve(&self, surface_type: SurfaceType) -> Vec<usize> {
        let mut out = Vec::new();
        if !surface_type.is_empty() {
            self.collect_into(surface_type, &mut out);
        }
        out
    }

    fn collect_into(&self, ty: SurfaceType, out: &mut Vec<usize>) {
        match self {
            Slots::Single(slot) => {
                if let Some(index) = slot.index_in(ty) {
                    push_unique(out, index);
                }
            }
            Slots::Index(index) => {
                if *index < ty.cell_count() {
                    push_unique(out, *index);
                }
            }
            Slots::Rect { from, to } => {
                let (top, bottom) = ordered(from.row, to.row);
                let (left, right) = ordered(from.column, to.column);
                // Clip before iterating so huge rectangles stay cheap.
                let top = top.max(1);
                let bottom = bottom.min(ty.rows);
                let left = left.max(1);
                let right = right.min(ty.columns);
                for row in top..=bottom {
                    for column in left..=right {
                        if let Some(index) = Slot::new(row, column).index_in(ty) {
                            push_unique(out, index);
                        }
                    }
                }
            }
            Slots::Linear { from, to } => {
                let (start, end) = ordered(*from, *to);
                // Rows outside the grid hold no cells, so only visit the overlap.
                for row in start.row.max(1)..=end.row.min(ty.rows) {
                    let first = if row == start.row { start.column.max(1) } else { 1 };
                    let last = if row == end.row {
                        end.column.min(ty.columns)
                    } else {
                        ty.columns
                    };
                    for column in first..=last {
                        if let Some(index) = Slot::new(row, column).index_in(ty) {
                            push_unique(out, index);
                        }
                    }
                }
            }
            Slots::Row(row) => {
                Slots::Rect {
                    from: Slot::new(*row, 1),
                    to: Slot::new(*row, ty.columns),
                }
                .collect_into(ty, out);
            }
            Slots::Column(column) => {
                Slots::Rect {
                    from: Slot::new(1, *column),
                    to: Slot::new(ty.rows, *column),
                }
                .collect_into(ty, out);
            }
            Slots::Border { padding } => {
                let top = padding.saturating_add(1);
                let left = top;
                let bottom = ty.rows.saturating_sub(*padding);
                let right = ty.columns.saturating_sub(*padding);
                if top > bottom || left > right {
                    return;
                }
                for row in top..=bottom {
                    for column in left..=right {
                        let on_edge =
                            row == top || row == bottom || column == left || column == right;
                        if on_edge {
                            if let Some(index) = Slot::new(row, column).index_in(ty) {
                                push_unique(out, index);
                            }
                        }
                    }
                }
            }
            Slots::Corners => {
                for slot in [
                    Slot::new(1, 1),
                    Slot::new(1, ty.columns),
                    Slot::new(ty.rows, 1),
                    Slot::new(ty.rows, ty.columns),
                ] {
                    if let Some(index) = slot.index_in(ty) {
                        push_unique(out, index);
                    }
                }
            }
            Slots::All => {
                for index in 0..ty.cell_count() {
                    push_unique(out, index);
                }
            }
            Slots::Many(sets) => {
                for set in sets {
                    set.collect_into(ty, out);
                }
            }
        }
    }
}

impl From<Slot> for Slots {
    fn from(slot: Slot) -> Self {
        Slots::Single(slot)
    }
}

impl From<(u16, u16)> for Slots {
    fn from((row, column): (u16, u16)) -> Self {
        Slots::Single(Slot::new(row, column))
    }
}

impl From<usize> for Slots {
    fn from(index: usize) -> Self {
        Slots::Index(index)
    }
}

impl<const N: usize> From<[Slot; N]> for Slots {
    fn from(slots: [Slot; N]) -> Self {
        Slots::Many(slots.into_iter().map(Slots::Single).collect())
    }
}

impl From<Vec<Slots>> for Slots {
    fn from(sets: Vec<Slots>) -> Self {
        Slots::Many(sets)
    }
}

#[inline]
fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

fn push_unique(out: &mut Vec<usize>, index: usize) {
    if !out.contains(&index) {
        out.push(index);
    }
}
