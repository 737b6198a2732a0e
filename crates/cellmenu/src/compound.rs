#![forbid(unsafe_code)]

//! Compounds: scrollable windows into a larger element collection.
//!
//! A compound reserves a fixed, ordered set of cells on one page and shows
//! `reserved.len()` consecutive elements of its content there, starting at the
//! scroll offset. Reserved cell order is declaration order and defines which
//! element lands in which cell.
//!
//! # Invariants
//!
//! 1. `offset <= max(0, content.len() - window_len)` after every scroll and
//!    every content mutation.
//! 2. Reserved cells never repeat; the first reservation of a cell wins.
//! 3. For rectangle compounds the width is fixed at creation.
//!
//! Compound handles are cheap clones of one shared state. The engine is
//! single-threaded; content must only be changed between dispatches.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use cellmenu_core::event::ClickEvent;
use cellmenu_core::geometry::SurfaceType;

use crate::element::ClickCallback;

/// Callback invoked with the clicked element.
pub type ElementCallback<E> = Rc<dyn Fn(&ClickEvent, &E)>;

/// Maps an element to the icon shown in its cell.
pub type IconGenerator<E, I> = Rc<dyn Fn(&E) -> I>;

/// How far one scroll step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollUnit {
    /// A fixed number of elements.
    Cells(usize),
    /// One row of a rectangle compound. One element for other compounds.
    Rows,
    /// One full window.
    Pages,
}

/// Scroll configuration of a scroll button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scroll {
    pub unit: ScrollUnit,
    pub times: usize,
    pub reverse: bool,
}

impl Scroll {
    /// Scroll by `distance` elements. The sign is ignored; use [`Scroll::reverse`].
    pub fn cells(distance: i32) -> Self {
        Self::by(ScrollUnit::Cells(distance.unsigned_abs() as usize))
    }

    /// Scroll by one row of a rectangle compound.
    pub fn rows() -> Self {
        Self::by(ScrollUnit::Rows)
    }

    /// Scroll by one full window.
    pub fn pages() -> Self {
        Self::by(ScrollUnit::Pages)
    }

    fn by(unit: ScrollUnit) -> Self {
        Self {
            unit,
            times: 1,
            reverse: false,
        }
    }

    /// Repeat the step `times` times per click.
    #[must_use]
    pub fn times(mut self, times: usize) -> Self {
        self.times = times;
        self
    }

    /// Scroll backwards instead of forwards.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Type-erased view of a compound, as stored in page cells.
pub trait CompoundWindow<I> {
    /// Reserved cells in window order.
    fn reserved_cells(&self) -> Vec<usize>;

    /// Icon currently shown in `cell`, `None` past the end of the content.
    fn icon_at_cell(&self, cell: usize) -> Option<I>;

    /// Forward a click on `cell` to the element shown there.
    ///
    /// Returns `false` when the cell shows no element.
    fn click_cell(&self, cell: usize, event: &ClickEvent) -> bool;

    /// Apply one scroll-button press. Returns `true` if the offset changed.
    fn scroll_by(&self, scroll: Scroll) -> bool;

    /// Drop `cell` from the window after another occupant took it over.
    fn release_cell(&self, cell: usize);
}

struct CompoundState<E, I> {
    icon_generator: IconGenerator<E, I>,
    on_click: Option<ElementCallback<E>>,
    reserved: Vec<usize>,
    content: Vec<Rc<E>>,
    offset: usize,
    width: Option<u16>,
}

impl<E, I> CompoundState<E, I> {
    fn max_offset(&self) -> usize {
        self.content.len().saturating_sub(self.reserved.len())
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    fn element_at_cell(&self, cell: usize) -> Option<Rc<E>> {
        let position = self.reserved.iter().position(|c| *c == cell)?;
        self.content.get(self.offset + position).cloned()
    }
}

/// A scrollable window over caller-managed content.
pub struct Compound<E, I> {
    surface_type: SurfaceType,
    state: Rc<RefCell<CompoundState<E, I>>>,
}

impl<E, I> Clone for Compound<E, I> {
    fn clone(&self) -> Self {
        Self {
            surface_type: self.surface_type,
            state: Rc::clone(&self.state),
        }
    }
}

impl<E, I> fmt::Debug for Compound<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Compound")
            .field("surface_type", &self.surface_type)
            .field("reserved", &state.reserved)
            .field("len", &state.content.len())
            .field("offset", &state.offset)
            .field("width", &state.width)
            .finish()
    }
}

impl<E, I> Compound<E, I> {
    /// Create an empty compound with no reserved cells.
    pub fn new(surface_type: SurfaceType, icon_generator: impl Fn(&E) -> I + 'static) -> Self {
        Self::with_width(surface_type, icon_generator, None)
    }

    fn with_width(
        surface_type: SurfaceType,
        icon_generator: impl Fn(&E) -> I + 'static,
        width: Option<u16>,
    ) -> Self {
        Self {
            surface_type,
            state: Rc::new(RefCell::new(CompoundState {
                icon_generator: Rc::new(icon_generator),
                on_click: None,
                reserved: Vec::new(),
                content: Vec::new(),
                offset: 0,
                width,
            })),
        }
    }

    /// Set the callback invoked when a shown element is clicked.
    #[must_use]
    pub fn with_on_click(self, on_click: impl Fn(&ClickEvent, &E) + 'static) -> Self {
        self.state.borrow_mut().on_click = Some(Rc::new(on_click));
        self
    }

    #[inline]
    pub fn surface_type(&self) -> SurfaceType {
        self.surface_type
    }

    /// Append cells to the window. Already reserved cells are skipped.
    pub(crate) fn reserve(&self, cells: &[usize]) {
        let mut state = self.state.borrow_mut();
        for cell in cells {
            if !state.reserved.contains(cell) {
                state.reserved.push(*cell);
            }
        }
        state.clamp_offset();
    }

    /// Reserved cells in window order.
    pub fn reserved_cells(&self) -> Vec<usize> {
        self.state.borrow().reserved.clone()
    }

    /// Number of cells in the window.
    pub fn window_len(&self) -> usize {
        self.state.borrow().reserved.len()
    }

    /// Number of content elements.
    pub fn len(&self) -> usize {
        self.state.borrow().content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().content.is_empty()
    }

    /// Index of the first shown element.
    pub fn offset(&self) -> usize {
        self.state.borrow().offset
    }

    /// Largest valid offset for the current content.
    pub fn max_offset(&self) -> usize {
        self.state.borrow().max_offset()
    }

    /// Row width, present only for rectangle compounds.
    pub fn width(&self) -> Option<u16> {
        self.state.borrow().width
    }

    /// Append one element.
    pub fn add_content(&self, element: E) {
        self.state.borrow_mut().content.push(Rc::new(element));
    }

    /// Append several elements.
    pub fn extend_content(&self, elements: impl IntoIterator<Item = E>) {
        self.state
            .borrow_mut()
            .content
            .extend(elements.into_iter().map(Rc::new));
    }

    /// Replace all content, keeping the offset where still valid.
    pub fn set_content(&self, elements: impl IntoIterator<Item = E>) {
        let mut state = self.state.borrow_mut();
        state.content = elements.into_iter().map(Rc::new).collect();
        state.clamp_offset();
    }

    /// Remove all content and reset the offset.
    pub fn clear_content(&self) {
        let mut state = self.state.borrow_mut();
        state.content.clear();
        state.offset = 0;
    }

    /// Remove every element matching `predicate`. Returns how many were removed.
    pub fn remove_content_where(&self, mut predicate: impl FnMut(&E) -> bool) -> usize {
        let mut state = self.state.borrow_mut();
        let before = state.content.len();
        state.content.retain(|element| !predicate(&**element));
        state.clamp_offset();
        before - state.content.len()
    }

    /// Stable-sort the content.
    pub fn sort_content_by(&self, mut compare: impl FnMut(&E, &E) -> Ordering) {
        self.state
            .borrow_mut()
            .content
            .sort_by(|a, b| compare(&**a, &**b));
    }

    /// Elements currently in the window, in window order.
    pub fn visible(&self) -> Vec<Rc<E>> {
        let state = self.state.borrow();
        let end = (state.offset + state.reserved.len()).min(state.content.len());
        state.content[state.offset.min(end)..end].to_vec()
    }

    /// Element shown in `cell`, if any.
    pub fn element_at_cell(&self, cell: usize) -> Option<Rc<E>> {
        self.state.borrow().element_at_cell(cell)
    }

    /// Move the window by `distance * times` elements, clamped to the content.
    ///
    /// Returns `true` if the offset changed.
    pub fn scroll(&self, distance: usize, times: usize, reverse: bool) -> bool {
        let mut state = self.state.borrow_mut();
        let step = distance.saturating_mul(times);
        let previous = state.offset;
        let target = if reverse {
            previous.saturating_sub(step)
        } else {
            previous.saturating_add(step)
        };
        state.offset = target.min(state.max_offset());
        let changed = state.offset != previous;
        if changed {
            cellmenu_core::debug!(previous, offset = state.offset, "compound scrolled");
        }
        changed
    }

    fn unit_distance(&self, unit: ScrollUnit) -> usize {
        let state = self.state.borrow();
        match unit {
            ScrollUnit::Cells(distance) => distance,
            ScrollUnit::Rows => state.width.map_or(1, usize::from),
            ScrollUnit::Pages => state.reserved.len(),
        }
    }
}

impl<E: 'static, I: 'static> Compound<E, I> {
    /// Type-erased handle for storing in page cells.
    pub(crate) fn window(&self) -> Rc<dyn CompoundWindow<I>> {
        Rc::new(self.clone())
    }
}

impl<E, I> CompoundWindow<I> for Compound<E, I> {
    fn reserved_cells(&self) -> Vec<usize> {
        Compound::reserved_cells(self)
    }

    fn icon_at_cell(&self, cell: usize) -> Option<I> {
        // Release the borrow before running caller code.
        let (element, icon_generator) = {
            let state = self.state.borrow();
            (state.element_at_cell(cell)?, Rc::clone(&state.icon_generator))
        };
        Some(icon_generator(&*element))
    }

    fn click_cell(&self, cell: usize, event: &ClickEvent) -> bool {
        let (element, on_click) = {
            let state = self.state.borrow();
            match state.element_at_cell(cell) {
                Some(element) => (element, state.on_click.clone()),
                None => return false,
            }
        };
        if let Some(on_click) = on_click {
            on_click(event, &*element);
        }
        true
    }

    fn scroll_by(&self, scroll: Scroll) -> bool {
        let distance = self.unit_distance(scroll.unit);
        self.scroll(distance, scroll.times, scroll.reverse)
    }

    fn release_cell(&self, cell: usize) {
        let mut state = self.state.borrow_mut();
        state.reserved.retain(|reserved| *reserved != cell);
        state.clamp_offset();
    }
}

/// A compound whose window is one rectangle.
///
/// Dereferences to the underlying [`Compound`].
pub struct RectCompound<E, I> {
    compound: Compound<E, I>,
    width: u16,
}

impl<E, I> Clone for RectCompound<E, I> {
    fn clone(&self) -> Self {
        Self {
            compound: self.compound.clone(),
            width: self.width,
        }
    }
}

impl<E, I> fmt::Debug for RectCompound<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectCompound")
            .field("width", &self.width)
            .field("compound", &self.compound)
            .finish()
    }
}

impl<E, I> RectCompound<E, I> {
    pub(crate) fn new(
        surface_type: SurfaceType,
        icon_generator: impl Fn(&E) -> I + 'static,
        width: u16,
    ) -> Self {
        Self {
            compound: Compound::with_width(surface_type, icon_generator, Some(width)),
            width,
        }
    }

    /// Set the callback invoked when a shown element is clicked.
    #[must_use]
    pub fn with_on_click(self, on_click: impl Fn(&ClickEvent, &E) + 'static) -> Self {
        Self {
            compound: self.compound.with_on_click(on_click),
            width: self.width,
        }
    }

    /// Number of columns of the rectangle.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Scroll by `times` full rows.
    pub fn scroll_rows(&self, times: usize, reverse: bool) -> bool {
        self.compound.scroll(self.width as usize, times, reverse)
    }

    /// Scroll by `times` full windows.
    pub fn scroll_pages(&self, times: usize, reverse: bool) -> bool {
        self.compound
            .scroll(self.compound.window_len(), times, reverse)
    }

    /// The underlying compound handle.
    pub fn compound(&self) -> &Compound<E, I> {
        &self.compound
    }
}

impl<E, I> Deref for RectCompound<E, I> {
    type Target = Compound<E, I>;

    fn deref(&self) -> &Self::Target {
        &self.compound
    }
}

/// Ready-made compound element: an icon plus an optional click callback.
pub struct SimpleCompoundElement<I> {
    pub icon: I,
    on_click: Option<ClickCallback>,
}

impl<I> SimpleCompoundElement<I> {
    pub fn new(icon: I) -> Self {
        Self {
            icon,
            on_click: None,
        }
    }

    #[must_use]
    pub fn with_on_click(mut self, on_click: impl Fn(&ClickEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }
}

impl<I: fmt::Debug> fmt::Debug for SimpleCompoundElement<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleCompoundElement")
            .field("icon", &self.icon)
            .field("clickable", &self.on_click.is_some())
            .finish()
    }
}

pub(crate) fn simple_icon<I: Clone>(element: &SimpleCompoundElement<I>) -> I {
    element.icon.clone()
}

pub(crate) fn simple_click<I>(event: &ClickEvent, element: &SimpleCompoundElement<I>) {
    if let Some(on_click) = &element.on_click {
        on_click(event);
    }
}
