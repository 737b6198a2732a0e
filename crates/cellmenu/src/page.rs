#![forbid(unsafe_code)]

//! Pages and the page builder.
//!
//! A [`PageBuilder`] collects cell definitions; every definition resolves its
//! coordinates and overwrites whatever occupied those cells before, so later
//! definitions layer over earlier ones. [`PageBuilder::build`] freezes the
//! result into an immutable [`Page`].

use std::collections::BTreeMap;
use std::rc::Rc;

use cellmenu_core::event::ClickEvent;
use cellmenu_core::geometry::{Slot, Slots, SurfaceType};

use crate::compound::{
    Compound, RectCompound, Scroll, SimpleCompoundElement, simple_click, simple_icon,
};
use crate::element::{Occupant, PageChangeButton, SurfaceChangeButton};
use crate::page_change::PageChange;
use crate::transition::{Frame, PageChangeEffect};

/// One immutable page of a surface.
#[derive(Debug)]
pub struct Page<I> {
    index: u32,
    cells: BTreeMap<usize, Rc<Occupant<I>>>,
    enter_effect: Option<PageChangeEffect>,
    exit_effect: Option<PageChangeEffect>,
}

impl<I> Page<I> {
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Occupant of `cell`, `None` for undefined cells.
    pub fn occupant(&self, cell: usize) -> Option<&Occupant<I>> {
        self.cells.get(&cell).map(|occupant| &**occupant)
    }

    pub(crate) fn occupant_rc(&self, cell: usize) -> Option<Rc<Occupant<I>>> {
        self.cells.get(&cell).cloned()
    }

    /// Defined cells in ascending index order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &Occupant<I>)> {
        self.cells
            .iter()
            .map(|(cell, occupant)| (*cell, &**occupant))
    }

    /// Number of defined cells.
    pub fn defined_cells(&self) -> usize {
        self.cells.len()
    }

    /// Effect used when another page switches to this one.
    #[inline]
    pub fn enter_effect(&self) -> Option<PageChangeEffect> {
        self.enter_effect
    }

    /// Effect used when this page switches away and the target has no enter effect.
    #[inline]
    pub fn exit_effect(&self) -> Option<PageChangeEffect> {
        self.exit_effect
    }
}

impl<I: Clone> Page<I> {
    /// Icon currently shown in `cell`.
    pub fn icon_at(&self, cell: usize) -> Option<I> {
        self.cells.get(&cell).and_then(|occupant| occupant.icon_at(cell))
    }

    /// Full snapshot of this page, one entry per cell of `surface_type`.
    pub fn frame(&self, surface_type: SurfaceType) -> Frame<I> {
        (0..surface_type.cell_count())
            .map(|cell| self.icon_at(cell))
            .collect()
    }
}

/// Accumulates the cells of one page.
pub struct PageBuilder<I> {
    surface_type: SurfaceType,
    index: u32,
    cells: BTreeMap<usize, Rc<Occupant<I>>>,
    enter_effect: Option<PageChangeEffect>,
    exit_effect: Option<PageChangeEffect>,
}

impl<I: Clone + 'static> PageBuilder<I> {
    pub fn new(surface_type: SurfaceType, index: u32) -> Self {
        Self {
            surface_type,
            index,
            cells: BTreeMap::new(),
            enter_effect: None,
            exit_effect: None,
        }
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn surface_type(&self) -> SurfaceType {
        self.surface_type
    }

    pub fn enter_effect(&mut self, effect: PageChangeEffect) -> &mut Self {
        self.enter_effect = Some(effect);
        self
    }

    pub fn exit_effect(&mut self, effect: PageChangeEffect) -> &mut Self {
        self.exit_effect = Some(effect);
        self
    }

    fn define(&mut self, slots: impl Into<Slots>, occupant: Occupant<I>) -> Vec<usize> {
        let cells = slots.into().resolve(self.surface_type);
        let occupant = Rc::new(occupant);
        for cell in &cells {
            let replaced = self.cells.insert(*cell, Rc::clone(&occupant));
            // A compound never shows content in a cell it no longer owns.
            if let Some(Occupant::CompoundWindow { compound }) = replaced.as_deref() {
                compound.release_cell(*cell);
            }
        }
        cells
    }

    /// An icon that runs `on_click` when clicked.
    pub fn button(
        &mut self,
        slots: impl Into<Slots>,
        icon: I,
        on_click: impl Fn(&ClickEvent) + 'static,
    ) -> &mut Self {
        self.define(
            slots,
            Occupant::Button {
                icon,
                on_click: Rc::new(on_click),
            },
        );
        self
    }

    /// An icon protected from every interaction.
    pub fn placeholder(&mut self, slots: impl Into<Slots>, icon: I) -> &mut Self {
        self.define(slots, Occupant::Placeholder { icon });
        self
    }

    /// Cells the viewer may freely put content into or take content out of.
    pub fn free_cell(&mut self, slots: impl Into<Slots>) -> &mut Self {
        self.define(slots, Occupant::FreeCell);
        self
    }

    /// Loads page `to_page` when clicked.
    pub fn page_changer(&mut self, slots: impl Into<Slots>, icon: I, to_page: u32) -> &mut Self {
        self.page_change_button(slots, PageChangeButton::new(icon, PageChange::To(to_page)))
    }

    /// Loads the previous defined page, if any.
    pub fn previous_page(&mut self, slots: impl Into<Slots>, icon: I) -> &mut Self {
        self.page_change_button(slots, PageChangeButton::new(icon, PageChange::Previous))
    }

    /// Loads the next defined page, if any.
    pub fn next_page(&mut self, slots: impl Into<Slots>, icon: I) -> &mut Self {
        self.page_change_button(slots, PageChangeButton::new(icon, PageChange::Next))
    }

    pub fn page_change_button(
        &mut self,
        slots: impl Into<Slots>,
        button: PageChangeButton<I>,
    ) -> &mut Self {
        self.define(slots, Occupant::PageChange(button));
        self
    }

    /// Leads to another surface when clicked.
    pub fn change_surface(
        &mut self,
        slots: impl Into<Slots>,
        button: SurfaceChangeButton<I>,
    ) -> &mut Self {
        self.define(slots, Occupant::SurfaceChange(button));
        self
    }

    /// A new compound without any cells. Show it with [`PageBuilder::compound_space`].
    pub fn create_compound<E: 'static>(
        &self,
        icon_generator: impl Fn(&E) -> I + 'static,
    ) -> Compound<E, I> {
        Compound::new(self.surface_type, icon_generator)
    }

    /// A new compound of [`SimpleCompoundElement`]s.
    pub fn create_simple_compound(&self) -> Compound<SimpleCompoundElement<I>, I> {
        self.create_compound(simple_icon).with_on_click(simple_click)
    }

    /// Show `compound` in `slots`, appended to its window in declaration order.
    ///
    /// A cell later redefined by another operation leaves the window again,
    /// so the window only counts cells that actually show the compound.
    pub fn compound_space<E: 'static>(
        &mut self,
        slots: impl Into<Slots>,
        compound: &Compound<E, I>,
    ) -> &mut Self {
        let cells = self.define(
            slots,
            Occupant::CompoundWindow {
                compound: compound.window(),
            },
        );
        compound.reserve(&cells);
        self
    }

    /// A new compound occupying the rectangle between `from` and `to`.
    pub fn create_rect_compound<E: 'static>(
        &mut self,
        from: Slot,
        to: Slot,
        icon_generator: impl Fn(&E) -> I + 'static,
    ) -> RectCompound<E, I> {
        let left = from.column.min(to.column).max(1);
        let right = from.column.max(to.column).min(self.surface_type.columns());
        let width = if right >= left { right - left + 1 } else { 0 };

        let rect = RectCompound::new(self.surface_type, icon_generator, width);
        self.compound_space(from.rect_to(to), rect.compound());
        rect
    }

    /// A new rectangle compound of [`SimpleCompoundElement`]s.
    pub fn create_simple_rect_compound(
        &mut self,
        from: Slot,
        to: Slot,
    ) -> RectCompound<SimpleCompoundElement<I>, I> {
        self.create_rect_compound(from, to, simple_icon)
            .with_on_click(simple_click)
    }

    /// A button scrolling `compound` when clicked.
    pub fn compound_scroll<E: 'static>(
        &mut self,
        slots: impl Into<Slots>,
        icon: I,
        compound: &Compound<E, I>,
        scroll: Scroll,
    ) -> &mut Self {
        self.define(
            slots,
            Occupant::CompoundScroll {
                icon,
                compound: compound.window(),
                scroll,
            },
        );
        self
    }

    /// Freeze the definitions into a page.
    pub fn build(self) -> Page<I> {
        Page {
            index: self.index,
            cells: self.cells,
            enter_effect: self.enter_effect,
            exit_effect: self.exit_effect,
        }
    }
}
