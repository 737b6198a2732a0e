#![forbid(unsafe_code)]

//! Cell occupants.
//!
//! Every defined cell of a page holds one [`Occupant`]. The click dispatcher
//! matches on the variant, so a new kind of occupant cannot be added without
//! deciding how it reacts to clicks.

use std::fmt;
use std::rc::Rc;

use cellmenu_core::event::ClickEvent;

use crate::compound::{CompoundWindow, Scroll};
use crate::page_change::PageChange;
use crate::surface::Surface;
use crate::transition::PageChangeEffect;

/// Callback invoked with the click that triggered it.
pub type ClickCallback = Rc<dyn Fn(&ClickEvent)>;

/// Produces the surface a surface-change button leads to.
pub type SurfaceFactory<I> = Rc<dyn Fn() -> Rc<Surface<I>>>;

/// What occupies one cell of a page.
pub enum Occupant<I> {
    /// Shows an icon and runs a callback when clicked.
    Button { icon: I, on_click: ClickCallback },
    /// Shows an icon and blocks every interaction.
    Placeholder { icon: I },
    /// Leaves the cell to the host's default interaction.
    FreeCell,
    /// Switches to another page of the same surface.
    PageChange(PageChangeButton<I>),
    /// Switches to another surface.
    SurfaceChange(SurfaceChangeButton<I>),
    /// One cell of a compound window.
    CompoundWindow { compound: Rc<dyn CompoundWindow<I>> },
    /// Scrolls a compound.
    CompoundScroll {
        icon: I,
        compound: Rc<dyn CompoundWindow<I>>,
        scroll: Scroll,
    },
}

impl<I: Clone> Occupant<I> {
    /// Icon to show in `cell`, or `None` for an empty cell.
    pub fn icon_at(&self, cell: usize) -> Option<I> {
        match self {
            Occupant::Button { icon, .. }
            | Occupant::Placeholder { icon }
            | Occupant::CompoundScroll { icon, .. } => Some(icon.clone()),
            Occupant::PageChange(button) => Some(button.icon.clone()),
            Occupant::SurfaceChange(button) => Some(button.icon.clone()),
            Occupant::FreeCell => None,
            Occupant::CompoundWindow { compound } => compound.icon_at_cell(cell),
        }
    }
}

impl<I> Occupant<I> {
    /// Short variant name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Occupant::Button { .. } => "button",
            Occupant::Placeholder { .. } => "placeholder",
            Occupant::FreeCell => "free_cell",
            Occupant::PageChange(_) => "page_change",
            Occupant::SurfaceChange(_) => "surface_change",
            Occupant::CompoundWindow { .. } => "compound_window",
            Occupant::CompoundScroll { .. } => "compound_scroll",
        }
    }
}

impl<I> fmt::Debug for Occupant<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::PageChange(button) => f
                .debug_tuple("PageChange")
                .field(&button.strategy)
                .finish(),
            Occupant::CompoundScroll { scroll, .. } => f
                .debug_struct("CompoundScroll")
                .field("scroll", scroll)
                .finish_non_exhaustive(),
            other => f.write_str(other.kind()),
        }
    }
}

/// A button that navigates between pages of one surface.
pub struct PageChangeButton<I> {
    pub icon: I,
    pub strategy: PageChange,
    /// Used only when neither page defines an effect.
    pub effect: Option<PageChangeEffect>,
    pub on_change: Option<ClickCallback>,
}

impl<I> PageChangeButton<I> {
    pub fn new(icon: I, strategy: PageChange) -> Self {
        Self {
            icon,
            strategy,
            effect: None,
            on_change: None,
        }
    }

    #[must_use]
    pub fn effect(mut self, effect: PageChangeEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Run `on_change` on every click, whether or not the page changed.
    #[must_use]
    pub fn on_change(mut self, on_change: impl Fn(&ClickEvent) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

/// A button that leads to another surface.
pub struct SurfaceChangeButton<I> {
    pub icon: I,
    pub target: SurfaceFactory<I>,
    /// Start page on the target; its default page when unset or undefined.
    pub page: Option<u32>,
    pub on_change: Option<ClickCallback>,
}

impl<I> SurfaceChangeButton<I> {
    /// `target` is called on every click, so each click may build a fresh surface.
    pub fn new(icon: I, target: impl Fn() -> Rc<Surface<I>> + 'static) -> Self {
        Self {
            icon,
            target: Rc::new(target),
            page: None,
            on_change: None,
        }
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn on_change(mut self, on_change: impl Fn(&ClickEvent) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}
