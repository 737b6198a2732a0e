#![forbid(unsafe_code)]

//! Declarative paginated grid menus.
//!
//! A [`Surface`](surface::Surface) is a fixed grid of cells split into
//! pages. Each page maps cells to occupants: buttons, placeholders, free
//! cells, page and surface navigation, and windows into scrollable
//! [compounds](compound). A [`SurfaceInstance`](instance::SurfaceInstance)
//! shows a surface through a [`SurfaceRenderer`](render::SurfaceRenderer)
//! and dispatches clicks.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use cellmenu::prelude::*;
//!
//! let mut items = None;
//! let surface = SurfaceBuilder::new(SurfaceType::THREE_BY_NINE)
//!     .title("Items")
//!     .page(1, |page| {
//!         let list = page.create_simple_rect_compound(Slot::new(1, 1), Slot::new(2, 9));
//!         page.compound_scroll(Slot::new(3, 9), "down", list.compound(), Scroll::rows());
//!         items = Some(list);
//!     })
//!     .build()
//!     .unwrap();
//!
//! let items = items.unwrap();
//! items.extend_content((0..30).map(|_| SimpleCompoundElement::new("item")));
//!
//! let mut menu = SurfaceInstance::open(Rc::new(surface), HeadlessRenderer::new(27));
//! menu.dispatch(&ClickEvent::new(26));
//! assert_eq!(items.offset(), 9);
//! ```
//!
//! # Feature Flags
//!
//! - `tracing`: spans and events for builds, dispatches, page changes and scrolls.

pub mod compound;
pub mod element;
pub mod error;
pub mod instance;
pub mod page;
pub mod page_change;
pub mod render;
pub mod surface;
pub mod transition;

pub use cellmenu_core::event::{ClickEvent, ClickKind, Modifiers, ViewerId};
pub use cellmenu_core::geometry::{Slot, Slots, SurfaceType};
#[cfg(feature = "tracing-json")]
pub use cellmenu_core::logging::init_json;

pub use compound::{Compound, RectCompound, Scroll, ScrollUnit, SimpleCompoundElement};
pub use element::{Occupant, PageChangeButton, SurfaceChangeButton};
pub use error::BuildError;
pub use instance::{ClickOutcome, SurfaceChange, SurfaceInstance};
pub use page::{Page, PageBuilder};
pub use page_change::PageChange;
pub use render::{HeadlessRenderer, SurfaceRenderer};
pub use surface::{Surface, SurfaceBuilder};
pub use transition::{Direction, PageChangeEffect, SurfaceChangeEffect, TransitionAnimation};

/// Everything needed to build and show a surface.
pub mod prelude {
    pub use crate::{
        BuildError, ClickEvent, ClickOutcome, Compound, HeadlessRenderer, PageBuilder,
        PageChange, PageChangeButton, PageChangeEffect, RectCompound, Scroll,
        SimpleCompoundElement, Slot, Slots, Surface, SurfaceBuilder, SurfaceChangeButton,
        SurfaceChangeEffect, SurfaceInstance, SurfaceRenderer, SurfaceType,
    };
}
