#![forbid(unsafe_code)]

//! Built surfaces and the surface builder.
//!
//! A [`Surface`] is an immutable description: grid dimensions, a title, the
//! pages, a default page, an optional global click observer and the effects
//! used when navigating between surfaces. It is handed to
//! [`SurfaceInstance`](crate::instance::SurfaceInstance), which holds the
//! per-viewer state.
//!
//! # Example
//!
//! ```
//! use cellmenu::prelude::*;
//!
//! let surface = SurfaceBuilder::new(SurfaceType::THREE_BY_NINE)
//!     .title("Shop")
//!     .page(1, |page| {
//!         page.placeholder(Slots::Border { padding: 0 }, "glass")
//!             .next_page(Slot::new(3, 9), "arrow");
//!     })
//!     .page(2, |page| {
//!         page.previous_page(Slot::new(3, 1), "arrow");
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(surface.page_indices().collect::<Vec<_>>(), vec![1, 2]);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use cellmenu_core::event::ClickEvent;
use cellmenu_core::geometry::SurfaceType;

use crate::element::ClickCallback;
use crate::error::BuildError;
use crate::page::{Page, PageBuilder};
use crate::transition::SurfaceChangeEffect;

/// Page shown when a surface is opened without an explicit page.
pub const DEFAULT_PAGE: u32 = 1;

/// An immutable surface description.
pub struct Surface<I> {
    surface_type: SurfaceType,
    title: String,
    pages: BTreeMap<u32, Page<I>>,
    default_page: u32,
    on_click: Option<ClickCallback>,
    transition_to: Option<SurfaceChangeEffect>,
    transition_from: Option<SurfaceChangeEffect>,
}

impl<I> Surface<I> {
    #[inline]
    pub fn surface_type(&self) -> SurfaceType {
        self.surface_type
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page(&self, index: u32) -> Option<&Page<I>> {
        self.pages.get(&index)
    }

    pub(crate) fn pages(&self) -> &BTreeMap<u32, Page<I>> {
        &self.pages
    }

    /// Defined page indices, ascending.
    pub fn page_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }

    /// Always a defined page.
    #[inline]
    pub fn default_page(&self) -> u32 {
        self.default_page
    }

    pub(crate) fn on_click(&self) -> Option<&ClickCallback> {
        self.on_click.as_ref()
    }

    /// Effect used when another surface switches to this one.
    #[inline]
    pub fn transition_to(&self) -> Option<SurfaceChangeEffect> {
        self.transition_to
    }

    /// Effect used when this surface switches away and the target defines none.
    #[inline]
    pub fn transition_from(&self) -> Option<SurfaceChangeEffect> {
        self.transition_from
    }
}

impl<I> fmt::Debug for Surface<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("surface_type", &self.surface_type)
            .field("title", &self.title)
            .field("pages", &self.pages.keys().collect::<Vec<_>>())
            .field("default_page", &self.default_page)
            .field("on_click", &self.on_click.is_some())
            .field("transition_to", &self.transition_to)
            .field("transition_from", &self.transition_from)
            .finish()
    }
}

/// Accumulates pages and surface-wide settings.
#[must_use]
pub struct SurfaceBuilder<I> {
    surface_type: SurfaceType,
    title: String,
    pages: BTreeMap<u32, Page<I>>,
    invalid_page: Option<u32>,
    default_page: u32,
    on_click: Option<ClickCallback>,
    transition_to: Option<SurfaceChangeEffect>,
    transition_from: Option<SurfaceChangeEffect>,
}

impl<I: Clone + 'static> SurfaceBuilder<I> {
    pub fn new(surface_type: SurfaceType) -> Self {
        Self {
            surface_type,
            title: String::new(),
            pages: BTreeMap::new(),
            invalid_page: None,
            default_page: DEFAULT_PAGE,
            on_click: None,
            transition_to: None,
            transition_from: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Page shown on open. Must be defined by the time [`build`](Self::build) runs.
    pub fn default_page(mut self, page: u32) -> Self {
        self.default_page = page;
        self
    }

    pub fn transition_to(mut self, effect: SurfaceChangeEffect) -> Self {
        self.transition_to = Some(effect);
        self
    }

    pub fn transition_from(mut self, effect: SurfaceChangeEffect) -> Self {
        self.transition_from = Some(effect);
        self
    }

    /// Observer called after every handled click, whatever the cell held.
    pub fn on_click(mut self, on_click: impl Fn(&ClickEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }

    /// Define page `index`, replacing any earlier definition of it.
    pub fn page(self, index: u32, define: impl FnOnce(&mut PageBuilder<I>)) -> Self {
        let mut builder = PageBuilder::new(self.surface_type, index);
        define(&mut builder);
        self.add_page(builder.build())
    }

    /// Add a page built separately, replacing any page with the same index.
    pub fn add_page(mut self, page: Page<I>) -> Self {
        let index = page.index();
        if index == 0 {
            self.invalid_page.get_or_insert(index);
            return self;
        }
        self.pages.insert(index, page);
        self
    }

    /// Validate and freeze the surface.
    pub fn build(self) -> Result<Surface<I>, BuildError> {
        if self.surface_type.is_empty() {
            return Err(BuildError::EmptySurfaceType {
                rows: self.surface_type.rows(),
                columns: self.surface_type.columns(),
            });
        }
        if let Some(page) = self.invalid_page {
            return Err(BuildError::InvalidPageIndex(page));
        }
        if !self.pages.contains_key(&self.default_page) {
            return Err(BuildError::UndefinedDefaultPage {
                page: self.default_page,
                defined: self.pages.keys().copied().collect(),
            });
        }

        cellmenu_core::debug!(
            title = %self.title,
            pages = self.pages.len(),
            default_page = self.default_page,
            "surface built"
        );

        Ok(Surface {
            surface_type: self.surface_type,
            title: self.title,
            pages: self.pages,
            default_page: self.default_page,
            on_click: self.on_click,
            transition_to: self.transition_to,
            transition_from: self.transition_from,
        })
    }
}
