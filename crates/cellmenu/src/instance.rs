#![forbid(unsafe_code)]

//! Live surface instances and click dispatch.
//!
//! A [`SurfaceInstance`] binds one built [`Surface`] to one renderer and
//! tracks the page currently shown. Every click goes through
//! [`SurfaceInstance::dispatch`], which looks up the occupant of the clicked
//! cell, runs its reaction, then notifies the surface's global click
//! observer.
//!
//! # Dispatch rules
//!
//! | Occupant          | Reaction                                   | Outcome          |
//! |-------------------|--------------------------------------------|------------------|
//! | none              | nothing, observer not called               | `Ignored`        |
//! | `Button`          | callback                                   | `Blocked`        |
//! | `Placeholder`     | nothing                                    | `Blocked`        |
//! | `FreeCell`        | nothing                                    | `PermitDefault`  |
//! | `PageChange`      | strategy, transition, `on_change`          | `PageChanged` or `Blocked` |
//! | `SurfaceChange`   | factory, `on_change`                       | `SurfaceChange`  |
//! | `CompoundWindow`  | element callback, window re-render         | `Blocked`        |
//! | `CompoundScroll`  | scroll, re-render reserved cells if moved  | `Blocked`        |

use std::fmt;
use std::rc::Rc;

use cellmenu_core::event::ClickEvent;

use crate::element::{Occupant, PageChangeButton, SurfaceChangeButton};
use crate::render::SurfaceRenderer;
use crate::surface::Surface;
use crate::transition::{Direction, PageChangeEffect, SurfaceChangeEffect, TransitionAnimation};

/// Result of dispatching one click.
#[derive(Debug, Clone)]
pub enum ClickOutcome<I> {
    /// No occupant at the clicked cell.
    Ignored,
    /// Handled. The host must cancel its default interaction.
    Blocked,
    /// A free cell. The host should let its default interaction proceed.
    PermitDefault,
    /// The instance switched pages.
    PageChanged { from: u32, to: u32 },
    /// A surface-change button was clicked. The host decides how to open it,
    /// typically with [`SurfaceInstance::apply_surface_change`].
    SurfaceChange(SurfaceChange<I>),
}

impl<I> ClickOutcome<I> {
    /// Whether the host's default interaction may proceed.
    pub fn permits_default(&self) -> bool {
        matches!(self, ClickOutcome::PermitDefault)
    }
}

/// A pending switch to another surface.
#[derive(Clone)]
pub struct SurfaceChange<I> {
    pub surface: Rc<Surface<I>>,
    /// Always a page defined on `surface`.
    pub page: u32,
    pub effect: SurfaceChangeEffect,
}

impl<I> fmt::Debug for SurfaceChange<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceChange")
            .field("title", &self.surface.title())
            .field("page", &self.page)
            .field("effect", &self.effect)
            .finish()
    }
}

/// One surface shown to one viewer.
pub struct SurfaceInstance<I, R> {
    surface: Rc<Surface<I>>,
    current_page: u32,
    renderer: R,
}

impl<I, R> SurfaceInstance<I, R> {
    #[inline]
    pub fn surface(&self) -> &Rc<Surface<I>> {
        &self.surface
    }

    #[inline]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<I: Clone, R: SurfaceRenderer<I>> SurfaceInstance<I, R> {
    /// Open `surface` on its default page and render it.
    pub fn open(surface: Rc<Surface<I>>, renderer: R) -> Self {
        let page = surface.default_page();
        Self::open_at(surface, page, renderer)
    }

    /// Open `surface` on `page`, or on its default page when `page` is undefined.
    pub fn open_at(surface: Rc<Surface<I>>, page: u32, renderer: R) -> Self {
        let current_page = if surface.page(page).is_some() {
            page
        } else {
            surface.default_page()
        };
        let mut instance = Self {
            surface,
            current_page,
            renderer,
        };
        instance.renderer.set_title(instance.surface.title());
        instance.reload();
        instance
    }

    /// Re-render every cell of the current page.
    ///
    /// Call after changing compound content outside a dispatch.
    pub fn reload(&mut self) {
        let Some(page) = self.surface.page(self.current_page) else {
            return;
        };
        for cell in 0..self.surface.surface_type().cell_count() {
            self.renderer.set_cell(cell, page.icon_at(cell).as_ref());
        }
    }

    fn render_cells(&mut self, cells: &[usize]) {
        let Some(page) = self.surface.page(self.current_page) else {
            return;
        };
        for &cell in cells {
            self.renderer.set_cell(cell, page.icon_at(cell).as_ref());
        }
    }

    /// Switch to `page` without a button.
    ///
    /// Returns `false` when `page` is undefined or already shown.
    pub fn goto_page(&mut self, page: u32) -> bool {
        if page == self.current_page || self.surface.page(page).is_none() {
            return false;
        }
        self.switch_page(page, None);
        true
    }

    /// Replace the shown surface with the one a [`ClickOutcome::SurfaceChange`] named.
    pub fn apply_surface_change(&mut self, change: SurfaceChange<I>) {
        cellmenu_core::debug!(
            from = %self.surface.title(),
            to = %change.surface.title(),
            page = change.page,
            effect = ?change.effect,
            "surface changed"
        );
        self.surface = change.surface;
        self.current_page = if self.surface.page(change.page).is_some() {
            change.page
        } else {
            self.surface.default_page()
        };
        self.renderer.set_title(self.surface.title());
        self.reload();
    }

    /// Handle one click.
    pub fn dispatch(&mut self, event: &ClickEvent) -> ClickOutcome<I> {
        let span = cellmenu_core::debug_span!(
            "surface_dispatch",
            cell = event.slot,
            page = self.current_page
        );
        let _guard = span.enter();

        let occupant = self
            .surface
            .page(self.current_page)
            .and_then(|page| page.occupant_rc(event.slot));
        let Some(occupant) = occupant else {
            cellmenu_core::trace!(cell = event.slot, "click on empty cell");
            return ClickOutcome::Ignored;
        };
        cellmenu_core::trace!(cell = event.slot, occupant = occupant.kind(), "dispatch");

        let outcome = match &*occupant {
            Occupant::Button { on_click, .. } => {
                on_click(event);
                ClickOutcome::Blocked
            }
            Occupant::Placeholder { .. } => ClickOutcome::Blocked,
            Occupant::FreeCell => ClickOutcome::PermitDefault,
            Occupant::PageChange(button) => self.change_page(button, event),
            Occupant::SurfaceChange(button) => self.change_surface(button, event),
            Occupant::CompoundWindow { compound } => {
                if compound.click_cell(event.slot, event) {
                    self.render_cells(&compound.reserved_cells());
                }
                ClickOutcome::Blocked
            }
            Occupant::CompoundScroll {
                compound, scroll, ..
            } => {
                if compound.scroll_by(*scroll) {
                    self.render_cells(&compound.reserved_cells());
                }
                ClickOutcome::Blocked
            }
        };

        if let Some(on_click) = self.surface.on_click().cloned() {
            on_click(event);
        }
        outcome
    }

    fn change_page(&mut self, button: &PageChangeButton<I>, event: &ClickEvent) -> ClickOutcome<I> {
        let from = self.current_page;
        let target = button
            .strategy
            .resolve(from, self.surface.pages())
            .filter(|to| *to != from);

        let outcome = match target {
            Some(to) => {
                self.switch_page(to, button.effect);
                ClickOutcome::PageChanged { from, to }
            }
            None => {
                cellmenu_core::debug!(page = from, strategy = ?button.strategy, "no page to change to");
                ClickOutcome::Blocked
            }
        };

        if let Some(on_change) = &button.on_change {
            on_change(event);
        }
        outcome
    }

    fn switch_page(&mut self, to: u32, fallback: Option<PageChangeEffect>) {
        let from = self.current_page;
        let surface = Rc::clone(&self.surface);
        let (Some(current), Some(target)) = (surface.page(from), surface.page(to)) else {
            return;
        };

        let effect = target
            .enter_effect()
            .or(current.exit_effect())
            .or(fallback)
            .unwrap_or_default();
        let surface_type = surface.surface_type();
        let animation = TransitionAnimation::new(
            &current.frame(surface_type),
            &target.frame(surface_type),
            effect,
            Direction::between(from, to),
            surface_type,
        );

        self.current_page = to;
        cellmenu_core::debug!(from, to, effect = ?effect, "page changed");
        self.renderer.play(&animation);
    }

    fn change_surface(
        &mut self,
        button: &SurfaceChangeButton<I>,
        event: &ClickEvent,
    ) -> ClickOutcome<I> {
        let target = (button.target)();
        let page = button
            .page
            .filter(|page| target.page(*page).is_some())
            .unwrap_or_else(|| target.default_page());
        let effect = target
            .transition_to()
            .or(self.surface.transition_from())
            .unwrap_or_default();
        cellmenu_core::debug!(to = %target.title(), page, "surface change requested");

        if let Some(on_change) = &button.on_change {
            on_change(event);
        }
        ClickOutcome::SurfaceChange(SurfaceChange {
            surface: target,
            page,
            effect,
        })
    }
}

impl<I, R: fmt::Debug> fmt::Debug for SurfaceInstance<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceInstance")
            .field("surface", &self.surface)
            .field("current_page", &self.current_page)
            .field("renderer", &self.renderer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessRenderer;
    use crate::surface::SurfaceBuilder;
    use cellmenu_core::geometry::{Slot, SurfaceType};
    use std::cell::Cell;

    const STRIP: SurfaceType = SurfaceType::new(1, 5);

    fn open(surface: Surface<char>) -> SurfaceInstance<char, HeadlessRenderer<char>> {
        SurfaceInstance::open(Rc::new(surface), HeadlessRenderer::new(STRIP.cell_count()))
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn(&ClickEvent) + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move |_: &ClickEvent| handle.set(handle.get() + 1))
    }

    #[test]
    fn open_renders_default_page_and_title() {
        let surface = SurfaceBuilder::new(STRIP)
            .title("Strip")
            .default_page(2)
            .page(1, |page| {
                page.placeholder(Slot::new(1, 1), 'a');
            })
            .page(2, |page| {
                page.placeholder(Slot::new(1, 2), 'b');
            })
            .build()
            .unwrap();
        let instance = open(surface);
        assert_eq!(instance.current_page(), 2);
        assert_eq!(instance.renderer().cells(), &[None, Some('b'), None, None, None]);
        assert_eq!(instance.renderer().title(), "Strip");
    }

    #[test]
    fn open_at_undefined_page_falls_back() {
        let surface = SurfaceBuilder::<char>::new(STRIP).page(1, |_| {}).build().unwrap();
        let instance = SurfaceInstance::open_at(Rc::new(surface), 9, HeadlessRenderer::new(5));
        assert_eq!(instance.current_page(), 1);
    }

    #[test]
    fn empty_cell_is_ignored_without_observer() {
        let (seen, observer) = counter();
        let surface = SurfaceBuilder::new(STRIP)
            .on_click(observer)
            .page(1, |_| {})
            .build()
            .unwrap();
        let mut instance = open(surface);
        assert!(matches!(instance.dispatch(&ClickEvent::new(2)), ClickOutcome::Ignored));
        assert!(matches!(instance.dispatch(&ClickEvent::new(99)), ClickOutcome::Ignored));
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn button_then_observer() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let (button_log, observer_log) = (Rc::clone(&order), Rc::clone(&order));
        let surface = SurfaceBuilder::new(STRIP)
            .on_click(move |_| observer_log.borrow_mut().push("observer"))
            .page(1, |page| {
                page.button(Slot::new(1, 1), 'b', move |_| button_log.borrow_mut().push("button"));
            })
            .build()
            .unwrap();
        let mut instance = open(surface);
        assert!(matches!(instance.dispatch(&ClickEvent::new(0)), ClickOutcome::Blocked));
        assert_eq!(*order.borrow(), vec!["button", "observer"]);
    }

    #[test]
    fn free_cell_permits_default() {
        let surface = SurfaceBuilder::new(STRIP)
            .page(1, |page| {
                page.free_cell(Slot::new(1, 3));
            })
            .build()
            .unwrap();
        let mut instance = open(surface);
        assert!(instance.dispatch(&ClickEvent::new(2)).permits_default());
    }

    #[test]
    fn page_change_uses_target_enter_effect_first() {
        let surface = SurfaceBuilder::new(STRIP)
            .page(1, |page| {
                page.exit_effect(PageChangeEffect::SwipeVertically)
                    .next_page(Slot::new(1, 5), '>');
            })
            .page(2, |page| {
                page.enter_effect(PageChangeEffect::SlideHorizontally)
                    .previous_page(Slot::new(1, 1), '<');
            })
            .build()
            .unwrap();
        let mut instance = open(surface);
        let outcome = instance.dispatch(&ClickEvent::new(4));
        assert!(matches!(outcome, ClickOutcome::PageChanged { from: 1, to: 2 }));
        let played = instance.renderer().played()[0];
        assert_eq!(played.effect, PageChangeEffect::SlideHorizontally);
        assert_eq!(played.direction, Direction::Forward);
        assert_eq!(played.frames, 5);

        instance.dispatch(&ClickEvent::new(0));
        assert_eq!(instance.current_page(), 1);
        let played = instance.renderer().played()[1];
        assert_eq!(played.effect, PageChangeEffect::Instant);
        assert_eq!(played.direction, Direction::Backward);
    }

    #[test]
    fn exit_effect_then_button_effect() {
        use crate::element::PageChangeButton;
        use crate::page_change::PageChange;

        let surface = SurfaceBuilder::new(STRIP)
            .page(1, |page| {
                page.exit_effect(PageChangeEffect::SwipeHorizontally)
                    .page_change_button(
                        Slot::new(1, 5),
                        PageChangeButton::new('>', PageChange::To(2))
                            .effect(PageChangeEffect::SlideVertically),
                    );
            })
            .page(2, |page| {
                page.page_change_button(
                    Slot::new(1, 1),
                    PageChangeButton::new('<', PageChange::To(1))
                        .effect(PageChangeEffect::SlideVertically),
                );
            })
            .build()
            .unwrap();
        let mut instance = open(surface);
        instance.dispatch(&ClickEvent::new(4));
        instance.dispatch(&ClickEvent::new(0));
        let effects: Vec<_> = instance.renderer().played().iter().map(|p| p.effect).collect();
        assert_eq!(
            effects,
            vec![PageChangeEffect::SwipeHorizontally, PageChangeEffect::SlideVertically]
        );
    }

    #[test]
    fn goto_page_switches_defined_pages_only() {
        let surface = SurfaceBuilder::new(STRIP)
            .page(1, |_| {})
            .page(3, |page| {
                page.placeholder(Slot::new(1, 1), 'c');
            })
            .build()
            .unwrap();
        let mut instance = open(surface);
        assert!(!instance.goto_page(2));
        assert!(!instance.goto_page(1));
        assert!(instance.goto_page(3));
        assert_eq!(instance.renderer().cell(0), Some(&'c'));
    }

    #[test]
    fn surface_change_falls_back_to_target_default_page() {
        let target = Rc::new(
            SurfaceBuilder::new(STRIP)
                .title("Target")
                .default_page(2)
                .page(2, |page| {
                    page.placeholder(Slot::new(1, 1), 't');
                })
                .build()
                .unwrap(),
        );
        let factory = Rc::clone(&target);
        let (changes, on_change) = counter();
        let surface = SurfaceBuilder::new(STRIP)
            .title("Source")
            .page(1, |page| {
                page.change_surface(
                    Slot::new(1, 1),
                    SurfaceChangeButton::new('s', move || Rc::clone(&factory))
                        .page(7)
                        .on_change(on_change),
                );
            })
            .build()
            .unwrap();
        let mut instance = open(surface);
        let ClickOutcome::SurfaceChange(change) = instance.dispatch(&ClickEvent::new(0)) else {
            panic!("expected a surface change");
        };
        assert_eq!(change.page, 2);
        assert_eq!(change.effect, SurfaceChangeEffect::Instant);
        assert!(Rc::ptr_eq(&change.surface, &target));
        assert_eq!(changes.get(), 1);

        instance.apply_surface_change(change);
        assert_eq!(instance.current_page(), 2);
        assert_eq!(instance.renderer().title(), "Target");
        assert_eq!(instance.renderer().cell(0), Some(&'t'));
    }

    #[test]
    fn compound_window_click_rerenders_window() {
        let mut compound = None;
        let surface = SurfaceBuilder::new(STRIP)
            .page(1, |page| {
                let list = page.create_compound(|c: &char| *c);
                page.compound_space(Slot::new(1, 1).rect_to(Slot::new(1, 3)), &list);
                compound = Some(list);
            })
            .build()
            .unwrap();
        let compound = compound.unwrap();
        compound.extend_content(['a', 'b', 'c', 'd']);
        let handle = compound.clone();
        let compound = compound.with_on_click(move |_, clicked| {
            let clicked = *clicked;
            handle.remove_content_where(|c| *c == clicked);
        });

        let mut instance = open(surface);
        assert_eq!(instance.renderer().cells(), &[Some('a'), Some('b'), Some('c'), None, None]);
        instance.dispatch(&ClickEvent::new(1));
        assert_eq!(compound.len(), 3);
        assert_eq!(instance.renderer().cells(), &[Some('a'), Some('c'), Some('d'), None, None]);
    }
}
