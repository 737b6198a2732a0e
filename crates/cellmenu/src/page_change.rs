#![forbid(unsafe_code)]

//! Page-change strategies.
//!
//! A strategy is a pure rule evaluated on every click against the current
//! page and the set of pages the surface defines.

use std::collections::BTreeMap;

/// Rule used by a page-change button to pick its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageChange {
    /// Always the given page, if it is defined.
    To(u32),
    /// The greatest defined page below the current one.
    Previous,
    /// The smallest defined page above the current one.
    Next,
}

impl PageChange {
    /// Destination page, or `None` when there is nowhere to go.
    ///
    /// `To(n)` may resolve to the current page; the caller decides whether
    /// that counts as a transition.
    pub fn resolve<V>(&self, current: u32, pages: &BTreeMap<u32, V>) -> Option<u32> {
        match *self {
            PageChange::To(target) => pages.contains_key(&target).then_some(target),
            PageChange::Previous => pages.range(..current).next_back().map(|(index, _)| *index),
            PageChange::Next => pages
                .range(current.saturating_add(1)..)
                .next()
                .map(|(index, _)| *index)
                .filter(|index| *index > current),
        }
    }
}
