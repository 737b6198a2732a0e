//! Property-based invariant tests for compound scrolling and page strategies.
//!
//! 1. The offset stays within `[0, max(0, len - window)]` after any scroll sequence.
//! 2. A huge forward scroll lands on the last full window, a huge reverse one on 0.
//! 3. Scrolling by zero never changes the offset.
//! 4. Content mutation re-clamps the offset.
//! 5. `Next` resolves to the smallest defined page above the current one.

use std::collections::BTreeMap;

use cellmenu::compound::{Compound, CompoundWindow, Scroll};
use cellmenu::page::PageBuilder;
use cellmenu::page_change::PageChange;
use cellmenu_core::geometry::{Slots, SurfaceType};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn compound(window: usize, len: usize) -> Compound<usize, usize> {
    let mut page = PageBuilder::new(SurfaceType::SIX_BY_NINE, 1);
    let compound = page.create_compound(|n: &usize| *n);
    let cells: Vec<Slots> = (0..window).map(Slots::Index).collect();
    page.compound_space(cells, &compound);
    compound.extend_content(0..len);
    compound
}

fn step_strategy() -> impl Strategy<Value = (usize, usize, bool)> {
    (0usize..12, 0usize..5, any::<bool>())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Offset bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_stays_in_bounds(
        window in 1usize..=10,
        len in 0usize..40,
        steps in proptest::collection::vec(step_strategy(), 0..20),
    ) {
        let compound = compound(window, len);
        let max = len.saturating_sub(window);
        for (distance, times, reverse) in steps {
            compound.scroll(distance, times, reverse);
            prop_assert!(compound.offset() <= max);
        }
        prop_assert_eq!(compound.max_offset(), max);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Clamping at both ends
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn huge_scrolls_clamp(window in 1usize..=10, len in 0usize..40) {
        let compound = compound(window, len);
        compound.scroll(usize::MAX, usize::MAX, false);
        prop_assert_eq!(compound.offset(), len.saturating_sub(window));
        prop_assert!(!compound.scroll(1, 1, false));
        compound.scroll(usize::MAX, 2, true);
        prop_assert_eq!(compound.offset(), 0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Zero scroll
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zero_scroll_is_noop(
        window in 1usize..=10,
        len in 0usize..40,
        start in 0usize..40,
        times in 0usize..10,
        reverse in any::<bool>(),
    ) {
        let compound = compound(window, len);
        compound.scroll(start, 1, false);
        let before = compound.offset();
        prop_assert!(!compound.scroll(0, times, reverse));
        prop_assert!(!compound.scroll_by(Scroll::cells(0).times(times)));
        prop_assert_eq!(compound.offset(), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Mutation re-clamps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removal_reclamps(window in 1usize..=10, len in 0usize..40, keep_below in 0usize..40) {
        let compound = compound(window, len);
        compound.scroll(usize::MAX, 1, false);
        compound.remove_content_where(|n| *n >= keep_below);
        let remaining = len.min(keep_below);
        prop_assert_eq!(compound.len(), remaining);
        prop_assert!(compound.offset() <= remaining.saturating_sub(window));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Next strategy
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_is_smallest_greater(
        defined in proptest::collection::btree_set(1u32..50, 1..10),
        current in 1u32..50,
    ) {
        let pages: BTreeMap<u32, ()> = defined.iter().map(|p| (*p, ())).collect();
        let expected = defined.iter().copied().find(|p| *p > current);
        prop_assert_eq!(PageChange::Next.resolve(current, &pages), expected);
        let expected = defined.iter().copied().filter(|p| *p < current).max();
        prop_assert_eq!(PageChange::Previous.resolve(current, &pages), expected);
    }
}
