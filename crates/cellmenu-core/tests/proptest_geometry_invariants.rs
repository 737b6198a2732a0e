//! Property-based invariant tests for cell addressing.
//!
//! 1. A coordinate inside the grid resolves to exactly one index and round-trips.
//! 2. A coordinate outside the grid resolves to nothing.
//! 3. Rectangle resolution does not depend on corner order.
//! 4. Every resolved index is in bounds and unique.
//! 5. A fully in-bounds rectangle has rows × columns cells.
//! 6. A linear range keeps exactly the in-bounds cells between its endpoints
//!    in reading order.

use cellmenu_core::geometry::{Slot, Slots, SurfaceType};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn surface_strategy() -> impl Strategy<Value = SurfaceType> {
    (1u16..=8, 1u16..=12).prop_map(|(rows, columns)| SurfaceType::new(rows, columns))
}

fn slot_strategy() -> impl Strategy<Value = Slot> {
    (0u16..=14, 0u16..=14).prop_map(|(row, column)| Slot::new(row, column))
}

/// A surface together with two coordinates inside it.
fn surface_with_slots() -> impl Strategy<Value = (SurfaceType, Slot, Slot)> {
    surface_strategy().prop_flat_map(|ty| {
        let slot = (1..=ty.rows(), 1..=ty.columns()).prop_map(|(row, column)| Slot::new(row, column));
        (Just(ty), slot.clone(), slot)
    })
}

fn slots_strategy() -> impl Strategy<Value = Slots> {
    prop_oneof![
        slot_strategy().prop_map(Slots::Single),
        (0usize..200).prop_map(Slots::Index),
        (slot_strategy(), slot_strategy()).prop_map(|(from, to)| Slots::Rect { from, to }),
        (slot_strategy(), slot_strategy()).prop_map(|(from, to)| Slots::Linear { from, to }),
        (0u16..=10).prop_map(Slots::Row),
        (0u16..=14).prop_map(Slots::Column),
        (0u16..=5).prop_map(|padding| Slots::Border { padding }),
        Just(Slots::Corners),
        Just(Slots::All),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. In-bounds coordinates round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn in_bounds_slot_round_trips((ty, slot, _) in surface_with_slots()) {
        let cells = Slots::from(slot).resolve(ty);
        prop_assert_eq!(cells.len(), 1);
        prop_assert_eq!(ty.slot_of(cells[0]), Some(slot));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Out-of-bounds coordinates are dropped
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn out_of_bounds_slot_is_dropped(ty in surface_strategy(), slot in slot_strategy()) {
        prop_assume!(!ty.contains(slot));
        prop_assert!(Slots::from(slot).resolve(ty).is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Rectangle corner order is irrelevant
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rect_corner_order_independent(ty in surface_strategy(), a in slot_strategy(), b in slot_strategy()) {
        let forward = a.rect_to(b).resolve(ty);
        let backward = b.rect_to(a).resolve(ty);
        let crossed = Slot::new(a.row, b.column)
            .rect_to(Slot::new(b.row, a.column))
            .resolve(ty);
        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(&forward, &crossed);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Resolved indices are in bounds and unique
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolved_indices_in_bounds_and_unique(ty in surface_strategy(), set in slots_strategy()) {
        let cells = set.resolve(ty);
        for (i, index) in cells.iter().enumerate() {
            prop_assert!(*index < ty.cell_count(), "index {} out of {:?}", index, ty);
            prop_assert!(!cells[..i].contains(index), "duplicate index {}", index);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. In-bounds rectangle size
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn in_bounds_rect_has_full_area((ty, a, b) in surface_with_slots()) {
        let rows = a.row.abs_diff(b.row) as usize + 1;
        let columns = a.column.abs_diff(b.column) as usize + 1;
        let cells = a.rect_to(b).resolve(ty);
        prop_assert_eq!(cells.len(), rows * columns);
        prop_assert!(cells.windows(2).all(|w| w[0] < w[1]), "not row-major: {:?}", cells);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Linear ranges follow reading order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn linear_matches_reading_order_filter(
        ty in surface_strategy(),
        a in slot_strategy(),
        b in slot_strategy(),
    ) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let mut expected = Vec::new();
        for row in 0u16..=14 {
            for column in 0u16..=14 {
                let slot = Slot::new(row, column);
                if start <= slot && slot <= end {
                    if let Some(index) = slot.index_in(ty) {
                        expected.push(index);
                    }
                }
            }
        }
        prop_assert_eq!(a.linear_to(b).resolve(ty), expected);
    }
}
