use egui::{pos2, vec2, Rect};
use egui_reorder::utils::shift_vec;
use egui_reorder::{DragDropUi, DropPosition};
use proptest::prelude::*;

fn row(index: usize) -> Rect {
    Rect::from_min_size(pos2(0.0, index as f32 * 24.0), vec2(200.0, 24.0))
}

fn drop_position() -> impl Strategy<Value = DropPosition> {
    prop_oneof![Just(DropPosition::Above), Just(DropPosition::Below)]
}

/// A list plus a dragged index and a drop index inside it.
fn list_and_indices() -> impl Strategy<Value = (Vec<u32>, usize, usize)> {
    prop::collection::vec(any::<u32>(), 1..32).prop_flat_map(|items| {
        let len = items.len();
        (Just(items), 0..len, 0..len)
    })
}

/// Drives a full gesture on a fresh controller and returns what was committed, if anything.
fn gesture(items: &[u32], source: usize, target: usize, position: DropPosition) -> Option<Vec<u32>> {
    let mut dnd = DragDropUi::default();
    dnd.begin_drag(source);
    let rect = row(target);
    let y = match position {
        DropPosition::Above => rect.top() + 1.0,
        DropPosition::Below => rect.bottom() - 1.0,
    };
    dnd.hover(target, y, rect);

    let mut committed = None;
    let mut calls = 0;
    dnd.drop(items, target, |new_items| {
        calls += 1;
        committed = Some(new_items);
    });
    assert!(calls <= 1);
    assert_eq!(dnd.dragged_index(), None);
    assert_eq!(dnd.drag_over_index(), None);
    committed
}

proptest! {
    #[test]
    fn drop_is_a_permutation(
        (items, source, target) in list_and_indices(),
        position in drop_position(),
    ) {
        prop_assume!(source != target);
        let reordered = gesture(&items, source, target, position);
        prop_assert!(reordered.is_some());
        let reordered = reordered.unwrap_or_default();

        prop_assert_eq!(reordered.len(), items.len());
        let mut expected = items.clone();
        let mut actual = reordered.clone();
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn drop_matches_shift_vec(
        (items, source, target) in list_and_indices(),
        position in drop_position(),
    ) {
        prop_assume!(source != target);
        let mut expected = items.clone();
        prop_assert!(shift_vec(source, target, position, &mut expected));
        prop_assert_eq!(gesture(&items, source, target, position), Some(expected));
    }

    #[test]
    fn dragged_item_lands_beside_target(
        (items, source, target) in list_and_indices(),
        position in drop_position(),
    ) {
        prop_assume!(source != target);
        // tag every slot with its original index so duplicates don't matter
        let tagged: Vec<u32> = (0..items.len() as u32).collect();
        let reordered = gesture(&tagged, source, target, position).unwrap_or_default();

        let moved = reordered.iter().position(|&i| i as usize == source);
        let anchor = reordered.iter().position(|&i| i as usize == target);
        prop_assert!(moved.is_some() && anchor.is_some());
        let (moved, anchor) = (moved.unwrap_or_default(), anchor.unwrap_or_default());
        match position {
            DropPosition::Above => prop_assert_eq!(moved + 1, anchor),
            DropPosition::Below => prop_assert_eq!(anchor + 1, moved),
        }
    }

    #[test]
    fn drop_onto_itself_never_commits(
        (items, source, _target) in list_and_indices(),
        position in drop_position(),
    ) {
        prop_assert_eq!(gesture(&items, source, source, position), None);
    }

    #[test]
    fn end_drag_always_returns_to_idle(
        (_items, source, target) in list_and_indices(),
        pointer_y in 0.0f32..800.0,
    ) {
        let mut dnd = DragDropUi::default();
        dnd.begin_drag(source);
        dnd.hover(target, pointer_y, row(target));
        dnd.end_drag();
        prop_assert!(!dnd.is_dragging());
        prop_assert_eq!(dnd.drag_over_index(), None);
        prop_assert_eq!(dnd.drop_position(), DropPosition::Below);
    }
}
