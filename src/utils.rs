use crate::DropPosition;

/// Position at which the item removed from `source_idx` is reinserted when it is dropped on the item
/// at `target_idx`. Both indices refer to the list *before* the removal.
pub fn insert_index(source_idx: usize, target_idx: usize, position: DropPosition) -> usize {
    let mut idx = target_idx;

    // removing the source shifts everything after it one slot to the left
    if source_idx < target_idx {
        idx -= 1;
    }

    if position == DropPosition::Below {
        idx += 1;
    }

    idx
}

/// Removes value at `source_idx` and places it on the `position` side of the value at `target_idx`.
/// Does nothing if `source_idx` is equal to `target_idx` or if either index is outside the vec bounds.
/// Returns true if the vec was touched.
pub fn shift_vec<T>(
    source_idx: usize,
    target_idx: usize,
    position: DropPosition,
    vec: &mut Vec<T>,
) -> bool {
    if source_idx == target_idx || source_idx >= vec.len() || target_idx >= vec.len() {
        return false;
    }

    let insert_idx = insert_index(source_idx, target_idx, position);
    let item = vec.remove(source_idx);
    vec.insert(insert_idx, item);
    true
}
