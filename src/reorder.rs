//! Reordering of editable sequences (family report items, proclamation
//! sections).

use crate::error::DeckError;

/// Move the element at `from` so it ends up at index `to`.
///
/// Returns a new sequence; the input is left untouched. Both indices must be
/// within `items`.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, DeckError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(DeckError::IndexOutOfRange { index, len });
        }
    }
    let mut out = items.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    Ok(out)
}
