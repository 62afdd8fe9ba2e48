//! Bounded cursor movement for `TableState`.

use ratatui::widgets::TableState;

/// Moves the cursor one row down, stopping at the last row.
pub fn move_down(table: &mut TableState, len: usize) {
    if len == 0 {
        table.select(None);
        return;
    }
    let next = table
        .selected()
        .map_or(0, |i| i.saturating_add(1).min(len.saturating_sub(1)));
    table.select(Some(next));
}

/// Moves the cursor one row up, stopping at the first row.
pub fn move_up(table: &mut TableState, len: usize) {
    if len == 0 {
        table.select(None);
        return;
    }
    let prev = table.selected().map_or(0, |i| i.saturating_sub(1));
    table.select(Some(prev.min(len.saturating_sub(1))));
}

/// Selects the first row of a freshly loaded list, or nothing when empty.
pub fn reset(table: &mut TableState, len: usize) {
    *table = TableState::default();
    if len > 0 {
        table.select(Some(0));
    }
}

/// The selected row index, if it is within `len`.
#[must_use]
pub fn selected(table: &TableState, len: usize) -> Option<usize> {
    table.selected().filter(|&i| i < len)
}
