use serde::{Deserialize, Serialize};

pub type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
}

/// Cards picked in the current turn, in click order. Never holds more than two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Vec<Position>,
}

impl SelectionState {
    pub const MAX: usize = 2;

    /// Clicking a selected card deselects it. Callers must not toggle a third card in;
    /// a full selection is resolved with `take_pair` first.
    pub fn toggle(&mut self, position: Position) -> SelectionChange {
        if let Some(idx) = self.selected.iter().position(|&p| p == position) {
            self.selected.remove(idx);
            return SelectionChange::Removed;
        }
        debug_assert!(self.selected.len() < Self::MAX);
        self.selected.push(position);
        SelectionChange::Added
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Empties a full selection and returns it in click order.
    pub fn take_pair(&mut self) -> Option<(Position, Position)> {
        if self.selected.len() != Self::MAX {
            return None;
        }
        let second = self.selected.pop()?;
        let first = self.selected.pop()?;
        Some((first, second))
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_deselects() {
        let mut selection = SelectionState::default();
        assert_eq!(selection.toggle((0, 0)), SelectionChange::Added);
        assert_eq!(selection.toggle((0, 0)), SelectionChange::Removed);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_take_pair_keeps_click_order() {
        let mut selection = SelectionState::default();
        selection.toggle((1, 2));
        assert_eq!(selection.take_pair(), None);
        selection.toggle((0, 3));
        assert_eq!(selection.take_pair(), Some(((1, 2), (0, 3))));
        assert!(selection.is_empty());
    }
}
