use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Asset path of a card face. Both cards of a pair alias the same allocation.
pub type ImageRef = Rc<str>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub row: usize,
    pub col: usize,
    pub identity: Option<ImageRef>,
    /// Has been face-up at least once.
    pub revealed: bool,
    pub found: bool,
}

impl Card {
    pub fn new(row: usize, col: usize, identity: ImageRef) -> Self {
        Self {
            row,
            col,
            identity: Some(identity),
            revealed: false,
            found: false,
        }
    }

    /// A cell left over when there are not enough images to pair it; it is solved from the start.
    /// Dead cells are the one exception to "found implies revealed": they are never shown.
    pub fn dead(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            identity: None,
            revealed: false,
            found: true,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.identity.is_none()
    }

    pub fn is_selectable(&self) -> bool {
        !self.found && !self.is_dead()
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn same_identity(&self, other: &Card) -> bool {
        match (&self.identity, &other.identity) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.identity {
            Some(identity) => write!(f, "{},{}={}", self.row, self.col, identity),
            None => write!(f, "{},{}=<dead>", self.row, self.col),
        }
    }
}
