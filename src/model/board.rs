use itertools::iproduct;
use serde::{Deserialize, Serialize};

use super::{Card, ImageRef};

/// Row-major grid of cards.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    n_rows: usize,
    n_cols: usize,
    cards: Vec<Card>,
    pub seed: u64,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = String::new();
        output.push('\n');

        for row in 0..self.n_rows {
            output.push_str(&format!("{}|", row));
            for card in self.row(row) {
                let cell = match (&card.identity, card.found, card.revealed) {
                    (None, _, _) => "#".to_string(),
                    (Some(_), true, _) => "*".to_string(),
                    (Some(_), false, true) => "+".to_string(),
                    (Some(_), false, false) => ".".to_string(),
                };
                output.push_str(&format!("{}|", cell));
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

impl Board {
    /// Places `faces` in row-major order; cells past the end of `faces` become dead cells.
    pub fn new(n_rows: usize, n_cols: usize, faces: Vec<ImageRef>, seed: u64) -> Self {
        let mut faces = faces.into_iter();
        let cards = iproduct!(0..n_rows, 0..n_cols)
            .map(|(row, col)| match faces.next() {
                Some(face) => Card::new(row, col, face),
                None => Card::dead(row, col),
            })
            .collect();

        Self {
            n_rows,
            n_cols,
            cards,
            seed,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.n_rows && col < self.n_cols {
            Some(row * self.n_cols + col)
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Card> {
        self.index(row, col).map(|idx| &self.cards[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Card> {
        self.index(row, col).map(move |idx| &mut self.cards[idx])
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |card| card.row == row)
    }

    pub fn dead_cell_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_dead()).count()
    }

    pub fn remaining_pairs(&self) -> usize {
        self.cards.iter().filter(|card| !card.found).count() / 2
    }

    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(|card| card.found)
    }
}
