use itertools::Itertools;
use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{RngCore, SeedableRng};

use super::image_catalog::ImageCatalog;
use crate::model::{Board, Difficulty, ImageRef};

/// Deals a shuffled board of pairs for `difficulty`.
///
/// Easy boards draw from every category at once; normal and hard pick one category at
/// random. Up to `floor(cells / 2)` distinct images are used, each placed twice. When the
/// pool is too small the remaining cells become dead cells, so a board can always be
/// completed. The same seed and catalog always deal the same board.
pub fn generate_board(difficulty: Difficulty, catalog: &ImageCatalog, seed: Option<u64>) -> Board {
    let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
    let mut rng = StdRng::seed_from_u64(seed);

    let (n_rows, n_cols) = (difficulty.n_rows(), difficulty.n_cols());
    let pairs_needed = n_rows * n_cols / 2;

    let mut pool = image_pool(difficulty, catalog, &mut rng);
    pool.shuffle(&mut rng);
    pool.truncate(pairs_needed);
    if pool.len() < pairs_needed {
        warn!(
            target: "board_generator",
            "Only {} of {} images available; {} cells will be dead",
            pool.len(),
            pairs_needed,
            n_rows * n_cols - pool.len() * 2
        );
    }

    let mut faces: Vec<ImageRef> = pool.iter().chain(pool.iter()).cloned().collect();
    faces.shuffle(&mut rng);
    trace!(target: "board_generator", "Faces: {:?}", faces);

    let board = Board::new(n_rows, n_cols, faces, seed);
    info!(
        target: "board_generator",
        "New {} board; seed: {}; pairs: {}",
        difficulty,
        seed,
        pool.len()
    );
    board
}

/// Distinct images the board may use.
fn image_pool(difficulty: Difficulty, catalog: &ImageCatalog, rng: &mut StdRng) -> Vec<ImageRef> {
    let categories: Vec<_> = if difficulty.pools_all_categories() {
        catalog.categories.iter().collect()
    } else {
        catalog.categories.choose(rng).into_iter().collect()
    };
    trace!(
        target: "board_generator",
        "Selected categories: {:?}",
        categories.iter().map(|category| &category.name).collect::<Vec<_>>()
    );

    categories
        .into_iter()
        .flat_map(|category| category.images.iter().cloned())
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::image_catalog::ImageCategory;
    use crate::model::Card;
    use std::collections::HashMap;

    fn numbered(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{}/{}.png", prefix, i)).collect()
    }

    fn category(name: &str, count: usize) -> ImageCategory {
        let images = numbered(name, count);
        let refs: Vec<&str> = images.iter().map(|s| s.as_str()).collect();
        ImageCategory::new(name, &refs)
    }

    fn identity_counts(board: &Board) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for card in board.cards() {
            if let Some(identity) = &card.identity {
                *counts.entry(identity.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    #[test]
    fn test_every_identity_appears_exactly_twice() {
        let catalog = ImageCatalog::new(vec![category("fruit", 20), category("animals", 20)]);
        for difficulty in Difficulty::all() {
            for seed in 0..20 {
                let board = generate_board(difficulty, &catalog, Some(seed));
                assert_eq!(board.n_rows(), difficulty.n_rows());
                assert_eq!(board.n_cols(), difficulty.n_cols());
                assert_eq!(board.dead_cell_count(), 0);
                assert!(identity_counts(&board).values().all(|&count| count == 2));
                assert_eq!(identity_counts(&board).len(), difficulty.cell_count() / 2);
            }
        }
    }

    #[test]
    fn test_normal_and_hard_use_a_single_category() {
        let catalog = ImageCatalog::new(vec![category("fruit", 20), category("animals", 20)]);
        for difficulty in [Difficulty::Normal, Difficulty::Hard] {
            for seed in 0..20 {
                let board = generate_board(difficulty, &catalog, Some(seed));
                let prefixes: Vec<String> = board
                    .cards()
                    .filter_map(|card| card.identity.as_ref())
                    .map(|identity| identity.split('/').next().unwrap_or("").to_string())
                    .unique()
                    .collect();
                assert_eq!(prefixes.len(), 1, "seed {} mixed {:?}", seed, prefixes);
            }
        }
    }

    #[test]
    fn test_easy_pools_all_categories() {
        // neither category alone can fill 8 pairs
        let catalog = ImageCatalog::new(vec![category("fruit", 5), category("animals", 5)]);
        let board = generate_board(Difficulty::Easy, &catalog, Some(7));
        assert_eq!(board.dead_cell_count(), 0);
        assert_eq!(identity_counts(&board).len(), 8);
    }

    #[test]
    fn test_short_category_leaves_dead_cells() {
        let catalog = ImageCatalog::new(vec![category("fruit", 3)]);
        let board = generate_board(Difficulty::Hard, &catalog, Some(1));
        assert_eq!(board.dead_cell_count(), 30 - 6);
        assert!(identity_counts(&board).values().all(|&count| count == 2));
        assert!(board
            .cards()
            .filter(|card| card.is_dead())
            .all(|card: &Card| card.found));
    }

    #[test]
    fn test_duplicate_paths_are_not_dealt_twice() {
        let catalog = ImageCatalog::new(vec![ImageCategory::new(
            "fruit",
            &["fruit/a.png", "fruit/a.png", "fruit/b.png"],
        )]);
        let board = generate_board(Difficulty::Easy, &catalog, Some(3));
        assert_eq!(identity_counts(&board).len(), 2);
        assert_eq!(board.dead_cell_count(), 12);
    }

    #[test]
    fn test_empty_catalog_gives_a_completed_board() {
        let board = generate_board(Difficulty::Normal, &ImageCatalog::default(), None);
        assert_eq!(board.dead_cell_count(), 20);
        assert!(board.is_complete());
    }

    #[test]
    fn test_same_seed_same_board() {
        let catalog = ImageCatalog::new(vec![category("fruit", 20), category("animals", 20)]);
        let first = generate_board(Difficulty::Hard, &catalog, Some(42));
        let second = generate_board(Difficulty::Hard, &catalog, Some(42));
        assert_eq!(first, second);
        assert_eq!(first.seed, 42);
    }

    #[test]
    fn test_pair_faces_share_one_allocation() {
        let catalog = ImageCatalog::new(vec![category("fruit", 8)]);
        let board = generate_board(Difficulty::Easy, &catalog, Some(9));
        let first = board.get(0, 0).unwrap().identity.clone().unwrap();
        let twin = board
            .cards()
            .filter(|card| card.position() != (0, 0))
            .find_map(|card| card.identity.clone().filter(|id| *id == first))
            .unwrap();
        assert!(std::rc::Rc::ptr_eq(&first, &twin));
    }
}
