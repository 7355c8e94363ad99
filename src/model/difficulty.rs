use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
    }

    pub fn n_rows(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Normal => 4,
            Difficulty::Hard => 5,
        }
    }

    pub fn n_cols(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Normal => 5,
            Difficulty::Hard => 6,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.n_rows() * self.n_cols()
    }

    /// Starting score before mistake and time penalties.
    pub fn base_score(&self) -> f64 {
        match self {
            Difficulty::Easy => 50.0,
            Difficulty::Normal => 100.0,
            Difficulty::Hard => 200.0,
        }
    }

    /// Divisor bringing a raw score down to its easy-mode equivalent.
    pub fn relative_divisor(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Normal => 2.0,
            Difficulty::Hard => 4.0,
        }
    }

    /// Easy boards draw from every category; the others stick to one.
    pub fn pools_all_categories(&self) -> bool {
        matches!(self, Difficulty::Easy)
    }

    /// Stable lowercase name, used in persisted keys.
    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn record_key(&self) -> String {
        format!("record_score_{}", self.key())
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        assert_eq!((Difficulty::Easy.n_rows(), Difficulty::Easy.n_cols()), (4, 4));
        assert_eq!(
            (Difficulty::Normal.n_rows(), Difficulty::Normal.n_cols()),
            (4, 5)
        );
        assert_eq!((Difficulty::Hard.n_rows(), Difficulty::Hard.n_cols()), (5, 6));
        assert_eq!(Difficulty::Hard.cell_count(), 30);
    }

    #[test]
    fn test_record_key() {
        assert_eq!(Difficulty::Normal.record_key(), "record_score_normal");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("veteran".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Difficulty::Normal).unwrap();
        assert_eq!(json, "\"normal\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }
}
