use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    /// Same board as [`Difficulty::Hard`], but a miss turns every revealed card back.
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    pub const fn board_config(self) -> BoardConfig {
        use Difficulty::*;
        match self {
            Easy => BoardConfig::new_unchecked(12, 4),
            Medium => BoardConfig::new_unchecked(20, 5),
            Hard | Expert => BoardConfig::new_unchecked(30, 6),
        }
    }

    pub const fn miss_penalty(self) -> MissPenalty {
        match self {
            Self::Expert => MissPenalty::HideAll,
            Self::Easy | Self::Medium | Self::Hard => MissPenalty::HidePair,
        }
    }

    pub const fn rules(self) -> Rules {
        Rules::new(self.miss_penalty())
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
            Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::InvalidConfiguration(ConfigIssue::UnknownDifficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_table() {
        let table: [(Difficulty, CardCount, CardCount, MissPenalty); 4] = [
            (Difficulty::Easy, 12, 4, MissPenalty::HidePair),
            (Difficulty::Medium, 20, 5, MissPenalty::HidePair),
            (Difficulty::Hard, 30, 6, MissPenalty::HidePair),
            (Difficulty::Expert, 30, 6, MissPenalty::HideAll),
        ];

        for (difficulty, size, columns, penalty) in table {
            let config = difficulty.board_config();
            assert_eq!((config.size, config.columns), (size, columns), "{difficulty}");
            assert_eq!(difficulty.rules().miss_penalty, penalty, "{difficulty}");
            assert_eq!(BoardConfig::new(size, columns), Ok(config));
            assert!(config.pairs() <= DEFAULT_PALETTE.len());
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Expert".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert_eq!(" medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(GameError::InvalidConfiguration(ConfigIssue::UnknownDifficulty))
        );
    }

    #[test]
    fn serializes_as_lowercase_name() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Hard).unwrap(),
            "\"hard\""
        );
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }
}
