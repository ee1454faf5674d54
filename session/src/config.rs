use std::time::Duration;

use memorizer_core::{
    BoardConfig, Color, DEFAULT_MISMATCH_DELAY, DEFAULT_PALETTE, Difficulty, MissPenalty, Rules,
};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Session settings, usually picked on the difficulty menu.
///
/// ```toml
/// difficulty = "expert"
/// mismatch_delay_ms = 800
/// match_pause_ms = 300
/// seed = 42
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub mismatch_delay_ms: u64,
    pub match_pause_ms: Option<u64>,
    /// Overrides the penalty implied by `difficulty`.
    pub miss_penalty: Option<MissPenalty>,
    /// Fixed seed for reproducible deals. Fresh entropy when unset.
    pub seed: Option<u64>,
    pub palette: Option<Vec<Color>>,
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn board_config(&self) -> BoardConfig {
        self.difficulty.board_config()
    }

    pub fn rules(&self) -> Rules {
        Rules::new(
            self.miss_penalty
                .unwrap_or_else(|| self.difficulty.miss_penalty()),
        )
        .with_mismatch_delay(Duration::from_millis(self.mismatch_delay_ms))
        .with_match_pause(self.match_pause_ms.map(Duration::from_millis))
    }

    pub fn palette(&self) -> &[Color] {
        self.palette.as_deref().unwrap_or(&DEFAULT_PALETTE[..])
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY.as_millis() as u64,
            match_pause_ms: None,
            miss_penalty: None,
            seed: None,
            palette: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_difficulty() {
        let config = SessionConfig::new(Difficulty::Expert);
        let rules = config.rules();

        assert_eq!(rules.miss_penalty, MissPenalty::HideAll);
        assert_eq!(rules.mismatch_delay, Duration::from_secs(1));
        assert_eq!(rules.match_pause, None);
        assert_eq!(config.board_config(), BoardConfig::new_unchecked(30, 6));
        assert_eq!(config.palette(), &DEFAULT_PALETTE[..]);
    }

    #[test]
    fn parses_toml() {
        let config = SessionConfig::from_toml_str(
            r#"
            difficulty = "medium"
            mismatch_delay_ms = 750
            match_pause_ms = 200
            miss_penalty = "hide_all"
            seed = 9
            palette = ["red", "blue"]
            "#,
        )
        .unwrap();

        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.palette(), &[Color::new("red"), Color::new("blue")]);
        let rules = config.rules();
        assert_eq!(rules.miss_penalty, MissPenalty::HideAll);
        assert_eq!(rules.mismatch_delay, Duration::from_millis(750));
        assert_eq!(rules.match_pause, Some(Duration::from_millis(200)));
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            SessionConfig::from_toml_str("").unwrap(),
            SessionConfig::default()
        );
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let err = SessionConfig::from_toml_str(r#"difficulty = "nightmare""#).unwrap_err();
        assert!(matches!(err, crate::SessionError::Config(_)));
    }
}
