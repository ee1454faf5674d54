use core::time::Duration;
use serde::{Deserialize, Serialize};

/// How long a mismatched pair stays face-up before it is turned back.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);

/// Which cards a mismatch turns back once its delay runs out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPenalty {
    /// Only the two cards of the failed turn.
    #[default]
    HidePair,
    /// Every revealed card, confirmed pairs included. Those pairs go back into play.
    HideAll,
}

/// Turn resolution knobs that are not part of the board itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub miss_penalty: MissPenalty,
    pub mismatch_delay: Duration,
    /// Optional hold after a non-winning match. `None` releases the turn immediately.
    pub match_pause: Option<Duration>,
}

impl Rules {
    pub const fn new(miss_penalty: MissPenalty) -> Self {
        Self {
            miss_penalty,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            match_pause: None,
        }
    }

    pub const fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    pub const fn with_match_pause(mut self, pause: Option<Duration>) -> Self {
        self.match_pause = pause;
        self
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(MissPenalty::HidePair)
    }
}
