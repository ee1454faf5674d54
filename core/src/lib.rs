#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use clock::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use rules::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod card;
mod clock;
mod difficulty;
mod engine;
mod error;
mod generator;
mod rules;
mod snapshot;
mod types;

/// Board dimensions: total card count and the number of columns it is laid out over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: CardCount,
    pub columns: CardCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: CardCount, columns: CardCount) -> Self {
        Self { size, columns }
    }

    pub fn new(size: CardCount, columns: CardCount) -> Result<Self> {
        if size == 0 || size % 2 != 0 {
            return Err(ConfigIssue::BoardSizeNotEven(size).into());
        }
        if columns == 0 || size % columns != 0 {
            return Err(ConfigIssue::UnevenColumns { size, columns }.into());
        }
        Ok(Self::new_unchecked(size, columns))
    }

    pub const fn pairs(&self) -> CardCount {
        self.size / 2
    }

    pub const fn rows(&self) -> CardCount {
        self.size / self.columns
    }
}
