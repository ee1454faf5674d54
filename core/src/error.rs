use thiserror::Error;

use crate::{CardCount, CardIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("Board size {0} is not a positive even number")]
    BoardSizeNotEven(CardCount),
    #[error("Column count {columns} does not divide board size {size}")]
    UnevenColumns { size: CardCount, columns: CardCount },
    #[error("Palette has {available} distinct colors, {required} are needed")]
    PaletteTooSmall {
        required: CardCount,
        available: CardCount,
    },
    #[error("A color appears {count} times, every color must appear exactly twice")]
    UnpairedColor { count: CardCount },
    #[error("Card {index} sits at position {position}")]
    MisplacedCard {
        index: CardIndex,
        position: CardIndex,
    },
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    #[error("Invalid card index {index}, board has {len} cards")]
    InvalidIndex { index: CardIndex, len: CardCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
