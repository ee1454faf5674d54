use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::CardIndex;

/// Color label printed on the face of a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const fn new(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }

    pub fn owned(label: impl Into<String>) -> Self {
        Self(Cow::Owned(label.into()))
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Color {
    fn from(label: &'static str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Color {
    fn from(label: String) -> Self {
        Self::owned(label)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fifteen distinct labels, enough for the largest preset board.
pub static DEFAULT_PALETTE: [Color; 15] = [
    Color::new("red"),
    Color::new("blue"),
    Color::new("orange"),
    Color::new("yellow"),
    Color::new("green"),
    Color::new("maroon"),
    Color::new("purple"),
    Color::new("black"),
    Color::new("turquoise"),
    Color::new("pink"),
    Color::new("brown"),
    Color::new("navy"),
    Color::new("lime"),
    Color::new("gold"),
    Color::new("silver"),
];

/// A single card. Only the owning board flips it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    index: CardIndex,
    color: Color,
    is_revealed: bool,
    is_matched: bool,
}

impl Card {
    pub(crate) fn new(index: CardIndex, color: Color) -> Self {
        Self {
            index,
            color,
            is_revealed: false,
            is_matched: false,
        }
    }

    pub const fn index(&self) -> CardIndex {
        self.index
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    /// Part of a confirmed pair. Matched cards are always revealed.
    pub const fn is_matched(&self) -> bool {
        self.is_matched
    }

    pub fn matches(&self, other: &Card) -> bool {
        self.color == other.color
    }

    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.is_revealed = true;
        self.is_matched = true;
    }

    pub(crate) fn hide(&mut self) {
        self.is_revealed = false;
        self.is_matched = false;
    }
}
