use alloc::vec::Vec;
use core::ops::Index;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered sequence of cards, laid out row-major over `columns` columns.
///
/// Every color on a board appears exactly twice. Boards are only built through [`Board::from_colors`],
/// a [`BoardGenerator`] or deserialization, all of which enforce that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    cards: Vec<Card>,
    columns: CardCount,
}

impl Board {
    /// Builds an all-hidden board from colors given in board order.
    pub fn from_colors<I>(colors: I, columns: CardCount) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Color>,
    {
        let colors: Vec<Color> = colors.into_iter().map(Into::into).collect();
        BoardConfig::new(colors.len(), columns)?;
        check_pairs(&colors)?;
        Ok(Self::from_shuffled(colors, columns))
    }

    /// Trusts the caller on sizing and pairing.
    pub(crate) fn from_shuffled(colors: Vec<Color>, columns: CardCount) -> Self {
        let cards = colors
            .into_iter()
            .enumerate()
            .map(|(index, color)| Card::new(index, color))
            .collect();
        Self { cards, columns }
    }

    pub fn len(&self) -> CardCount {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn columns(&self) -> CardCount {
        self.columns
    }

    pub fn rows(&self) -> CardCount {
        self.len() / self.columns
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if index < self.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex {
                index,
                len: self.len(),
            })
        }
    }

    pub fn position(&self, index: CardIndex) -> Option<GridPos> {
        (index < self.len()).then(|| (index / self.columns, index % self.columns))
    }

    pub fn index_at(&self, (row, column): GridPos) -> Option<CardIndex> {
        (row < self.rows() && column < self.columns).then(|| row * self.columns + column)
    }

    pub fn all_revealed(&self) -> bool {
        self.cards.iter().all(Card::is_revealed)
    }

    pub fn pair_count(&self) -> CardCount {
        self.len() / 2
    }

    pub fn matched_pairs(&self) -> CardCount {
        self.cards.iter().filter(|card| card.is_matched()).count() / 2
    }

    pub fn pairs_left(&self) -> CardCount {
        self.pair_count() - self.matched_pairs()
    }

    pub(crate) fn card_mut(&mut self, index: CardIndex) -> &mut Card {
        &mut self.cards[index]
    }

    pub(crate) fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }
}

impl Index<CardIndex> for Board {
    type Output = Card;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[index]
    }
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct BoardRepr {
    cards: Vec<Card>,
    columns: CardCount,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(BoardRepr { cards, columns }: BoardRepr) -> Result<Self> {
        BoardConfig::new(cards.len(), columns)?;
        check_pairs(cards.iter().map(Card::color))?;
        if let Some((position, card)) = cards
            .iter()
            .enumerate()
            .find(|(position, card)| card.index() != *position)
        {
            return Err(ConfigIssue::MisplacedCard {
                index: card.index(),
                position,
            }
            .into());
        }
        Ok(Self { cards, columns })
    }
}

fn check_pairs<'a>(colors: impl IntoIterator<Item = &'a Color>) -> Result<()> {
    let mut counts: HashMap<&Color, CardCount> = HashMap::new();
    for color in colors {
        *counts.entry(color).or_default() += 1;
    }

    match counts.values().find(|&&count| count != 2) {
        Some(&count) => Err(ConfigIssue::UnpairedColor { count }.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn from_colors_assigns_positions_and_hides_everything() {
        let board = Board::from_colors(["a", "b", "a", "b"], 2).unwrap();

        assert_eq!(board.len(), 4);
        assert_eq!(board.rows(), 2);
        for (position, card) in board.cards().iter().enumerate() {
            assert_eq!(card.index(), position);
            assert!(!card.is_revealed());
        }
        assert_eq!(board[2].color(), &Color::new("a"));
    }

    #[test]
    fn from_colors_rejects_unpaired_colors() {
        let err = Board::from_colors(["a", "a", "a", "b"], 2).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidConfiguration(ConfigIssue::UnpairedColor { .. })
        ));
    }

    #[test]
    fn from_colors_rejects_odd_sizes() {
        let err = Board::from_colors(["a", "a", "b"], 3).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidConfiguration(ConfigIssue::BoardSizeNotEven(3))
        );
    }

    #[test]
    fn grid_positions_are_row_major() {
        let board = Board::from_colors(["a", "b", "c", "a", "b", "c"], 3).unwrap();

        assert_eq!(board.position(0), Some((0, 0)));
        assert_eq!(board.position(4), Some((1, 1)));
        assert_eq!(board.position(6), None);
        assert_eq!(board.index_at((1, 2)), Some(5));
        assert_eq!(board.index_at((2, 0)), None);
        assert_eq!(board.index_at((0, 3)), None);
    }

    #[test]
    fn deserializing_validates_layout() {
        let board = Board::from_colors(["a", "b", "b", "a"], 2).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let card = |index: usize, color: &str| {
            format!(
                r#"{{"index":{index},"color":"{color}","is_revealed":false,"is_matched":false}}"#
            )
        };
        let board_json = |cards: &[String], columns: usize| {
            format!(r#"{{"cards":[{}],"columns":{columns}}}"#, cards.join(","))
        };

        let no_columns = board_json(&[card(0, "a"), card(1, "a")], 0);
        let unpaired = board_json(&[card(0, "a"), card(1, "a"), card(2, "a"), card(3, "b")], 2);
        let odd = board_json(&[card(0, "a"), card(1, "a"), card(2, "b")], 3);
        let misplaced = board_json(&[card(1, "a"), card(0, "a")], 2);

        for json in [no_columns, unpaired, odd, misplaced] {
            assert!(serde_json::from_str::<Board>(&json).is_err(), "{json}");
        }
    }

    #[test]
    fn validate_index_reports_board_length() {
        let board = Board::from_colors(["a", "a"], 2).unwrap();

        assert_eq!(board.validate_index(1), Ok(1));
        assert_eq!(
            board.validate_index(2),
            Err(GameError::InvalidIndex { index: 2, len: 2 })
        );
    }
}
