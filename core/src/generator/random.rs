use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::prelude::*;

use super::*;

/// Purely random deal: the first `size / 2` distinct palette colors, each twice, in uniformly random order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig, palette: &[Color]) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_board(config.size, config.columns, palette, &mut rng)
    }
}

/// Deals a fresh, fully hidden board using the supplied random source.
pub fn generate_board<R: Rng>(
    board_size: CardCount,
    column_count: CardCount,
    palette: &[Color],
    rng: &mut R,
) -> Result<Board> {
    let config = BoardConfig::new(board_size, column_count)?;
    let colors = pick_colors(palette, config.pairs())?;

    let mut remaining: Vec<Color> = Vec::with_capacity(config.size);
    for color in colors {
        remaining.push(color.clone());
        remaining.push(color.clone());
    }

    // draw without replacement, any remaining entry equally likely
    let mut dealt = Vec::with_capacity(config.size);
    while !remaining.is_empty() {
        let pick = rng.random_range(0..remaining.len());
        dealt.push(remaining.swap_remove(pick));
    }

    log::debug!(
        "Dealt {} cards over {} columns",
        config.size,
        config.columns
    );
    Ok(Board::from_shuffled(dealt, config.columns))
}

/// First `pairs` distinct colors of the palette, in palette order.
fn pick_colors(palette: &[Color], pairs: CardCount) -> Result<Vec<&Color>> {
    let mut seen = HashSet::with_capacity(pairs);
    let picked: Vec<&Color> = palette
        .iter()
        .filter(|&color| seen.insert(color))
        .take(pairs)
        .collect();

    if picked.len() < pairs {
        return Err(ConfigIssue::PaletteTooSmall {
            required: pairs,
            available: picked.len(),
        }
        .into());
    }
    Ok(picked)
}
