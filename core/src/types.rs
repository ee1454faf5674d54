/// Position of a card on the board. Doubles as the card's identity for the lifetime of the board.
pub type CardIndex = usize;

/// Count type used for board sizes, column counts and pair counts.
pub type CardCount = usize;

/// Row and column of a card in the laid out grid.
pub type GridPos = (CardCount, CardCount);

/// Monotonic board counter, bumped every time a fresh board replaces the current one.
pub type Generation = u64;
