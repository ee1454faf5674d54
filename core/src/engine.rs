use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Idle -> OneSelected
/// - OneSelected -> Idle (match, released at once)
/// - OneSelected -> Resolving (miss, or match while a pause is configured)
/// - OneSelected -> Won
/// - Resolving -> Idle (settled)
/// - any -> Idle (restart)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    #[default]
    Idle,
    OneSelected,
    Resolving,
    Won,
}

impl TurnState {
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Resolving)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Cards turned face-up during the current turn, in the order they were picked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(SmallVec<[CardIndex; 2]>);

impl Selection {
    pub fn first(&self) -> Option<CardIndex> {
        self.0.first().copied()
    }

    pub fn second(&self) -> Option<CardIndex> {
        self.0.get(1).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: CardIndex) -> bool {
        self.0.contains(&index)
    }

    pub fn as_slice(&self) -> &[CardIndex] {
        &self.0
    }

    fn push(&mut self, index: CardIndex) {
        debug_assert!(self.0.len() < 2 && !self.0.contains(&index));
        self.0.push(index);
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Identifies one delayed settlement. Only the ticket of the turn currently
/// resolving on the current board is honoured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettleTicket {
    generation: Generation,
    turn: u32,
}

impl SettleTicket {
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    pub const fn turn(&self) -> u32 {
        self.turn
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Settlement {
    /// Turn the missed cards back.
    Mismatch,
    /// Release a matched turn after the cosmetic pause.
    MatchPause,
}

/// A turn outcome the host has to deliver back through [`PlayEngine::settle`] after `delay`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingSettle {
    pub ticket: SettleTicket,
    pub kind: Settlement,
    pub delay: Duration,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    AlreadyRevealed,
    Busy,
    Finished,
}

/// Outcome of selecting a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Input absorbed without any state change
    Ignored(IgnoreReason),
    /// First card of a turn turned face-up
    Revealed,
    /// Second card matched the first, the turn is over
    Matched,
    /// Second card completed the board
    Won,
    /// Turn is resolving until the host settles it
    Pending(PendingSettle),
}

impl SelectOutcome {
    /// Whether this outcome changed the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }

    pub const fn pending(self) -> Option<PendingSettle> {
        match self {
            Self::Pending(pending) => Some(pending),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Ticket belongs to an older board or an already settled turn
    Stale,
    /// Turn released, `hidden` cards were turned back
    Settled { hidden: CardCount },
}

impl SettleOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Settled { .. })
    }
}

/// Turn resolver. Owns the board, the current selection and the progress counters.
///
/// The engine never sleeps: outcomes that need a delay come back as [`SelectOutcome::Pending`], the
/// engine stays busy, and the host calls [`PlayEngine::settle`] once the delay has passed.
#[derive(Clone, Debug)]
pub struct PlayEngine<C> {
    board: Board,
    rules: Rules,
    clock: C,
    selection: Selection,
    state: TurnState,
    turn_count: u32,
    generation: Generation,
    started: bool,
    pending: Option<(SettleTicket, Settlement)>,
}

impl<C: ElapsedClock> PlayEngine<C> {
    pub fn new(board: Board, rules: Rules, clock: C) -> Self {
        Self {
            board,
            rules,
            clock,
            selection: Selection::default(),
            state: TurnState::default(),
            turn_count: 0,
            generation: 0,
            started: false,
            pending: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn is_won(&self) -> bool {
        self.state.is_finished()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn matched_pairs(&self) -> CardCount {
        self.board.matched_pairs()
    }

    pub fn pending_ticket(&self) -> Option<SettleTicket> {
        self.pending.map(|(ticket, _)| ticket)
    }

    pub fn can_select(&self, index: CardIndex) -> bool {
        !self.state.is_busy()
            && !self.state.is_finished()
            && self.board.card(index).is_some_and(|card| !card.is_revealed())
    }

    pub fn select_card(&mut self, index: CardIndex) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let index = self.board.validate_index(index)?;

        if let Some(reason) = self.ignore_reason(index) {
            log::trace!("Ignoring selection of card {index}: {reason:?}");
            return Ok(Ignored(reason));
        }

        self.board.card_mut(index).reveal();
        self.selection.push(index);

        Ok(match (self.selection.first(), self.selection.second()) {
            (Some(first), Some(second)) => self.resolve_turn(first, second),
            _ => {
                self.state = TurnState::OneSelected;
                self.mark_started();
                Revealed
            }
        })
    }

    /// Applies a delayed outcome. Tickets from an earlier board or an already settled turn are ignored.
    pub fn settle(&mut self, ticket: SettleTicket) -> SettleOutcome {
        let kind = match self.pending {
            Some((pending, kind)) if pending == ticket => kind,
            _ => {
                log::warn!(
                    "Dropping stale settlement for turn {} of board {}, current board is {}",
                    ticket.turn,
                    ticket.generation,
                    self.generation
                );
                return SettleOutcome::Stale;
            }
        };
        self.pending = None;

        let hidden = match kind {
            Settlement::Mismatch => self.apply_miss_penalty(),
            Settlement::MatchPause => 0,
        };
        log::debug!(
            "Settled turn {} ({:?}), {} cards turned back",
            ticket.turn,
            kind,
            hidden
        );
        self.end_turn();
        SettleOutcome::Settled { hidden }
    }

    /// Swaps in a fresh board and forgets everything about the previous one.
    pub fn restart(&mut self, board: Board) {
        self.board = board;
        self.selection.clear();
        self.state = TurnState::Idle;
        self.turn_count = 0;
        self.generation = self.generation.wrapping_add(1);
        self.started = false;
        self.pending = None;
        self.clock.reset();
        log::debug!(
            "Restarted with board {} ({} cards)",
            self.generation,
            self.board.len()
        );
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            selection: self.selection.clone(),
            state: self.state,
            turn_count: self.turn_count,
            is_busy: self.is_busy(),
            is_won: self.is_won(),
            elapsed: self.clock.read(),
            generation: self.generation,
        }
    }

    fn ignore_reason(&self, index: CardIndex) -> Option<IgnoreReason> {
        if self.state.is_finished() {
            Some(IgnoreReason::Finished)
        } else if self.state.is_busy() {
            Some(IgnoreReason::Busy)
        } else if self.board[index].is_revealed() {
            Some(IgnoreReason::AlreadyRevealed)
        } else {
            None
        }
    }

    fn resolve_turn(&mut self, first: CardIndex, second: CardIndex) -> SelectOutcome {
        self.state = TurnState::Resolving;
        self.turn_count += 1;

        if !self.board[first].matches(&self.board[second]) {
            log::debug!(
                "Turn {}: card {first} does not match card {second}",
                self.turn_count
            );
            return SelectOutcome::Pending(
                self.schedule(Settlement::Mismatch, self.rules.mismatch_delay),
            );
        }

        self.board.card_mut(first).mark_matched();
        self.board.card_mut(second).mark_matched();
        log::debug!(
            "Turn {}: card {first} matches card {second}",
            self.turn_count
        );

        if self.board.all_revealed() {
            self.clock.pause();
            self.selection.clear();
            self.state = TurnState::Won;
            log::info!(
                "Board cleared in {} turns ({})",
                self.turn_count,
                self.clock.read()
            );
            return SelectOutcome::Won;
        }

        match self.rules.match_pause {
            Some(pause) => SelectOutcome::Pending(self.schedule(Settlement::MatchPause, pause)),
            None => {
                self.end_turn();
                SelectOutcome::Matched
            }
        }
    }

    fn schedule(&mut self, kind: Settlement, delay: Duration) -> PendingSettle {
        let ticket = SettleTicket {
            generation: self.generation,
            turn: self.turn_count,
        };
        self.pending = Some((ticket, kind));
        PendingSettle {
            ticket,
            kind,
            delay,
        }
    }

    fn apply_miss_penalty(&mut self) -> CardCount {
        match self.rules.miss_penalty {
            MissPenalty::HidePair => {
                for &index in self.selection.as_slice() {
                    self.board.card_mut(index).hide();
                }
                self.selection.len()
            }
            MissPenalty::HideAll => {
                let mut hidden = 0;
                for card in self.board.cards_mut().filter(|card| card.is_revealed()) {
                    card.hide();
                    hidden += 1;
                }
                hidden
            }
        }
    }

    fn end_turn(&mut self) {
        self.selection.clear();
        self.state = TurnState::Idle;
    }

    fn mark_started(&mut self) {
        if !self.started {
            self.started = true;
            self.clock.start();
        }
    }
}
