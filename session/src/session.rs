use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use memorizer_core::{
    Board, CardIndex, Difficulty, Elapsed, ElapsedClock, GameSnapshot, PendingSettle, PlayEngine,
    SelectOutcome, SettleTicket, Stopwatch, generate_board,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::{Result, SessionConfig};

/// Starts a session for `difficulty` with default settings and a wall clock stopwatch.
///
/// Must be called from within a tokio runtime.
pub fn create_game(difficulty: Difficulty) -> Result<GameSession> {
    GameSession::new(SessionConfig::new(difficulty))
}

/// One game, owned by the caller. Every mutation goes through [`GameSession::select_card`] and
/// [`GameSession::restart`].
///
/// Delayed outcomes run as tasks on the runtime the session was created in. The task only holds a
/// weak reference, and restarting or dropping the session aborts it.
pub struct GameSession<C = Stopwatch> {
    shared: Arc<Mutex<Shared<C>>>,
    runtime: Handle,
}

struct Shared<C> {
    engine: PlayEngine<C>,
    config: SessionConfig,
    rng: SmallRng,
    delay_task: Option<AbortHandle>,
    subscribers: Vec<UnboundedSender<GameSnapshot>>,
}

impl GameSession<Stopwatch> {
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_clock(config, Stopwatch::new())
    }
}

impl<C> GameSession<C>
where
    C: ElapsedClock + Send + 'static,
{
    pub fn with_clock(config: SessionConfig, clock: C) -> Result<Self> {
        let runtime = Handle::try_current()?;
        let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let board = deal(&config, &mut rng)?;
        Ok(Self::assemble(runtime, config, rng, board, clock))
    }

    /// Plays `board` first. Restarts deal according to `config`.
    pub fn with_board(config: SessionConfig, board: Board, clock: C) -> Result<Self> {
        let runtime = Handle::try_current()?;
        let rng = SmallRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Ok(Self::assemble(runtime, config, rng, board, clock))
    }

    fn assemble(
        runtime: Handle,
        config: SessionConfig,
        rng: SmallRng,
        board: Board,
        clock: C,
    ) -> Self {
        log::debug!(
            "New {} session, {} cards",
            config.difficulty,
            board.len()
        );
        let engine = PlayEngine::new(board, config.rules(), clock);
        let shared = Shared {
            engine,
            config,
            rng,
            delay_task: None,
            subscribers: Vec::new(),
        };
        Self {
            shared: Arc::new(Mutex::new(shared)),
            runtime,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.lock().config.difficulty
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().engine.snapshot()
    }

    pub fn turn_count(&self) -> u32 {
        self.lock().engine.turn_count()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().engine.is_busy()
    }

    pub fn is_won(&self) -> bool {
        self.lock().engine.is_won()
    }

    pub fn elapsed(&self) -> Elapsed {
        self.lock().engine.clock().read()
    }

    /// Read access to the engine, e.g. to inspect the clock.
    pub fn inspect<R>(&self, f: impl FnOnce(&PlayEngine<C>) -> R) -> R {
        f(&self.lock().engine)
    }

    /// Receives a snapshot after every transition, delayed ones included.
    pub fn subscribe(&self) -> UnboundedReceiver<GameSnapshot> {
        let (tx, rx) = mpsc::unbounded();
        self.lock().subscribers.push(tx);
        rx
    }

    pub fn select_card(&self, index: CardIndex) -> Result<SelectOutcome> {
        let mut shared = self.lock();
        let outcome = shared.engine.select_card(index)?;

        if let Some(pending) = outcome.pending() {
            if let Some(stale) = shared.delay_task.replace(self.schedule(pending)) {
                stale.abort();
            }
        }
        if outcome.has_update() {
            shared.publish();
        }
        Ok(outcome)
    }

    /// Deals a fresh board for the session's difficulty. Any pending delayed outcome is dropped.
    pub fn restart(&self) -> Result<()> {
        self.lock().restart()
    }

    fn schedule(&self, pending: PendingSettle) -> AbortHandle {
        let shared = Arc::downgrade(&self.shared);
        self.runtime
            .spawn(async move {
                tokio::time::sleep(pending.delay).await;
                settle(&shared, pending.ticket);
            })
            .abort_handle()
    }

    fn lock(&self) -> MutexGuard<'_, Shared<C>> {
        lock(&self.shared)
    }
}

impl<C> Drop for GameSession<C> {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.shared).delay_task.take() {
            task.abort();
        }
    }
}

impl<C: ElapsedClock> Shared<C> {
    fn restart(&mut self) -> Result<()> {
        if let Some(task) = self.delay_task.take() {
            task.abort();
        }
        let board = deal(&self.config, &mut self.rng)?;
        self.engine.restart(board);
        self.publish();
        Ok(())
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.engine.snapshot();
        self.subscribers
            .retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }
}

fn settle<C: ElapsedClock>(shared: &Weak<Mutex<Shared<C>>>, ticket: SettleTicket) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let mut shared = lock(&shared);
    if shared.engine.settle(ticket).has_update() {
        shared.delay_task = None;
        shared.publish();
    }
}

fn deal(config: &SessionConfig, rng: &mut SmallRng) -> Result<Board> {
    let board_config = config.board_config();
    Ok(generate_board(
        board_config.size,
        board_config.columns,
        config.palette(),
        rng,
    )?)
}

fn lock<C>(shared: &Mutex<Shared<C>>) -> MutexGuard<'_, Shared<C>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
