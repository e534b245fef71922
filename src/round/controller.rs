//! Round lifecycle and deferred-action dispatch.

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardCatalog, CardId, Deck};
use crate::core::{Difficulty, GameConfig, GameRng};
use crate::error::{GameError, Result};
use crate::events::{EventDispatcher, GameEvent, GameObserver, RoundOutcome};
use crate::leaderboard::{display_name, Leaderboard, LeaderboardEntry, ANONYMOUS};
use crate::rules::{EngineTask, MatchEngine, Resolution};
use crate::schedule::{Generation, Scheduler};
use crate::session::{SessionStore, PLAYER_NAME_KEY};
use crate::timer::{Countdown, TickOutcome, TimerState};

/// Where the current round stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round started yet.
    #[default]
    Idle,
    /// Faces shown; selections ignored until the clock starts.
    Memorizing,
    Playing,
    Won,
    Lost,
    /// The card catalog never loaded.
    CannotStart,
}

impl RoundPhase {
    /// Whether the round has ended.
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Lost)
    }
}

/// Work the controller defers onto its scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Hide the faces and start the clock.
    EndMemorize,
    TimerTick,
    Engine(EngineTask),
}

/// Drives rounds for one session.
///
/// Owns the timer and creates a fresh [`MatchEngine`] per round. Every
/// deferred action is tagged with the round's [`Generation`]; anything
/// left over from an earlier round is dropped when it comes due.
pub struct RoundController<S: SessionStore> {
    config: GameConfig,
    catalog: std::result::Result<CardCatalog, String>,
    rng: GameRng,
    scheduler: Scheduler<Deferred>,
    timer: Countdown,
    engine: Option<MatchEngine>,
    difficulty: Difficulty,
    generation: Generation,
    phase: RoundPhase,
    store: S,
    leaderboard: Leaderboard,
    dispatcher: EventDispatcher,
}

impl<S: SessionStore> RoundController<S> {
    /// Create a controller over a loaded catalog. No round is started.
    pub fn new(config: GameConfig, catalog: CardCatalog, store: S, rng: GameRng) -> Self {
        Self::with_catalog_result(config, Ok(catalog), store, rng)
    }

    /// Create a controller from the result of loading the catalog.
    ///
    /// A failed load is kept; every start attempt then reports
    /// [`GameEvent::CannotStart`] and returns
    /// [`GameError::CatalogUnavailable`].
    pub fn with_catalog_result(
        config: GameConfig,
        catalog: Result<CardCatalog>,
        store: S,
        rng: GameRng,
    ) -> Self {
        let catalog = catalog.map_err(|err| {
            error!("card catalog unavailable: {}", err);
            err.to_string()
        });
        info!("round controller created with rng seed {}", rng.seed());
        Self {
            leaderboard: Leaderboard::new(config.leaderboard_size),
            config,
            catalog,
            rng,
            scheduler: Scheduler::new(),
            timer: Countdown::new(),
            engine: None,
            difficulty: Difficulty::default(),
            generation: Generation::default(),
            phase: RoundPhase::Idle,
            store,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Register an observer for every event from now on.
    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.dispatcher.subscribe(observer);
    }

    // === Round lifecycle ===

    /// Start a round at `difficulty`, discarding the current one.
    pub fn new_round(&mut self, difficulty: Difficulty) -> Result<()> {
        let mut deck = match &self.catalog {
            Ok(catalog) => Deck::build(catalog.templates()),
            Err(reason) => {
                let reason = reason.clone();
                return Err(self.cannot_start(reason));
            }
        };

        self.generation = self.generation.next();
        self.scheduler.cancel_all();
        self.timer.stop(&mut self.scheduler);
        self.timer = Countdown::new();

        deck.shuffle(&mut self.rng);
        let card_count = deck.len();
        self.difficulty = difficulty;
        self.engine = Some(MatchEngine::new(deck, self.config));
        self.phase = RoundPhase::Memorizing;

        info!(
            "round {} started: {} with {} cards",
            self.generation, difficulty, card_count
        );
        self.emit(GameEvent::RoundStarted {
            difficulty,
            time_limit: difficulty.time_limit(),
            card_count,
        });
        self.emit(GameEvent::MemorizeStarted);
        self.scheduler
            .schedule(self.config.memorize_ms, self.generation, Deferred::EndMemorize);
        Ok(())
    }

    /// Start over at the current difficulty.
    pub fn restart(&mut self) -> Result<()> {
        self.new_round(self.difficulty)
    }

    /// Switch difficulty and restart.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.new_round(difficulty)
    }

    /// Switch difficulty by name and restart. Unknown names use
    /// [`Difficulty::FALLBACK`].
    pub fn change_difficulty_named(&mut self, name: &str) -> Result<Difficulty> {
        let difficulty = Difficulty::from_name_or_fallback(name);
        self.change_difficulty(difficulty)?;
        Ok(difficulty)
    }

    fn cannot_start(&mut self, reason: String) -> GameError {
        warn!("cannot start a round: {}", reason);
        self.phase = RoundPhase::CannotStart;
        self.emit(GameEvent::CannotStart {
            reason: reason.clone(),
        });
        GameError::CatalogUnavailable { reason }
    }

    // === Player input ===

    /// Forward a card selection to the engine.
    ///
    /// Ignored unless the round is in play.
    pub fn select(&mut self, card: CardId) -> Resolution {
        if self.phase != RoundPhase::Playing {
            debug!("selection of {} ignored during {:?}", card, self.phase);
            return Resolution::Ignored;
        }
        let Some(engine) = self.engine.as_mut() else {
            return Resolution::Ignored;
        };
        let resolution = engine.select(card, &mut self.dispatcher);
        self.handle(resolution);
        resolution
    }

    /// Store the player's name for the session.
    ///
    /// The name is stored trimmed, even when blank; `Anonymous` stands in
    /// for a blank name only when it is read back or recorded.
    pub fn submit_player_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim().to_string();
        self.store.set_json(PLAYER_NAME_KEY, &name)?;
        info!("player name set to '{}'", name);
        self.emit(GameEvent::PlayerNameChanged { name });
        Ok(())
    }

    // === Clock ===

    /// Move the clock forward, running everything that comes due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.scheduler.now().saturating_add(elapsed_ms);
        while let Some(task) = self.scheduler.pop_due(target) {
            if task.generation != self.generation {
                debug!(
                    "dropping stale {:?} from {} (current {})",
                    task.action, task.generation, self.generation
                );
                continue;
            }
            self.run(task.action);
        }
        self.scheduler.advance_to(target);
    }

    fn run(&mut self, action: Deferred) {
        match action {
            Deferred::EndMemorize => {
                if self.phase != RoundPhase::Memorizing {
                    return;
                }
                self.phase = RoundPhase::Playing;
                self.emit(GameEvent::MemorizeEnded);
                self.timer.start(
                    self.difficulty.time_limit(),
                    self.config.tick_ms,
                    &mut self.scheduler,
                    self.generation,
                    Deferred::TimerTick,
                );
            }
            Deferred::TimerTick => match self.timer.on_tick(&mut self.scheduler, Deferred::TimerTick) {
                TickOutcome::Running { shown } => {
                    self.emit(GameEvent::TimerTick { seconds_left: shown });
                }
                TickOutcome::Expired { shown } => {
                    self.emit(GameEvent::TimerTick { seconds_left: shown });
                    if let Some(engine) = self.engine.as_mut() {
                        let resolution = engine.expire();
                        self.handle(resolution);
                    }
                }
                TickOutcome::Inert => {}
            },
            Deferred::Engine(task) => {
                if let Some(engine) = self.engine.as_mut() {
                    let resolution = engine.apply(task, &mut self.dispatcher);
                    self.handle(resolution);
                }
            }
        }
    }

    fn handle(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Pending(step) => {
                self.scheduler
                    .schedule(step.delay_ms, self.generation, Deferred::Engine(step.task));
            }
            Resolution::Complete(outcome) => self.finish(outcome),
            Resolution::Ignored | Resolution::AwaitingSecond | Resolution::Settled => {}
        }
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        self.timer.stop(&mut self.scheduler);
        let score = self.score();

        match outcome {
            RoundOutcome::Won => {
                self.phase = RoundPhase::Won;
                info!("round {} won with {}", self.generation, score);
                let name = self.player_name();
                match self
                    .leaderboard
                    .record(&mut self.store, self.difficulty, &name, score)
                {
                    Ok(_) => self.emit(GameEvent::LeaderboardUpdated {
                        difficulty: self.difficulty,
                    }),
                    Err(err) => warn!("result not recorded: {}", err),
                }
                self.emit(GameEvent::RoundWon { score });
            }
            RoundOutcome::Lost => {
                self.phase = RoundPhase::Lost;
                info!("round {} lost with {}", self.generation, score);
                self.emit(GameEvent::RoundLost { score });
            }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.dispatcher.on_event(&event);
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current score; zero before the first round.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.engine.as_ref().map_or(0, MatchEngine::score)
    }

    /// Seconds left on the clock. The full limit until the clock starts.
    #[must_use]
    pub fn time_left(&self) -> u32 {
        match self.timer.state() {
            TimerState::Idle => self.difficulty.time_limit(),
            _ => self.timer.remaining(),
        }
    }

    #[must_use]
    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    /// Clock time in milliseconds since the controller was created.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now()
    }

    /// Deferred actions still queued.
    #[must_use]
    pub fn pending_actions(&self) -> usize {
        self.scheduler.pending()
    }

    /// Whether a selection would currently be ignored.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.phase != RoundPhase::Playing || self.engine.as_ref().map_or(true, MatchEngine::is_locked)
    }

    /// The board in layout order; empty before the first round.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match &self.engine {
            Some(engine) => engine.deck().cards(),
            None => &[],
        }
    }

    #[must_use]
    pub fn engine(&self) -> Option<&MatchEngine> {
        self.engine.as_ref()
    }

    /// Stored player name, or `Anonymous`.
    #[must_use]
    pub fn player_name(&self) -> String {
        match self.store.get_json::<String>(PLAYER_NAME_KEY) {
            Ok(Some(name)) => display_name(&name),
            Ok(None) => ANONYMOUS.to_string(),
            Err(err) => {
                warn!("unreadable player name: {}", err);
                ANONYMOUS.to_string()
            }
        }
    }

    /// Leaderboard for one difficulty.
    #[must_use]
    pub fn leaderboard(&self, difficulty: Difficulty) -> Vec<LeaderboardEntry> {
        self.leaderboard.query(&self.store, difficulty)
    }

    /// Leaderboards for every difficulty.
    #[must_use]
    pub fn standings(&self) -> Vec<(Difficulty, Vec<LeaderboardEntry>)> {
        self.leaderboard.standings(&self.store)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: SessionStore + std::fmt::Debug> std::fmt::Debug for RoundController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundController")
            .field("difficulty", &self.difficulty)
            .field("generation", &self.generation)
            .field("phase", &self.phase)
            .field("score", &self.score())
            .field("time_left", &self.time_left())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
