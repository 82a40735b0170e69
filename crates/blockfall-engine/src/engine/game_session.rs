use std::time::Duration;

use crate::{
    CommandError, ConfigError,
    core::{ActivePiece, Board},
    input::Command,
};

use super::{
    DropScheduler, EngineConfig, GameField, GameSnapshot, GameStats, PieceGenerator, PieceSeed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Result of one downward step of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece was locked, rows were cleared and the next piece spawned.
    Locked { cleared_lines: usize },
    /// The piece was locked but the next piece collided at spawn; the game is over.
    ToppedOut { cleared_lines: usize },
}

/// A single game: field, score and drop timing behind a command interface.
///
/// Every command either applies completely or returns an error and leaves the session
/// untouched. Once the session is [`SessionState::GameOver`], every command except
/// [`Self::restart`] returns [`CommandError::GameOver`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameSession, StepOutcome};
///
/// let mut session = GameSession::new();
///
/// // Step until the first piece locks.
/// let outcome = loop {
///     match session.manual_step().unwrap() {
///         StepOutcome::Moved => {}
///         outcome => break outcome,
///     }
/// };
/// assert!(outcome.is_locked());
/// assert_eq!(session.stats().completed_pieces(), 1);
///
/// // Moving into the wall is rejected without changing anything.
/// while session.move_left().is_ok() {}
/// let x = session.field().falling_piece().x();
/// assert!(session.move_left().unwrap_err().is_piece_collision());
/// assert_eq!(session.field().falling_piece().x(), x);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    scheduler: DropScheduler,
    session_state: SessionState,
    config: EngineConfig,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with the default configuration and a random seed.
    #[must_use]
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let field = GameField::new(
            Board::new(config.board_width, config.board_height),
            config.spawn_column,
            PieceGenerator::new(),
        );
        Self::from_parts(field, config)
    }

    /// Creates a session from a validated configuration.
    ///
    /// With `seed` set, the piece sequence is reproducible.
    pub fn with_config(config: EngineConfig, seed: Option<PieceSeed>) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = seed.map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        let field = GameField::new(
            Board::new(config.board_width, config.board_height),
            config.spawn_column,
            generator,
        );
        Ok(Self::from_parts(field, config))
    }

    /// Creates a session over a prepared field.
    ///
    /// The board size and spawn column of `field` take precedence over `config` and are
    /// validated the same way. If the field's falling piece already collides, the session
    /// starts in game over.
    pub fn with_field(field: GameField, config: EngineConfig) -> Result<Self, ConfigError> {
        let config = EngineConfig {
            board_width: field.board().width(),
            board_height: field.board().height(),
            spawn_column: field.spawn_column(),
            ..config
        };
        config.validate()?;
        let mut session = Self::from_parts(field, config);
        if session.field.is_falling_piece_colliding() {
            session.session_state = SessionState::GameOver;
        }
        Ok(session)
    }

    fn from_parts(field: GameField, config: EngineConfig) -> Self {
        Self {
            field,
            stats: GameStats::new(),
            scheduler: DropScheduler::new(config.normal_drop_interval, config.fast_drop_interval),
            session_state: SessionState::Playing,
            config,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn scheduler(&self) -> &DropScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn falling_piece(&self) -> ActivePiece {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(
            self.field.board(),
            &self.field.falling_piece(),
            &self.stats,
            self.session_state,
        )
    }

    fn ensure_playing(&self) -> Result<(), CommandError> {
        if self.is_game_over() {
            return Err(CommandError::GameOver);
        }
        Ok(())
    }

    pub fn move_left(&mut self) -> Result<(), CommandError> {
        self.ensure_playing()?;
        self.field.try_move_left()?;
        Ok(())
    }

    pub fn move_right(&mut self) -> Result<(), CommandError> {
        self.ensure_playing()?;
        self.field.try_move_right()?;
        Ok(())
    }

    /// Rotates clockwise, shifting right when the rotated piece would collide.
    pub fn rotate(&mut self) -> Result<(), CommandError> {
        self.ensure_playing()?;
        self.field.try_rotate()?;
        Ok(())
    }

    /// Selects the fast or normal drop interval for subsequent ticks.
    pub fn set_fast_drop(&mut self, fast_drop: bool) -> Result<(), CommandError> {
        self.ensure_playing()?;
        self.scheduler.set_fast_drop(fast_drop);
        Ok(())
    }

    /// Moves the piece down one row immediately, locking it if it cannot move.
    ///
    /// The drop timer restarts, so the next automatic step is a full interval away.
    pub fn manual_step(&mut self) -> Result<StepOutcome, CommandError> {
        self.ensure_playing()?;
        self.scheduler.reset_elapsed();
        Ok(self.step())
    }

    /// Advances the drop timer by `elapsed`, stepping the piece when the active interval
    /// has been exceeded.
    ///
    /// Returns `None` when no step was due or the game is over.
    pub fn tick(&mut self, elapsed: Duration) -> Option<StepOutcome> {
        if self.is_game_over() {
            return None;
        }
        self.scheduler.advance(elapsed).then(|| self.step())
    }

    /// Starts a new game on an empty board of the same size.
    ///
    /// The piece generator keeps its state, so a seeded session continues its sequence.
    pub fn restart(&mut self) {
        self.field.reset();
        self.stats = GameStats::new();
        self.scheduler.reset();
        self.session_state = SessionState::Playing;
    }

    /// Runs a single command.
    ///
    /// Returns the step outcome for [`Command::ManualStep`], `None` for every other
    /// command.
    pub fn apply(&mut self, command: Command) -> Result<Option<StepOutcome>, CommandError> {
        match command {
            Command::MoveLeft => self.move_left()?,
            Command::MoveRight => self.move_right()?,
            Command::Rotate => self.rotate()?,
            Command::SetFastDrop(fast_drop) => self.set_fast_drop(fast_drop)?,
            Command::ManualStep => return self.manual_step().map(Some),
            Command::Restart => self.restart(),
        }
        Ok(None)
    }

    fn step(&mut self) -> StepOutcome {
        if self.field.try_move_down().is_ok() {
            return StepOutcome::Moved;
        }
        let (cleared_lines, result) = self.field.complete_piece_drop();
        self.stats.complete_piece_drop(cleared_lines);
        if result.is_err() {
            self.session_state = SessionState::GameOver;
            return StepOutcome::ToppedOut { cleared_lines };
        }
        StepOutcome::Locked { cleared_lines }
    }
}
