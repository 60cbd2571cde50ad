//! Game state module - manages the complete game state
//!
//! [`GameState`] is the single owner of the board, the active piece, the queue
//! and the score. Input events mutate it through [`GameState::apply_input`];
//! time advances only through [`GameState::tick`], which also hands back every
//! effect produced since the previous tick.
//!
//! Phase cycle: `Are -> Falling -> (lock) -> Clearing -> Are`, with the clearing
//! step skipped when a lock completes no rows. Locking and spawning happen
//! inside a single call and are only visible through their effects.

use std::mem;

use serde::Serialize;

use crate::board::Board;
use crate::collision::is_valid;
use crate::config::{ConfigError, RulesConfig};
use crate::piece::Tetromino;
use crate::rng::PieceQueue;
use crate::rotation::{is_t_spin, try_rotate};
use crate::scoring::{calculate_drop_score, calculate_level, calculate_score, fall_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::timing::{AutoShift, Countdown, Gravity, HorizontalDirection};
use crate::types::{Effect, GameInput, PieceKind, RowList};

/// States that persist across ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Appearance delay: the new piece is in place but not yet interactive
    Are,
    /// The active piece responds to gravity and input
    Falling,
    /// Full rows are waiting out the clear delay
    Clearing,
    /// A spawned piece did not fit; only restart leaves this state
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: RulesConfig,
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    can_hold: bool,
    queue: PieceQueue,
    phase: Phase,
    /// ARE or line-clear countdown, depending on `phase`
    phase_timer: Countdown,
    gravity: Gravity,
    auto_shift: AutoShift,
    soft_drop: bool,
    paused: bool,
    /// Set by a T rotation with three blocked corners, consumed at lock
    tspin_pending: bool,
    /// Full rows found at the last lock, removed when `Clearing` ends
    pending_rows: RowList,
    score: u32,
    level: u32,
    lines: u32,
    /// -1 = no active combo
    combo: i32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for pieces drawn from the queue.
    piece_id: u32,
    effects: Vec<Effect>,
}

impl GameState {
    /// Start a game with the default rules and the given RNG seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self::fresh(RulesConfig::default(), seed, Board::new());
        state.spawn_next();
        state
    }

    /// Start a game with custom rules
    pub fn with_config(config: RulesConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_board(config, seed, Board::new())
    }

    /// Start a game on a prepared board
    pub fn with_board(config: RulesConfig, seed: u64, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = Self::fresh(config, seed, board);
        state.spawn_next();
        Ok(state)
    }

    /// Build a state with nothing spawned yet
    fn fresh(config: RulesConfig, seed: u64, board: Board) -> Self {
        Self {
            queue: PieceQueue::new(seed, config.preview_count),
            auto_shift: AutoShift::new(config.das_ms, config.arr_ms),
            config,
            board,
            active: None,
            hold: None,
            can_hold: true,
            phase: Phase::Are,
            phase_timer: Countdown::default(),
            gravity: Gravity::default(),
            soft_drop: false,
            paused: false,
            tspin_pending: false,
            pending_rows: RowList::new(),
            score: 0,
            level: 1,
            lines: 0,
            combo: -1,
            episode_id: 0,
            piece_id: 0,
            effects: Vec::new(),
        }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Landing position of the active piece
    pub fn ghost(&self) -> Option<Tetromino> {
        self.active.map(|piece| piece.ghost(&self.board))
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Lookahead queue, next piece first
    pub fn upcoming(&self) -> impl ExactSizeIterator<Item = PieceKind> + '_ {
        self.queue.upcoming()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_drop
    }

    pub fn seed(&self) -> u64 {
        self.queue.seed()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Fall threshold for the current level (soft drop not applied)
    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(&self.config, self.level)
    }

    fn gravity_threshold_ms(&self) -> u32 {
        if self.soft_drop {
            self.config.soft_drop_interval_ms
        } else {
            self.fall_interval_ms()
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost().map(ActiveSnapshot::from);
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.next_queue.clear();
        out.next_queue.extend(self.queue.upcoming());
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.phase = self.phase;
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.seed = self.queue.seed();
        out.timers = TimersSnapshot {
            gravity_ms: self.gravity.accumulated_ms(),
            phase_remaining_ms: self.phase_timer.remaining_ms(),
            das_held_ms: self.auto_shift.held_ms(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply one input event. Returns whether it changed anything.
    ///
    /// Key releases are recorded in every phase but game over, including while
    /// paused. Key presses are recorded outside pause; a horizontal press only
    /// moves the piece while it is falling, but its DAS starts either way.
    /// Effects are queued and returned by the next [`GameState::tick`].
    pub fn apply_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::PauseToggle => return self.toggle_pause(),
            GameInput::Restart => {
                if self.paused {
                    return false;
                }
                self.restart();
                return true;
            }
            _ => {}
        }

        if self.phase == Phase::GameOver {
            return false;
        }

        match input {
            GameInput::ReleaseLeft => {
                self.auto_shift.release(HorizontalDirection::Left);
                true
            }
            GameInput::ReleaseRight => {
                self.auto_shift.release(HorizontalDirection::Right);
                true
            }
            GameInput::SoftDropOff => mem::replace(&mut self.soft_drop, false),
            _ if self.paused => false,
            GameInput::SoftDropOn => !mem::replace(&mut self.soft_drop, true),
            GameInput::MoveLeft => self.press_direction(HorizontalDirection::Left),
            GameInput::MoveRight => self.press_direction(HorizontalDirection::Right),
            _ if self.phase != Phase::Falling => false,
            GameInput::RotateCw => self.try_rotate(true),
            GameInput::RotateCcw => self.try_rotate(false),
            GameInput::HardDrop => self.hard_drop(),
            GameInput::Hold => self.hold(),
            GameInput::PauseToggle | GameInput::Restart => false,
        }
    }

    /// Key-down for a horizontal direction: start its DAS, and shift at once
    /// when the piece is falling.
    fn press_direction(&mut self, direction: HorizontalDirection) -> bool {
        self.auto_shift.press(direction);
        if self.phase == Phase::Falling {
            self.try_shift(direction.dx())
        } else {
            true
        }
    }

    /// Advance all timers by `elapsed_ms` and return the effects emitted since
    /// the previous tick, in order.
    pub fn tick(&mut self, elapsed_ms: u32) -> Vec<Effect> {
        if !self.paused {
            match self.phase {
                Phase::Are => {
                    if self.phase_timer.advance(elapsed_ms) {
                        self.phase = Phase::Falling;
                    }
                }
                Phase::Falling => {
                    self.update_auto_shift(elapsed_ms);
                    if self.phase == Phase::Falling
                        && self.gravity.advance(elapsed_ms, self.gravity_threshold_ms())
                    {
                        self.gravity_step();
                    }
                }
                Phase::Clearing => {
                    if self.phase_timer.advance(elapsed_ms) {
                        self.finish_clear();
                    }
                }
                Phase::GameOver => {}
            }
        }
        mem::take(&mut self.effects)
    }

    fn update_auto_shift(&mut self, elapsed_ms: u32) {
        let dx = self.auto_shift.direction().dx();
        for _ in 0..self.auto_shift.update(elapsed_ms) {
            if !self.try_shift(dx) {
                break;
            }
        }
    }

    /// Try to move the active piece one column
    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shifted(dx, 0);
        if !is_valid(&moved, &self.board) {
            return false;
        }
        self.active = Some(moved);
        self.effects.push(Effect::Moved { dx });
        true
    }

    /// Try to rotate the active piece with SRS wall kicks
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        // O piece doesn't rotate
        if active.kind == PieceKind::O {
            return false;
        }

        match try_rotate(&active, &self.board, clockwise) {
            Some(rotated) => {
                self.active = Some(rotated.piece);
                self.tspin_pending = is_t_spin(&rotated.piece, &self.board);
                self.effects.push(Effect::Rotated {
                    rotation: rotated.piece.rotation,
                    kicked: rotated.kicked(),
                });
                true
            }
            None => {
                self.effects.push(Effect::RotationBlocked);
                false
            }
        }
    }

    /// One gravity step; locks when the piece cannot fall
    fn gravity_step(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        let fallen = active.shifted(0, 1);
        if !is_valid(&fallen, &self.board) {
            self.lock_piece();
            return;
        }
        self.active = Some(fallen);
        if self.soft_drop {
            self.score = self.score.saturating_add(calculate_drop_score(
                1,
                self.config.soft_drop_points,
            ));
            self.effects.push(Effect::SoftDropped);
        }
    }

    /// Hard drop the active piece to the bottom and lock it
    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let cells = active.drop_distance(&self.board);
        self.active = Some(active.shifted(0, cells as i8));
        self.score = self.score.saturating_add(calculate_drop_score(
            cells as u32,
            self.config.hard_drop_points,
        ));
        self.effects.push(Effect::HardDropped { cells });
        self.lock_piece();
        true
    }

    /// Store the active piece, taking the held one (or the next queued one).
    fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let next = match self.hold.replace(active.kind) {
            Some(held) => held,
            None => {
                self.piece_id = self.piece_id.wrapping_add(1);
                self.queue.pop()
            }
        };
        self.can_hold = false;
        self.tspin_pending = false;
        self.gravity.reset();
        self.effects.push(Effect::Held { kind: active.kind });

        let piece = Tetromino::spawn(next);
        if is_valid(&piece, &self.board) {
            self.active = Some(piece);
        } else {
            self.end_game();
        }
        true
    }

    /// Merge the active piece into the board, score it, and either start the
    /// clear delay or spawn the next piece.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.merge_piece(&active.cells(), active.kind);
        self.gravity.reset();
        self.can_hold = true;
        self.effects.push(Effect::Locked { kind: active.kind });

        let tspin = mem::replace(&mut self.tspin_pending, false);
        let rows = self.board.full_rows();
        let lines = rows.len();
        let level_at_lock = self.level;

        self.combo = if lines > 0 {
            self.combo.saturating_add(1)
        } else {
            -1
        };

        let result = calculate_score(&self.config, lines, level_at_lock, tspin, self.combo);
        self.score = self.score.saturating_add(result.total);

        if tspin {
            self.effects.push(Effect::TSpin { lines: lines as u8 });
        }

        if lines == 0 {
            self.spawn_next();
            return;
        }

        self.lines = self.lines.saturating_add(lines as u32);
        self.effects.push(Effect::LinesCleared {
            rows: rows.clone(),
            count: lines as u8,
            tspin,
        });
        if self.combo >= 1 {
            self.effects.push(Effect::Combo {
                count: self.combo as u32,
            });
        }

        let level = calculate_level(&self.config, self.lines);
        if level > self.level {
            self.level = level;
            self.effects.push(Effect::LeveledUp { level });
        }

        self.pending_rows = rows;
        self.phase = Phase::Clearing;
        self.phase_timer.start(self.config.line_clear_ms);
        if self.config.line_clear_ms == 0 {
            self.finish_clear();
        }
    }

    /// Remove the rows found at lock time and spawn the next piece
    fn finish_clear(&mut self) {
        let rows = mem::take(&mut self.pending_rows);
        let removed = self.board.remove_rows(&rows);
        debug_assert_eq!(removed, rows.len());
        self.effects.push(Effect::RowsRemoved {
            count: removed as u8,
        });
        self.spawn_next();
    }

    /// Spawn the next queued piece and start its appearance delay
    fn spawn_next(&mut self) {
        let kind = self.queue.pop();
        self.piece_id = self.piece_id.wrapping_add(1);
        self.gravity.reset();

        let piece = Tetromino::spawn(kind);
        if !is_valid(&piece, &self.board) {
            self.end_game();
            return;
        }

        self.active = Some(piece);
        self.effects.push(Effect::Spawned { kind });
        self.phase_timer.start(self.config.are_ms);
        self.phase = if self.config.are_ms == 0 {
            Phase::Falling
        } else {
            Phase::Are
        };
    }

    fn end_game(&mut self) {
        self.active = None;
        self.phase = Phase::GameOver;
        self.phase_timer.start(0);
        self.auto_shift.clear();
        self.soft_drop = false;
        self.effects.push(Effect::GameOver { score: self.score });
    }

    fn toggle_pause(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        // timers simply stop advancing; held keys stay held
        self.paused = !self.paused;
        self.effects.push(if self.paused {
            Effect::Paused
        } else {
            Effect::Resumed
        });
        true
    }

    /// Reset board, queue and score; the new seed is drawn from the current generator
    fn restart(&mut self) {
        let seed = self.queue.next_seed();
        let episode_id = self.episode_id.wrapping_add(1);
        let config = mem::take(&mut self.config);
        let mut effects = mem::take(&mut self.effects);
        effects.push(Effect::Restarted);

        *self = Self::fresh(config, seed, Board::new());
        self.episode_id = episode_id;
        self.effects = effects;
        self.spawn_next();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
