//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the rules of Cheza, the falling-block puzzle game:
//! the board, pieces, randomizer, rotation, scoring and the timing state
//! machine. It has **zero dependencies** on rendering, audio or input devices:
//!
//! - **Deterministic**: Same seed and inputs produce identical games
//! - **Testable**: Every rule is reachable from plain function calls
//! - **Portable**: Any frontend (terminal, GUI, headless) can drive it
//!
//! # Module Structure
//!
//! - [`pieces`]: Tetromino shape catalog and spawn offsets
//! - [`rng`]: 7-bag random piece generation and the lookahead queue
//! - [`board`]: 10x20 game board, row scanning and row removal
//! - [`piece`]: The active piece and its ghost projection
//! - [`collision`]: The validity predicate every move goes through
//! - [`rotation`]: SRS rotation with wall kicks and T-spin corner detection
//! - [`scoring`]: Line, T-spin, combo and drop scoring; leveling
//! - [`timing`]: DAS/ARR, gravity and countdown timers
//! - [`config`]: Tunable rules and their validation
//! - [`snapshot`]: Read-only view for renderers
//! - [`game_state`]: The game itself
//!
//! # Example
//!
//! ```
//! use cheza_core::GameState;
//! use cheza_core::types::{Effect, GameInput, TICK_MS};
//!
//! let mut game = GameState::new(12345);
//!
//! // The first piece waits out its appearance delay before it accepts input.
//! let effects = game.tick(100);
//! assert!(matches!(effects[0], Effect::Spawned { .. }));
//!
//! game.apply_input(GameInput::MoveRight);
//! game.apply_input(GameInput::RotateCw);
//! game.apply_input(GameInput::HardDrop);
//!
//! let effects = game.tick(TICK_MS);
//! assert!(effects.iter().any(|e| matches!(e, Effect::Locked { .. })));
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity, DAS, the appearance delay and the line-clear
//! delay all advance from that value alone; while paused nothing advances.

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;
pub mod timing;

pub use cheza_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardParseError};
pub use collision::is_valid;
pub use config::{ConfigError, RulesConfig};
pub use game_state::{GameState, Phase};
pub use piece::Tetromino;
pub use pieces::{get_shape, layout, Layout};
pub use rng::{Bag, PieceQueue};
pub use rotation::try_rotate;
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
