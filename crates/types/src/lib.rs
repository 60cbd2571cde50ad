//! Core types module - shared data structures and constants
//!
//! This crate defines the vocabulary shared by the rules engine and whatever
//! presentation layer drives it. Everything here is plain data: no timers, no
//! randomness, no I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 visible rows (indexed 0-19, top to bottom)
//! - Rows above the board (`y < 0`) are a transient spawn buffer: a falling piece
//!   may occupy them, the locked board never does.
//!
//! # Default Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ARE_MS` | 100 | Appearance delay after a piece spawns |
//! | `DEFAULT_LINE_CLEAR_MS` | 300 | Clear animation window before rows collapse |
//! | `DEFAULT_DAS_MS` | 150 | Time before auto-repeat starts |
//! | `DEFAULT_ARR_MS` | 50 | Interval between auto-repeats |
//! | `DEFAULT_SOFT_DROP_INTERVAL_MS` | 50 | Fall threshold while soft drop is held |
//!
//! # Fall Speeds by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 500ms |
//! | 2 | 450ms |
//! | ... | -50ms per level |
//! | 10 | 50ms (highest level) |
//!
//! # Examples
//!
//! ```
//! use cheza_types::{GameInput, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(7), Rotation::West);
//!
//! assert_eq!(GameInput::from_str("rotateCw"), Some(GameInput::RotateCw));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in visible cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Nominal frame interval for drivers that run a fixed timestep (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Appearance delay between a spawn and the piece becoming interactive.
pub const DEFAULT_ARE_MS: u32 = 100;

/// Duration of the line-clear animation window.
pub const DEFAULT_LINE_CLEAR_MS: u32 = 300;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Fall threshold used instead of the level speed while soft drop is held.
pub const DEFAULT_SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Number of upcoming pieces exposed in the lookahead queue.
pub const DEFAULT_PREVIEW_COUNT: usize = 5;

/// Upper bound for a configured lookahead queue.
pub const MAX_PREVIEW_COUNT: usize = 7;

/// Fall interval per level, index 0 = level 1. The last entry is the highest level.
pub const FALL_SPEEDS_MS: [u32; 10] = [500, 450, 400, 350, 300, 250, 200, 150, 100, 50];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing N lines at once (index = N), multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// T-spin points for clearing N lines (index = N, 0..=3), multiplied by level.
///
/// Used instead of [`LINE_SCORES`] when the lock is flagged as a T-spin.
pub const TSPIN_SCORES: [u32; 4] = [400, 800, 1200, 1600];

/// Combo bonus unit: `COMBO_BASE * combo * level`.
pub const COMBO_BASE: u32 = 50;

/// Points per cell fallen while soft drop is held.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell travelled by a hard drop.
pub const HARD_DROP_POINTS: u32 = 2;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Number of piece kinds (one 7-bag)
    pub const LEN: usize = 7;

    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use cheza_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Stable non-zero identity used in `u8` board grids (0 = empty).
    pub fn color_id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`].
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// RGB color of the piece
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 255, 255),
            PieceKind::J => (0, 0, 255),
            PieceKind::L => (255, 165, 0),
            PieceKind::O => (255, 255, 0),
            PieceKind::S => (0, 255, 0),
            PieceKind::T => (128, 0, 128),
            PieceKind::Z => (255, 0, 0),
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: Rotated 90° clockwise (index 1)
/// - **South**: Rotated 180° (index 2)
/// - **West**: Rotated 90° counter-clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotation index 0-3
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an index, taken mod 4
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Rotate clockwise (+1 mod 4)
    ///
    /// ```
    /// use cheza_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-1 mod 4)
    ///
    /// ```
    /// use cheza_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

/// Abstract input events delivered by the presentation layer
///
/// Horizontal moves are key-down/key-up pairs so the engine can run DAS itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameInput {
    /// Left key pressed: shift once now, then auto-repeat while held
    MoveLeft,
    /// Right key pressed: shift once now, then auto-repeat while held
    MoveRight,
    /// Left key released
    ReleaseLeft,
    /// Right key released
    ReleaseRight,
    /// Soft drop key pressed
    SoftDropOn,
    /// Soft drop key released
    SoftDropOff,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop to the landing position and lock
    HardDrop,
    /// Swap with (or store into) the hold slot
    Hold,
    /// Toggle pause state
    PauseToggle,
    /// Start a fresh game
    Restart,
}

impl GameInput {
    /// Parse input from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use cheza_types::GameInput;
    ///
    /// assert_eq!(GameInput::from_str("moveLeft"), Some(GameInput::MoveLeft));
    /// assert_eq!(GameInput::from_str("HARDDROP"), Some(GameInput::HardDrop));
    /// assert_eq!(GameInput::from_str("jump"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameInput::MoveLeft),
            "moveright" => Some(GameInput::MoveRight),
            "releaseleft" => Some(GameInput::ReleaseLeft),
            "releaseright" => Some(GameInput::ReleaseRight),
            "softdropon" => Some(GameInput::SoftDropOn),
            "softdropoff" => Some(GameInput::SoftDropOff),
            "rotatecw" => Some(GameInput::RotateCw),
            "rotateccw" => Some(GameInput::RotateCcw),
            "harddrop" => Some(GameInput::HardDrop),
            "hold" => Some(GameInput::Hold),
            "pausetoggle" | "pause" => Some(GameInput::PauseToggle),
            "restart" => Some(GameInput::Restart),
            _ => None,
        }
    }
}

/// Named notification for the presentation layer (sound, animation, HUD).
///
/// The engine never waits on these; they are returned from `tick` in the order
/// they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// A new piece entered play (start of its appearance delay)
    Spawned { kind: PieceKind },
    /// The active piece shifted one column
    Moved { dx: i8 },
    /// The active piece fell one row under soft drop
    SoftDropped,
    /// The active piece was hard-dropped `cells` rows
    HardDropped { cells: u8 },
    /// A rotation succeeded; `kicked` is true when a wall kick offset was used
    Rotated { rotation: Rotation, kicked: bool },
    /// A rotation request found no valid position
    RotationBlocked,
    /// The active piece was merged into the board
    Locked { kind: PieceKind },
    /// The lock was scored as a T-spin
    TSpin { lines: u8 },
    /// Full rows were found; they collapse after the clear delay
    LinesCleared {
        rows: RowList,
        count: u8,
        tspin: bool,
    },
    /// The clear delay elapsed and full rows were removed
    RowsRemoved { count: u8 },
    /// Consecutive clearing locks (`count` >= 1)
    Combo { count: u32 },
    /// The level increased
    LeveledUp { level: u32 },
    /// The hold slot was written
    Held { kind: PieceKind },
    Paused,
    Resumed,
    Restarted,
    /// A freshly spawned piece did not fit
    GameOver { score: u32 },
}

/// Row indices on the board, top to bottom
pub type RowList = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by a piece of this kind
pub type Cell = Option<PieceKind>;
