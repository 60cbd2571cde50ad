//! Read-only view of a game for the presentation layer.

use serde::Serialize;

use crate::game_state::Phase;
use crate::piece::Tetromino;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TimersSnapshot {
    pub gravity_ms: u32,
    pub phase_remaining_ms: u32,
    pub das_held_ms: u32,
}

/// Everything a renderer needs for one frame.
///
/// `board` holds color ids (0 = empty, see `PieceKind::color_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<ActiveSnapshot>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: Vec<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: i32,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub seed: u64,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    /// Whether the active piece currently accepts movement input
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && self.phase == Phase::Falling
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            hold: None,
            can_hold: true,
            next_queue: Vec::new(),
            score: 0,
            level: 1,
            lines: 0,
            combo: -1,
            phase: Phase::Are,
            paused: false,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
            seed: 0,
            timers: TimersSnapshot::default(),
        }
    }
}
