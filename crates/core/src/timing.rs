//! Timing primitives: DAS/ARR auto-shift, gravity accumulator and countdowns.
//!
//! All timers are plain millisecond accumulators advanced by `tick`. Pausing
//! simply stops advancing them, so their values are frozen.

use crate::types::BOARD_WIDTH;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    /// Column delta of one step
    pub fn dx(self) -> i8 {
        match self {
            HorizontalDirection::Left => -1,
            HorizontalDirection::Right => 1,
            HorizontalDirection::None => 0,
        }
    }
}

/// Tracks a held horizontal direction for DAS/ARR.
///
/// The caller performs the immediate step on key-down; [`AutoShift::update`]
/// reports how many repeat steps became due since the last update. The first
/// repeat fires once the key has been held for `das_ms`, then one every `arr_ms`.
#[derive(Debug, Clone)]
pub struct AutoShift {
    direction: HorizontalDirection,
    das_timer: u32,
    arr_accumulator: u32,
    das_ms: u32,
    arr_ms: u32,
}

impl AutoShift {
    pub fn new(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            direction: HorizontalDirection::None,
            das_timer: 0,
            arr_accumulator: 0,
            das_ms,
            arr_ms: arr_ms.max(1),
        }
    }

    pub fn direction(&self) -> HorizontalDirection {
        self.direction
    }

    /// Milliseconds the current direction has been held
    pub fn held_ms(&self) -> u32 {
        self.das_timer
    }

    /// Start holding `direction`, restarting the delay even if it was already held.
    pub fn press(&mut self, direction: HorizontalDirection) {
        self.direction = direction;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Stop holding `direction`; releasing a key that is not the held one is a no-op.
    pub fn release(&mut self, direction: HorizontalDirection) {
        if self.direction == direction {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.press(HorizontalDirection::None);
    }

    /// Advance by `elapsed_ms`, returning the number of repeat steps now due.
    ///
    /// Never reports more than a board width of steps at once.
    pub fn update(&mut self, elapsed_ms: u32) -> u8 {
        if self.direction == HorizontalDirection::None {
            return 0;
        }

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < self.das_ms {
            return 0;
        }

        let mut steps = 0u8;
        if prev_das < self.das_ms {
            // crossed the initial delay this update
            steps += 1;
            self.arr_accumulator = self.das_timer - self.das_ms;
        } else {
            self.arr_accumulator = self.arr_accumulator.saturating_add(elapsed_ms);
        }

        while self.arr_accumulator >= self.arr_ms && steps < BOARD_WIDTH {
            self.arr_accumulator -= self.arr_ms;
            steps += 1;
        }
        if steps == BOARD_WIDTH {
            self.arr_accumulator %= self.arr_ms;
        }
        steps
    }
}

/// Gravity accumulator: one step each time the threshold is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gravity {
    accumulated_ms: u32,
}

impl Gravity {
    /// Add `elapsed_ms`; returns true (and resets) once `threshold_ms` is reached.
    pub fn advance(&mut self, elapsed_ms: u32, threshold_ms: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms >= threshold_ms {
            self.accumulated_ms = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }
}

/// Countdown used for the ARE and line-clear windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: u32,
}

impl Countdown {
    pub fn start(&mut self, duration_ms: u32) {
        self.remaining_ms = duration_ms;
    }

    /// Count down by `elapsed_ms`; returns true when the countdown has run out.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }
}
