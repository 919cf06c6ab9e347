//! Frame timers - turn elapsed milliseconds into discrete game steps.
//!
//! [`GameState::tick`](crate::game_state::GameState::tick) advances these in a
//! fixed order: gravity, horizontal auto-repeat, soft drop, then lock delay.
//! The timers only count; moving the piece is the caller's job.

use crate::types::Shift;

/// Repeat count meaning "as many as will fit" (ARR of 0).
pub const REPEAT_TO_WALL: u32 = u32::MAX;

/// DAS/ARR state for the held horizontal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoShift {
    held: Option<Shift>,
    das_timer: u32,
    arr_accumulator: u32,
}

impl AutoShift {
    pub fn held(&self) -> Option<Shift> {
        self.held
    }

    /// Start holding `dir`. A new press always restarts DAS, even when
    /// switching from the opposite direction.
    pub fn press(&mut self, dir: Shift) {
        self.held = Some(dir);
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Stop holding `dir`. Releasing a direction that is not held is a no-op.
    pub fn release(&mut self, dir: Shift) {
        if self.held == Some(dir) {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.held = None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance by `elapsed_ms` and return how many repeat shifts are due.
    ///
    /// Time past the DAS delay feeds the ARR accumulator; with `arr_ms == 0`
    /// the result is [`REPEAT_TO_WALL`] once DAS has elapsed.
    pub fn advance(&mut self, elapsed_ms: u32, das_ms: u32, arr_ms: u32) -> u32 {
        if self.held.is_none() {
            return 0;
        }

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das_ms {
            return 0;
        }

        if arr_ms == 0 {
            self.arr_accumulator = 0;
            return REPEAT_TO_WALL;
        }

        let excess = if prev_das < das_ms {
            self.das_timer - das_ms
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(excess);

        let repeats = self.arr_accumulator / arr_ms;
        self.arr_accumulator %= arr_ms;
        repeats
    }
}

/// Accumulators owned by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timers {
    /// Time since the last gravity step.
    pub gravity_ms: u32,
    /// Time the active piece has spent grounded since its last successful move.
    pub lock_ms: u32,
    /// Time since the last soft-drop step.
    pub soft_drop_ms: u32,
    pub soft_drop_active: bool,
    pub shift: AutoShift,
}

impl Timers {
    /// Advance the gravity accumulator; true when a gravity step is due.
    pub fn gravity_due(&mut self, elapsed_ms: u32, interval_ms: u32) -> bool {
        self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);
        if self.gravity_ms >= interval_ms {
            self.gravity_ms = 0;
            return true;
        }
        false
    }

    /// Advance the soft-drop accumulator and return how many steps are due.
    pub fn soft_drop_steps(&mut self, elapsed_ms: u32, interval_ms: u32) -> u32 {
        if !self.soft_drop_active || interval_ms == 0 {
            return 0;
        }
        self.soft_drop_ms = self.soft_drop_ms.saturating_add(elapsed_ms);
        let steps = self.soft_drop_ms / interval_ms;
        self.soft_drop_ms %= interval_ms;
        steps
    }

    pub fn set_soft_drop(&mut self, active: bool) {
        self.soft_drop_active = active;
        self.soft_drop_ms = 0;
    }

    /// Advance the lock-delay accumulator; true when the piece should lock.
    pub fn lock_due(&mut self, elapsed_ms: u32, lock_delay_ms: u32) -> bool {
        self.lock_ms = self.lock_ms.saturating_add(elapsed_ms);
        self.lock_ms >= lock_delay_ms
    }

    pub fn reset_lock(&mut self) {
        self.lock_ms = 0;
    }

    /// Zero every accumulator and drop any held input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut shift = AutoShift::default();
        shift.press(Shift::Left);

        // Before DAS expires: no repeats.
        assert_eq!(shift.advance(99, 100, 25), 0);

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        assert_eq!(shift.advance(1, 100, 25), 0);

        // Each ARR interval after DAS: one repeat.
        assert_eq!(shift.advance(25, 100, 25), 1);
        assert_eq!(shift.advance(25, 100, 25), 1);

        // A long frame yields several repeats and keeps the remainder.
        assert_eq!(shift.advance(60, 100, 25), 2);
        assert_eq!(shift.advance(15, 100, 25), 1);
    }

    #[test]
    fn test_excess_over_das_counts_toward_arr() {
        let mut shift = AutoShift::default();
        shift.press(Shift::Right);
        assert_eq!(shift.advance(150, 100, 25), 2);
    }

    #[test]
    fn test_release_neutralizes_repeat_immediately() {
        let mut shift = AutoShift::default();
        shift.press(Shift::Left);
        assert_eq!(shift.advance(140, 100, 25), 1);

        shift.release(Shift::Left);
        assert_eq!(shift.held(), None);
        assert_eq!(shift.advance(1000, 100, 25), 0);

        // Pressing again starts from a clean DAS.
        shift.press(Shift::Left);
        assert_eq!(shift.advance(99, 100, 25), 0);
    }

    #[test]
    fn test_release_of_other_direction_is_ignored() {
        let mut shift = AutoShift::default();
        shift.press(Shift::Left);
        shift.press(Shift::Right);
        shift.release(Shift::Left);
        assert_eq!(shift.held(), Some(Shift::Right));
    }

    #[test]
    fn test_zero_arr_shifts_to_wall() {
        let mut shift = AutoShift::default();
        shift.press(Shift::Left);
        assert_eq!(shift.advance(50, 100, 0), 0);
        assert_eq!(shift.advance(50, 100, 0), REPEAT_TO_WALL);
    }

    #[test]
    fn test_gravity_due_resets_accumulator() {
        let mut timers = Timers::default();
        assert!(!timers.gravity_due(500, 800));
        assert!(timers.gravity_due(300, 800));
        assert_eq!(timers.gravity_ms, 0);
    }

    #[test]
    fn test_soft_drop_steps_only_when_active() {
        let mut timers = Timers::default();
        assert_eq!(timers.soft_drop_steps(200, 50), 0);

        timers.set_soft_drop(true);
        assert_eq!(timers.soft_drop_steps(49, 50), 0);
        assert_eq!(timers.soft_drop_steps(1, 50), 1);
        assert_eq!(timers.soft_drop_steps(120, 50), 2);

        timers.set_soft_drop(false);
        assert_eq!(timers.soft_drop_ms, 0);
    }

    #[test]
    fn test_lock_due() {
        let mut timers = Timers::default();
        assert!(!timers.lock_due(200, 450));
        assert!(timers.lock_due(250, 450));
        timers.reset_lock();
        assert_eq!(timers.lock_ms, 0);
    }
}
