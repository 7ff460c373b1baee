// SPDX-License-Identifier: GPL-3.0-only

//! Shift state tracking with double-tap caps lock.
//!
//! Shift has three modes:
//!
//! - **Off**: letters are lowercase
//! - **Shifted** (one-shot): the next letter is uppercase, then shift turns off
//! - **CapsLock**: letters stay uppercase until Shift is tapped again
//!
//! A second Shift tap within the double-tap window of the tap that turned
//! shift on engages caps lock; a slower second tap turns shift off.
//!
//! # Example
//!
//! ```rust
//! use softboard::input::{ShiftState, ShiftTracker};
//! use std::time::{Duration, Instant};
//!
//! let mut shift = ShiftTracker::new(Duration::from_millis(300));
//! let t0 = Instant::now();
//!
//! assert_eq!(shift.on_shift_tap(t0), ShiftState::Shifted);
//! assert_eq!(shift.on_shift_tap(t0 + Duration::from_millis(100)), ShiftState::CapsLock);
//! ```

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Capitalization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    /// Lowercase
    #[default]
    Off,
    /// Uppercase for the next character only
    Shifted,
    /// Uppercase until Shift is tapped again
    CapsLock,
}

impl ShiftState {
    /// Returns `true` if letters should currently be uppercase.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, ShiftState::Shifted | ShiftState::CapsLock)
    }
}

/// Tracks the shift state and the timestamp needed for double-tap detection.
#[derive(Debug, Clone)]
pub struct ShiftTracker {
    /// Current shift mode
    state: ShiftState,

    /// When the tap that moved `Off -> Shifted` happened.
    /// Only meaningful while `state == Shifted`.
    last_tap: Option<Instant>,

    /// A second tap strictly inside this window engages caps lock
    double_tap_window: Duration,
}

impl ShiftTracker {
    /// Creates a tracker in the `Off` state.
    #[must_use]
    pub fn new(double_tap_window: Duration) -> Self {
        Self {
            state: ShiftState::Off,
            last_tap: None,
            double_tap_window,
        }
    }

    /// Returns the current shift state.
    #[must_use]
    pub fn state(&self) -> ShiftState {
        self.state
    }

    /// Handles a Shift tap at `now` and returns the new state.
    ///
    /// A timestamp earlier than the recorded tap counts as zero elapsed time.
    pub fn on_shift_tap(&mut self, now: Instant) -> ShiftState {
        self.state = match self.state {
            ShiftState::Off => {
                self.last_tap = Some(now);
                ShiftState::Shifted
            }
            ShiftState::Shifted => {
                let within_window = self
                    .last_tap
                    .take()
                    .is_some_and(|t| now.saturating_duration_since(t) < self.double_tap_window);
                if within_window {
                    ShiftState::CapsLock
                } else {
                    ShiftState::Off
                }
            }
            ShiftState::CapsLock => {
                self.last_tap = None;
                ShiftState::Off
            }
        };
        self.state
    }

    /// Consumes a one-shot shift after a character was typed.
    ///
    /// Returns `true` if the state changed. Caps lock is left alone.
    pub fn consume_one_shot(&mut self) -> bool {
        if self.state == ShiftState::Shifted {
            self.state = ShiftState::Off;
            self.last_tap = None;
            true
        } else {
            false
        }
    }

    /// Returns to `Off` and forgets any pending double tap.
    pub fn reset(&mut self) {
        self.state = ShiftState::Off;
        self.last_tap = None;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
