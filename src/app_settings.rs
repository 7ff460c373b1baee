// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Window in milliseconds within which a second Shift tap engages caps lock.
pub const DEFAULT_DOUBLE_TAP_WINDOW_MS: u64 = 300;

/// Hold time in milliseconds before a held Delete key starts repeating.
pub const DEFAULT_REPEAT_INITIAL_DELAY_MS: u64 = 400;

/// Interval in milliseconds between repeated Delete events while held.
pub const DEFAULT_REPEAT_INTERVAL_MS: u64 = 50;
