// SPDX-License-Identifier: GPL-3.0-only

//! Input handling for the soft keyboard.
//!
//! This module turns key taps into state changes and abstract text actions.
//!
//! # Features
//!
//! - **Shift tracking**: one-shot shift and double-tap caps lock
//! - **Layer switching**: alphabetic, symbols and shifted symbols
//! - **Text actions**: insert, delete backward, submit-or-newline
//! - **Display derivation**: per-key labels and the shift indicator
//!
//! # Example Usage
//!
//! ```rust
//! use softboard::input::{KeyboardEngine, ShiftState, TextAction};
//! use softboard::layout::KeyAction;
//! use std::time::Instant;
//!
//! let mut engine = KeyboardEngine::default();
//! let now = Instant::now();
//!
//! engine.dispatch(KeyAction::Shift, now);
//! let result = engine.dispatch(KeyAction::Character('H'), now);
//!
//! assert_eq!(result.text_action, Some(TextAction::InsertText("H".into())));
//! assert_eq!(engine.shift_state(), ShiftState::Off);
//! ```

// Sub-modules
pub mod action;
pub mod display;
pub mod engine;
pub mod shift;

// Re-export public API
pub use action::TextAction;
pub use display::{DisplayKey, DisplaySnapshot, ShiftIndicator};
pub use engine::{Dispatch, KeyboardEngine};
pub use shift::{ShiftState, ShiftTracker};

// ============================================================================
// Module Tests
// ============================================================================
