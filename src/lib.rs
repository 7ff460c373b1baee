// SPDX-License-Identifier: GPL-3.0-only

//! Softboard - input-state engine for a touch soft keyboard
//!
//! This crate holds the logic behind an on-screen keyboard with an alphabetic
//! layer, two symbol layers, one-shot shift with double-tap caps lock, and
//! key-repeat delete. It renders nothing and edits no text itself: for each
//! key tap it decides the next state and the abstract text action the host
//! should apply.
//!
//! # Architecture
//!
//! 1. **Layout catalog** (`layout`): static rows of keys for each layer.
//!
//! 2. **Keyboard engine** (`input`): the shift/layer state machine that maps
//!    taps to text actions and derives what the keyboard should display.
//!
//! 3. **Session** (`session`): wires the engine to the host input connection,
//!    owns the key-repeat timer and publishes display changes.
//!
//! # Modules
//!
//! - `app_settings`: Centralized application constants
//! - `config`: Timing configuration (double-tap window, repeat cadence)
//! - `input`: Shift tracking, keyboard engine, text actions, display derivation
//! - `layout`: Key layers and catalog validation
//! - `session`: Host sink, Enter resolution, key repeat, session lifecycle

pub mod app_settings;
pub mod config;
pub mod input;
pub mod layout;
pub mod session;

pub use config::KeyboardConfig;
pub use input::{KeyboardEngine, ShiftState, TextAction};
pub use layout::{KeyAction, Layer};
pub use session::{KeyboardSession, TextBuffer};

// ============================================================================
// Integration Tests
// ============================================================================
