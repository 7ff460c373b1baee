// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard input-state engine.
//!
//! [`KeyboardEngine`] owns the shift state and the active layer. Each tapped
//! [`KeyAction`] moves it to a new state and produces at most one
//! [`TextAction`] for the host to apply. The engine has no timers and no I/O;
//! callers pass the tap time in, which keeps double-tap detection testable.
//!
//! | Action              | Shift state                      | Layer                        | Emits                |
//! |---------------------|----------------------------------|------------------------------|----------------------|
//! | `Shift`             | Off→Shifted→(CapsLock \| Off)    | unchanged                    | nothing              |
//! | `Character` (Alpha) | Shifted consumed, CapsLock kept  | unchanged                    | case-resolved text   |
//! | `Character` (other) | unchanged                        | unchanged                    | text as given        |
//! | `SymbolToggle`      | unchanged                        | Alpha↔Symbols, Shifted→Alpha | nothing              |
//! | `SymbolShiftToggle` | unchanged                        | Symbols↔SymbolsShifted       | nothing              |
//! | `Delete`            | unchanged                        | unchanged                    | `DeleteBackward(1)`  |
//! | `Enter`             | unchanged                        | unchanged                    | `SubmitOrNewline`    |
//! | `Space`             | unchanged                        | unchanged                    | `InsertText(" ")`    |

use crate::config::KeyboardConfig;
use crate::input::action::TextAction;
use crate::input::display::DisplaySnapshot;
use crate::input::shift::{ShiftState, ShiftTracker};
use crate::layout::{KeyAction, Layer};
use std::time::Instant;

/// Result of dispatching one key action.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Text action for the host, if any
    pub text_action: Option<TextAction>,
    /// Display state after the action
    pub display: DisplaySnapshot,
    /// Whether shift state or layer changed, i.e. the host should redraw
    pub state_changed: bool,
}

/// Layer and shift state machine for one keyboard session.
#[derive(Debug, Clone)]
pub struct KeyboardEngine {
    /// Shift mode and double-tap bookkeeping
    shift: ShiftTracker,

    /// Active layer
    layer: Layer,
}

impl KeyboardEngine {
    /// Creates an engine in `(Off, Alpha)`.
    #[must_use]
    pub fn new(config: &KeyboardConfig) -> Self {
        Self {
            shift: ShiftTracker::new(config.double_tap_window()),
            layer: Layer::Alpha,
        }
    }

    /// Returns the current shift state.
    #[must_use]
    pub fn shift_state(&self) -> ShiftState {
        self.shift.state()
    }

    /// Returns the active layer.
    #[must_use]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Derives the current display snapshot.
    #[must_use]
    pub fn current_display(&self) -> DisplaySnapshot {
        DisplaySnapshot::derive(self.layer, self.shift.state())
    }

    /// Handles one tap and returns the emitted text action with the new display.
    pub fn dispatch(&mut self, action: KeyAction, now: Instant) -> Dispatch {
        let (text_action, state_changed) = self.apply(action, now);
        Dispatch {
            text_action,
            display: self.current_display(),
            state_changed,
        }
    }

    /// Applies a tap without deriving a display snapshot.
    ///
    /// Returns the text action and whether the state changed.
    pub fn apply(&mut self, action: KeyAction, now: Instant) -> (Option<TextAction>, bool) {
        let before = (self.shift.state(), self.layer);

        let text_action = match action {
            KeyAction::Shift => {
                self.shift.on_shift_tap(now);
                None
            }
            KeyAction::Character(c) if self.layer == Layer::Alpha => {
                let text = resolve_case(c, self.shift.state());
                self.shift.consume_one_shot();
                Some(TextAction::InsertText(text))
            }
            KeyAction::Character(c) => Some(TextAction::InsertText(c.to_string())),
            KeyAction::SymbolToggle => {
                self.layer = match self.layer {
                    Layer::Alpha => Layer::Symbols,
                    Layer::Symbols | Layer::SymbolsShifted => Layer::Alpha,
                };
                None
            }
            KeyAction::SymbolShiftToggle => {
                self.layer = match self.layer {
                    Layer::Symbols => Layer::SymbolsShifted,
                    Layer::SymbolsShifted => Layer::Symbols,
                    Layer::Alpha => Layer::Alpha,
                };
                None
            }
            KeyAction::Delete => Some(TextAction::DeleteBackward(1)),
            KeyAction::Enter => Some(TextAction::SubmitOrNewline),
            KeyAction::Space => Some(TextAction::insert(" ")),
        };

        let after = (self.shift.state(), self.layer);
        let state_changed = before != after;
        if state_changed {
            tracing::debug!(
                "{}: ({:?}, {}) -> ({:?}, {})",
                action,
                before.0,
                before.1,
                after.0,
                after.1
            );
        }

        (text_action, state_changed)
    }

    /// Returns to `(Off, Alpha)`, as at the start of a session.
    pub fn reset(&mut self) {
        self.shift.reset();
        self.layer = Layer::Alpha;
    }
}

impl Default for KeyboardEngine {
    fn default() -> Self {
        Self::new(&KeyboardConfig::default())
    }
}

/// Uppercase while shift is active, lowercase otherwise.
fn resolve_case(c: char, shift_state: ShiftState) -> String {
    if shift_state.is_active() {
        c.to_uppercase().collect()
    } else {
        c.to_lowercase().collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn insert(text: &str) -> Option<TextAction> {
        Some(TextAction::InsertText(text.to_string()))
    }

    #[test]
    fn test_initial_state() {
        let engine = KeyboardEngine::default();
        assert_eq!(engine.shift_state(), ShiftState::Off);
        assert_eq!(engine.layer(), Layer::Alpha);
    }

    /// Start (Off, Alpha); tap 'a' -> "a", state unchanged.
    #[test]
    fn test_lowercase_character() {
        let mut engine = KeyboardEngine::default();
        let result = engine.dispatch(KeyAction::Character('A'), Instant::now());
        assert_eq!(result.text_action, insert("a"));
        assert!(!result.state_changed);
        assert_eq!(engine.shift_state(), ShiftState::Off);
        assert_eq!(engine.layer(), Layer::Alpha);

        // Lowercase canonical input resolves the same way
        let result = engine.dispatch(KeyAction::Character('a'), Instant::now());
        assert_eq!(result.text_action, insert("a"));
    }

    /// Shift at t=0, Shift at t=100 -> CapsLock; 'a' -> "A", caps lock persists.
    #[test]
    fn test_double_tap_caps_lock_scenario() {
        let mut engine = KeyboardEngine::default();
        let t0 = Instant::now();

        let first = engine.dispatch(KeyAction::Shift, t0);
        assert_eq!(first.text_action, None);
        assert!(first.state_changed);
        assert_eq!(engine.shift_state(), ShiftState::Shifted);

        engine.dispatch(KeyAction::Shift, t0 + ms(100));
        assert_eq!(engine.shift_state(), ShiftState::CapsLock);

        let typed = engine.dispatch(KeyAction::Character('a'), t0 + ms(200));
        assert_eq!(typed.text_action, insert("A"));
        assert!(!typed.state_changed);
        assert_eq!(engine.shift_state(), ShiftState::CapsLock);
        assert_eq!(engine.layer(), Layer::Alpha);

        let again = engine.dispatch(KeyAction::Character('b'), t0 + ms(300));
        assert_eq!(again.text_action, insert("B"));
    }

    #[test]
    fn test_one_shot_shift_consumed() {
        let mut engine = KeyboardEngine::default();
        let t0 = Instant::now();
        engine.dispatch(KeyAction::Shift, t0);

        let typed = engine.dispatch(KeyAction::Character('H'), t0 + ms(500));
        assert_eq!(typed.text_action, insert("H"));
        assert!(typed.state_changed);
        assert_eq!(engine.shift_state(), ShiftState::Off);

        let next = engine.dispatch(KeyAction::Character('I'), t0 + ms(600));
        assert_eq!(next.text_action, insert("i"));
    }

    #[test]
    fn test_slow_double_tap_turns_shift_off() {
        let mut engine = KeyboardEngine::default();
        let t0 = Instant::now();
        engine.dispatch(KeyAction::Shift, t0);
        engine.dispatch(KeyAction::Shift, t0 + ms(300));
        assert_eq!(engine.shift_state(), ShiftState::Off);
    }

    #[test]
    fn test_punctuation_on_alpha_consumes_shift() {
        let mut engine = KeyboardEngine::default();
        let t0 = Instant::now();
        engine.dispatch(KeyAction::Shift, t0);
        let result = engine.dispatch(KeyAction::Character(','), t0);
        assert_eq!(result.text_action, insert(","));
        assert_eq!(engine.shift_state(), ShiftState::Off);
    }

    /// Start (Off, Alpha); SymbolToggle -> Symbols; SymbolShiftToggle ->
    /// SymbolsShifted; SymbolToggle -> Alpha.
    #[test]
    fn test_layer_navigation_scenario() {
        let mut engine = KeyboardEngine::default();
        let now = Instant::now();

        let result = engine.dispatch(KeyAction::SymbolToggle, now);
        assert_eq!(result.text_action, None);
        assert_eq!(result.display.layer, Layer::Symbols);

        engine.dispatch(KeyAction::SymbolShiftToggle, now);
        assert_eq!(engine.layer(), Layer::SymbolsShifted);

        engine.dispatch(KeyAction::SymbolToggle, now);
        assert_eq!(engine.layer(), Layer::Alpha);
    }

    #[test]
    fn test_symbol_toggle_from_each_layer() {
        let now = Instant::now();
        let mut engine = KeyboardEngine::default();

        engine.dispatch(KeyAction::SymbolToggle, now);
        assert_eq!(engine.layer(), Layer::Symbols);
        engine.dispatch(KeyAction::SymbolToggle, now);
        assert_eq!(engine.layer(), Layer::Alpha);
    }

    #[test]
    fn test_symbol_shift_toggle_noop_on_alpha() {
        let mut engine = KeyboardEngine::default();
        let result = engine.dispatch(KeyAction::SymbolShiftToggle, Instant::now());
        assert_eq!(result.text_action, None);
        assert!(!result.state_changed);
        assert_eq!(engine.layer(), Layer::Alpha);
    }

    #[test]
    fn test_symbol_shift_toggle_round_trip() {
        let now = Instant::now();
        let mut engine = KeyboardEngine::default();
        engine.dispatch(KeyAction::SymbolToggle, now);
        engine.dispatch(KeyAction::SymbolShiftToggle, now);
        engine.dispatch(KeyAction::SymbolShiftToggle, now);
        assert_eq!(engine.layer(), Layer::Symbols);
    }

    #[test]
    fn test_characters_on_symbol_layer_verbatim() {
        let now = Instant::now();
        let mut engine = KeyboardEngine::default();
        engine.dispatch(KeyAction::Shift, now);
        engine.dispatch(KeyAction::SymbolToggle, now);

        let result = engine.dispatch(KeyAction::Character('€'), now);
        assert_eq!(result.text_action, insert("€"));
        // Shift is only consumed by alphabetic-layer characters
        assert_eq!(engine.shift_state(), ShiftState::Shifted);

        // Symbol layers emit characters exactly as given
        let result = engine.dispatch(KeyAction::Character('X'), now);
        assert_eq!(result.text_action, insert("X"));
    }

    #[test]
    fn test_shift_on_symbol_layer_does_not_crash() {
        let now = Instant::now();
        let mut engine = KeyboardEngine::default();
        engine.dispatch(KeyAction::SymbolToggle, now);
        engine.dispatch(KeyAction::SymbolShiftToggle, now);
        engine.dispatch(KeyAction::Shift, now);
        engine.dispatch(KeyAction::Shift, now + ms(10));

        assert_eq!(engine.shift_state(), ShiftState::CapsLock);
        assert_eq!(engine.layer(), Layer::SymbolsShifted);
        let display = engine.current_display();
        assert_eq!(display.rows[0][0].label, "~");
    }

    #[test]
    fn test_delete_enter_space() {
        let mut engine = KeyboardEngine::default();
        let now = Instant::now();
        engine.dispatch(KeyAction::Shift, now);

        let delete = engine.dispatch(KeyAction::Delete, now);
        assert_eq!(delete.text_action, Some(TextAction::DeleteBackward(1)));

        let enter = engine.dispatch(KeyAction::Enter, now);
        assert_eq!(enter.text_action, Some(TextAction::SubmitOrNewline));

        let space = engine.dispatch(KeyAction::Space, now);
        assert_eq!(space.text_action, insert(" "));

        // None of these consume the one-shot shift
        assert_eq!(engine.shift_state(), ShiftState::Shifted);
    }

    #[test]
    fn test_display_label_tracks_shift() {
        let mut engine = KeyboardEngine::default();
        let t0 = Instant::now();
        assert_eq!(engine.current_display().rows[1][0].label, "a");

        let shifted = engine.dispatch(KeyAction::Shift, t0);
        assert_eq!(shifted.display.rows[1][0].label, "A");

        let typed = engine.dispatch(KeyAction::Character('A'), t0);
        assert_eq!(typed.display.rows[1][0].label, "a");
    }

    #[test]
    fn test_custom_double_tap_window() {
        let config = KeyboardConfig::default()
            .with_double_tap_window_ms(500)
            .unwrap();
        let mut engine = KeyboardEngine::new(&config);
        let t0 = Instant::now();
        engine.dispatch(KeyAction::Shift, t0);
        engine.dispatch(KeyAction::Shift, t0 + ms(450));
        assert_eq!(engine.shift_state(), ShiftState::CapsLock);
    }

    #[test]
    fn test_reset() {
        let mut engine = KeyboardEngine::default();
        let now = Instant::now();
        engine.dispatch(KeyAction::Shift, now);
        engine.dispatch(KeyAction::SymbolToggle, now);
        engine.reset();
        assert_eq!(engine.shift_state(), ShiftState::Off);
        assert_eq!(engine.layer(), Layer::Alpha);
    }
}
