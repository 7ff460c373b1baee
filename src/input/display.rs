// SPDX-License-Identifier: GPL-3.0-only

//! Display derivation for the current keyboard state.
//!
//! A [`DisplaySnapshot`] is a read-only view of what the keyboard should show:
//! the active layer, every key with its display label and proportional width,
//! and the shift indicator. It is derived from the engine state and never
//! feeds back into it.

use crate::input::shift::ShiftState;
use crate::layout::{rows_for, KeyAction, KeyDescriptor, Layer};
use serde::Serialize;

/// Visual state of the Shift key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftIndicator {
    /// Plain arrow
    #[default]
    Inactive,
    /// Highlighted arrow
    OneShot,
    /// Highlighted caps-lock icon
    Locked,
}

impl From<ShiftState> for ShiftIndicator {
    fn from(state: ShiftState) -> Self {
        match state {
            ShiftState::Off => ShiftIndicator::Inactive,
            ShiftState::Shifted => ShiftIndicator::OneShot,
            ShiftState::CapsLock => ShiftIndicator::Locked,
        }
    }
}

/// Display copy of a key descriptor with a recomputed label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayKey {
    /// Label to draw
    pub label: String,
    /// Action dispatched when tapped
    pub action: KeyAction,
    /// Relative weight from the descriptor
    pub weight: f32,
    /// Share of the row width, `weight / sum(row weights)`
    pub width_fraction: f32,
    /// Whether to style as a control key
    pub is_special: bool,
}

/// Everything the host needs to draw the keyboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    /// Active layer
    pub layer: Layer,
    /// Current shift state
    pub shift_state: ShiftState,
    /// Shift key indicator
    pub shift_indicator: ShiftIndicator,
    /// Rows of keys for the active layer
    pub rows: Vec<Vec<DisplayKey>>,
}

impl DisplaySnapshot {
    /// Derives the snapshot for a layer and shift state.
    pub fn derive(layer: Layer, shift_state: ShiftState) -> Self {
        let rows = rows_for(layer)
            .iter()
            .map(|row| display_row(row, layer, shift_state))
            .collect();

        Self {
            layer,
            shift_state,
            shift_indicator: shift_state.into(),
            rows,
        }
    }

    /// Iterates every displayed key in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = &DisplayKey> {
        self.rows.iter().flatten()
    }

    /// Finds the displayed key for an action, if it is on the active layer.
    pub fn key_for(&self, action: KeyAction) -> Option<&DisplayKey> {
        self.keys().find(|k| k.action == action)
    }
}

fn display_row(row: &[KeyDescriptor], layer: Layer, shift_state: ShiftState) -> Vec<DisplayKey> {
    let total_weight: f32 = row.iter().map(|k| k.weight).sum();
    row.iter()
        .map(|key| DisplayKey {
            label: display_label(key, layer, shift_state),
            action: key.action,
            weight: key.weight,
            width_fraction: if total_weight > 0.0 {
                key.weight / total_weight
            } else {
                0.0
            },
            is_special: key.is_special,
        })
        .collect()
}

/// Alphabetic character labels are lowercased while shift is off; every other
/// label is shown verbatim.
pub fn display_label(key: &KeyDescriptor, layer: Layer, shift_state: ShiftState) -> String {
    match key.action {
        KeyAction::Character(_) if layer == Layer::Alpha && !shift_state.is_active() => {
            key.label.to_lowercase()
        }
        _ => key.label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_labels_follow_shift() {
        let off = DisplaySnapshot::derive(Layer::Alpha, ShiftState::Off);
        assert_eq!(off.rows[0][0].label, "q");
        // Control labels are untouched
        assert_eq!(off.key_for(KeyAction::Shift).unwrap().label, "SHIFT");
        assert_eq!(off.key_for(KeyAction::SymbolToggle).unwrap().label, "?123");

        for state in [ShiftState::Shifted, ShiftState::CapsLock] {
            let on = DisplaySnapshot::derive(Layer::Alpha, state);
            assert_eq!(on.rows[0][0].label, "Q");
        }
    }

    #[test]
    fn test_symbol_labels_verbatim() {
        let snapshot = DisplaySnapshot::derive(Layer::SymbolsShifted, ShiftState::Off);
        let labels: Vec<&str> = snapshot.rows[1].iter().map(|k| k.label.as_str()).collect();
        assert_eq!(labels, vec!["_", "=", "<", ">", "€", "£", "¥", "₩", "•", "°"]);
    }

    #[test]
    fn test_width_fractions_sum_to_one() {
        for layer in Layer::ALL {
            let snapshot = DisplaySnapshot::derive(layer, ShiftState::Off);
            for row in &snapshot.rows {
                let sum: f32 = row.iter().map(|k| k.width_fraction).sum();
                assert!((sum - 1.0).abs() < 1e-5, "row sums to {}", sum);
            }
        }

        // Bottom row: 1.5 + 1 + 5 + 1 + 1.5 = 10
        let snapshot = DisplaySnapshot::derive(Layer::Alpha, ShiftState::Off);
        let space = snapshot.key_for(KeyAction::Space).unwrap();
        assert!((space.width_fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_shift_indicator() {
        assert_eq!(ShiftIndicator::from(ShiftState::Off), ShiftIndicator::Inactive);
        assert_eq!(ShiftIndicator::from(ShiftState::Shifted), ShiftIndicator::OneShot);
        assert_eq!(ShiftIndicator::from(ShiftState::CapsLock), ShiftIndicator::Locked);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = DisplaySnapshot::derive(Layer::Symbols, ShiftState::Off);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["layer"], "symbols");
        assert_eq!(json["shift_indicator"], "inactive");
        assert_eq!(json["rows"][0][0]["label"], "1");
    }
}
