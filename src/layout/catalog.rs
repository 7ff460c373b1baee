// SPDX-License-Identifier: GPL-3.0-only

//! Static key layouts for the three keyboard layers.
//!
//! Rows are built once on first use and shared for the life of the process.
//! Row order and key order within a row are significant.

use crate::layout::types::{KeyAction, KeyDescriptor, Layer};
use std::sync::LazyLock;

/// Weight of control keys (Shift, Delete, layer toggles, Enter).
pub const CONTROL_KEY_WEIGHT: f32 = 1.5;

/// Weight of the space bar.
pub const SPACE_KEY_WEIGHT: f32 = 5.0;

static ALPHA_ROWS: LazyLock<Vec<Vec<KeyDescriptor>>> = LazyLock::new(|| {
    vec![
        character_row("QWERTYUIOP".chars()),
        character_row("ASDFGHJKL".chars()),
        flanked_row(
            KeyDescriptor::new("SHIFT", KeyAction::Shift),
            "ZXCVBNM".chars(),
        ),
        control_row("?123"),
    ]
});

static SYMBOL_ROWS: LazyLock<Vec<Vec<KeyDescriptor>>> = LazyLock::new(|| {
    vec![
        character_row("1234567890".chars()),
        character_row(['@', '#', '$', '%', '&', '-', '+', '(', ')']),
        flanked_row(
            KeyDescriptor::new("=\\<", KeyAction::SymbolShiftToggle),
            ['*', '"', '\'', ':', ';', '!', '?'],
        ),
        control_row("ABC"),
    ]
});

static SYMBOL_SHIFTED_ROWS: LazyLock<Vec<Vec<KeyDescriptor>>> = LazyLock::new(|| {
    vec![
        character_row(['~', '`', '|', '^', '{', '}', '[', ']', '\\', '/']),
        character_row(['_', '=', '<', '>', '€', '£', '¥', '₩', '•', '°']),
        flanked_row(
            KeyDescriptor::new("?123", KeyAction::SymbolShiftToggle),
            ['…', '—', '«', '»', '¿', '¡', '@'],
        ),
        control_row("ABC"),
    ]
});

/// Returns the rows of keys for a layer.
pub fn rows_for(layer: Layer) -> &'static [Vec<KeyDescriptor>] {
    match layer {
        Layer::Alpha => ALPHA_ROWS.as_slice(),
        Layer::Symbols => SYMBOL_ROWS.as_slice(),
        Layer::SymbolsShifted => SYMBOL_SHIFTED_ROWS.as_slice(),
    }
}

/// Iterates every key on a layer in row-major order.
pub fn keys_for(layer: Layer) -> impl Iterator<Item = &'static KeyDescriptor> {
    rows_for(layer).iter().flatten()
}

fn character_row(chars: impl IntoIterator<Item = char>) -> Vec<KeyDescriptor> {
    chars.into_iter().map(KeyDescriptor::character).collect()
}

/// A character row led by a control key and trailed by Delete.
fn flanked_row(leader: KeyDescriptor, chars: impl IntoIterator<Item = char>) -> Vec<KeyDescriptor> {
    let mut row = vec![leader.with_weight(CONTROL_KEY_WEIGHT).special()];
    row.extend(character_row(chars));
    row.push(
        KeyDescriptor::new("DEL", KeyAction::Delete)
            .with_weight(CONTROL_KEY_WEIGHT)
            .special(),
    );
    row
}

/// The bottom row shared by all layers; only the toggle label differs.
fn control_row(toggle_label: &str) -> Vec<KeyDescriptor> {
    vec![
        KeyDescriptor::new(toggle_label, KeyAction::SymbolToggle)
            .with_weight(CONTROL_KEY_WEIGHT)
            .special(),
        KeyDescriptor::character(','),
        KeyDescriptor::new("SPACE", KeyAction::Space).with_weight(SPACE_KEY_WEIGHT),
        KeyDescriptor::character('.'),
        KeyDescriptor::new("ENTER", KeyAction::Enter)
            .with_weight(CONTROL_KEY_WEIGHT)
            .special(),
    ]
}
