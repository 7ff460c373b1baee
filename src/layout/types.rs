// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layouts.
//!
//! This module defines the key actions, key descriptors and layers that make up
//! the static layout catalog, along with the validation issue and error types
//! reported when checking a catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents layout from being used
    Error,
    /// Non-fatal issue that should be addressed
    Warning,
}

/// A validation issue discovered while checking a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the key that caused the issue (e.g., "symbols.rows[2].keys[0]")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Returns `true` if this issue is fatal.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };

        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error returned when a layout fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// One or more fatal validation issues were found
    ValidationError {
        /// All fatal issues found
        issues: Vec<ValidationIssue>,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::ValidationError { issues } => {
                write!(f, "Layout validation failed with {} issue(s):", issues.len())?;
                for (i, issue) in issues.iter().enumerate() {
                    write!(f, "\n  {}. {}", i + 1, issue)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LayoutError {}

// ============================================================================
// Layout Data Structures
// ============================================================================

/// Action performed when a key is tapped.
///
/// The set is closed: hosts can only hand the engine one of these variants,
/// so there is no "unknown action" case to handle at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Emit a character (alphabetic keys are stored uppercase)
    Character(char),
    /// Delete one character before the cursor
    Delete,
    /// Submit the editor action or insert a newline
    Enter,
    /// Insert a space
    Space,
    /// Cycle the shift state
    Shift,
    /// Switch between the alphabetic and symbol layers
    SymbolToggle,
    /// Switch between the two symbol layers
    SymbolShiftToggle,
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAction::Character(c) => write!(f, "'{}'", c),
            KeyAction::Delete => write!(f, "Delete"),
            KeyAction::Enter => write!(f, "Enter"),
            KeyAction::Space => write!(f, "Space"),
            KeyAction::Shift => write!(f, "Shift"),
            KeyAction::SymbolToggle => write!(f, "SymbolToggle"),
            KeyAction::SymbolShiftToggle => write!(f, "SymbolShiftToggle"),
        }
    }
}

/// Default width weight for a key.
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// A static key definition.
///
/// `weight` sets the key's width relative to the other keys in its row.
/// `is_special` only affects styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyDescriptor {
    /// Canonical label shown on the key
    pub label: String,
    /// Action dispatched when the key is tapped
    pub action: KeyAction,
    /// Relative width within the row
    pub weight: f32,
    /// Whether the key is styled as a control key
    pub is_special: bool,
}

impl KeyDescriptor {
    /// Creates a regular key with the default weight.
    pub fn new(label: impl Into<String>, action: KeyAction) -> Self {
        Self {
            label: label.into(),
            action,
            weight: DEFAULT_WEIGHT,
            is_special: false,
        }
    }

    /// Creates a character key labelled with the character itself.
    pub fn character(c: char) -> Self {
        Self::new(c.to_string(), KeyAction::Character(c))
    }

    /// Sets the width weight.
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Marks the key as a special (control) key.
    pub fn special(mut self) -> Self {
        self.is_special = true;
        self
    }
}

/// One of the selectable key layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Alphabetic QWERTY layer
    #[default]
    Alpha,
    /// Digits and common punctuation
    Symbols,
    /// Extended punctuation and currency
    SymbolsShifted,
}

impl Layer {
    /// All layers in catalog order.
    pub const ALL: [Layer; 3] = [Layer::Alpha, Layer::Symbols, Layer::SymbolsShifted];

    /// Short name used in field paths and logs.
    pub fn name(self) -> &'static str {
        match self {
            Layer::Alpha => "alpha",
            Layer::Symbols => "symbols",
            Layer::SymbolsShifted => "symbols_shifted",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_descriptor_builders() {
        let key = KeyDescriptor::new("SHIFT", KeyAction::Shift)
            .with_weight(1.5)
            .special();
        assert_eq!(key.label, "SHIFT");
        assert_eq!(key.weight, 1.5);
        assert!(key.is_special);

        let q = KeyDescriptor::character('Q');
        assert_eq!(q.label, "Q");
        assert_eq!(q.action, KeyAction::Character('Q'));
        assert_eq!(q.weight, DEFAULT_WEIGHT);
        assert!(!q.is_special);
    }

    #[test]
    fn test_key_action_serde() {
        let json = serde_json::to_string(&KeyAction::Character('x')).unwrap();
        assert_eq!(json, r#"{"character":"x"}"#);
        let json = serde_json::to_string(&KeyAction::SymbolShiftToggle).unwrap();
        assert_eq!(json, r#""symbol_shift_toggle""#);

        let parsed: KeyAction = serde_json::from_str(r#""delete""#).unwrap();
        assert_eq!(parsed, KeyAction::Delete);

        // Unknown variants are rejected at the boundary
        assert!(serde_json::from_str::<KeyAction>(r#""compose""#).is_err());
    }

    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue::new(Severity::Error, "Weight must be positive", "alpha.rows[0].keys[1]")
            .with_suggestion("Use a weight greater than 0");
        let text = issue.to_string();
        assert!(text.starts_with("[ERROR] alpha.rows[0].keys[1]: Weight must be positive"));
        assert!(text.contains("Suggestion: Use a weight greater than 0"));
        assert!(issue.is_error());
    }

    #[test]
    fn test_layer_default_and_names() {
        assert_eq!(Layer::default(), Layer::Alpha);
        assert_eq!(Layer::SymbolsShifted.to_string(), "symbols_shifted");
        assert_eq!(Layer::ALL.len(), 3);
    }
}
