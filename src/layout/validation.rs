// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keyboard layers.
//!
//! Collects every issue rather than stopping at the first one. Fatal issues
//! turn into a [`LayoutError`]; warnings are returned to the caller.

use crate::layout::catalog;
use crate::layout::types::{KeyAction, KeyDescriptor, Layer, LayoutError, Severity, ValidationIssue};

/// Validates every layer in the built-in catalog.
pub fn validate_catalog() -> Result<Vec<ValidationIssue>, LayoutError> {
    let mut issues = Vec::new();
    for layer in Layer::ALL {
        validate_layer_rows(layer, catalog::rows_for(layer), &mut issues);
    }
    collect_warnings(issues)
}

/// Validates the rows of a single layer, appending issues.
pub fn validate_layer_rows(
    layer: Layer,
    rows: &[Vec<KeyDescriptor>],
    issues: &mut Vec<ValidationIssue>,
) {
    if rows.is_empty() {
        issues.push(
            ValidationIssue::new(Severity::Error, "Layer has no rows", layer.name())
                .with_suggestion("Define at least one row of keys"),
        );
        return;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let row_path = format!("{}.rows[{}]", layer, row_idx);
        if row.is_empty() {
            issues.push(ValidationIssue::new(Severity::Error, "Row is empty", row_path));
            continue;
        }
        for (key_idx, key) in row.iter().enumerate() {
            let key_path = format!("{}.keys[{}]", row_path, key_idx);
            validate_key(key, &key_path, issues);
        }
    }

    validate_required_actions(layer, rows, issues);
}

fn validate_key(key: &KeyDescriptor, key_path: &str, issues: &mut Vec<ValidationIssue>) {
    if !(key.weight.is_finite() && key.weight > 0.0) {
        issues.push(
            ValidationIssue::new(
                Severity::Error,
                format!("Weight {} is not a positive number", key.weight),
                key_path,
            )
            .with_suggestion("Use a weight greater than 0 (1.0 is a standard key)"),
        );
    }

    if key.label.is_empty() {
        issues.push(ValidationIssue::new(Severity::Warning, "Key label is empty", key_path));
    }
}

fn validate_required_actions(
    layer: Layer,
    rows: &[Vec<KeyDescriptor>],
    issues: &mut Vec<ValidationIssue>,
) {
    let count = |action: KeyAction| rows.iter().flatten().filter(|k| k.action == action).count();

    for action in [KeyAction::SymbolToggle, KeyAction::Delete] {
        let found = count(action);
        if found != 1 {
            issues.push(ValidationIssue::new(
                Severity::Error,
                format!("Expected exactly one {} key, found {}", action, found),
                layer.name(),
            ));
        }
    }

    let shift_keys = count(KeyAction::Shift);
    match layer {
        Layer::Alpha if shift_keys == 0 => {
            issues.push(ValidationIssue::new(
                Severity::Error,
                "Alphabetic layer has no Shift key",
                layer.name(),
            ));
        }
        Layer::Symbols | Layer::SymbolsShifted if shift_keys > 0 => {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    "Shift key on a symbol layer has no visible effect",
                    layer.name(),
                )
                .with_suggestion("Use SymbolShiftToggle to switch symbol pages"),
            );
        }
        _ => {}
    }

    if layer != Layer::Alpha && count(KeyAction::SymbolShiftToggle) == 0 {
        issues.push(ValidationIssue::new(
            Severity::Error,
            "Symbol layer has no SymbolShiftToggle key",
            layer.name(),
        ));
    }
}

/// Splits issues into fatal errors and warnings.
fn collect_warnings(issues: Vec<ValidationIssue>) -> Result<Vec<ValidationIssue>, LayoutError> {
    let (errors, warnings): (Vec<_>, Vec<_>) = issues.into_iter().partition(|i| i.is_error());
    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(LayoutError::ValidationError { issues: errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let warnings = validate_catalog().unwrap();
        assert!(warnings.is_empty(), "Unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn test_non_positive_weight_is_error() {
        let mut rows = catalog::rows_for(Layer::Alpha).to_vec();
        rows[0][3].weight = 0.0;
        rows[1][0].weight = f32::NAN;

        let mut issues = Vec::new();
        validate_layer_rows(Layer::Alpha, &rows, &mut issues);

        let paths: Vec<&str> = issues.iter().map(|i| i.field_path.as_str()).collect();
        assert_eq!(paths, vec!["alpha.rows[0].keys[3]", "alpha.rows[1].keys[0]"]);
        assert!(collect_warnings(issues).is_err());
    }

    #[test]
    fn test_missing_delete_and_duplicate_toggle() {
        let mut rows = catalog::rows_for(Layer::Symbols).to_vec();
        rows[2].pop();
        rows[0].push(KeyDescriptor::new("ABC", KeyAction::SymbolToggle));

        let mut issues = Vec::new();
        validate_layer_rows(Layer::Symbols, &rows, &mut issues);

        let err = collect_warnings(issues).unwrap_err();
        let LayoutError::ValidationError { issues } = err;
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("SymbolToggle"));
        assert!(issues[1].message.contains("Delete"));
    }

    #[test]
    fn test_shift_on_symbol_layer_is_warning() {
        let mut rows = catalog::rows_for(Layer::SymbolsShifted).to_vec();
        rows[0].push(KeyDescriptor::new("SHIFT", KeyAction::Shift));
        rows[1][0].label.clear();

        let mut issues = Vec::new();
        validate_layer_rows(Layer::SymbolsShifted, &rows, &mut issues);

        let warnings = collect_warnings(issues).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.severity == Severity::Warning));
    }

    #[test]
    fn test_empty_layer_is_error() {
        let mut issues = Vec::new();
        validate_layer_rows(Layer::Alpha, &[], &mut issues);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field_path, "alpha");
    }
}
