// SPDX-License-Identifier: GPL-3.0-only

//! Static keyboard layouts.
//!
//! This module defines the three key layers (alphabetic, symbols and shifted
//! symbols) as rows of [`KeyDescriptor`]s, and a validator that checks the
//! catalog for structural mistakes.
//!
//! # Example Usage
//!
//! ```rust
//! use softboard::layout::{rows_for, KeyAction, Layer};
//!
//! let rows = rows_for(Layer::Alpha);
//! assert_eq!(rows[0][0].label, "Q");
//! assert_eq!(rows[2][0].action, KeyAction::Shift);
//! ```
//!
//! Descriptors are never mutated. The engine derives display copies with
//! adjusted labels; see [`crate::input::DisplaySnapshot`].

pub mod catalog;
pub mod types;
pub mod validation;

pub use catalog::{keys_for, rows_for};
pub use types::{KeyAction, KeyDescriptor, Layer, LayoutError, Severity, ValidationIssue};
pub use validation::validate_catalog;
