//! Cell content types.
//!
//! - [`CellValue`] - What a cell holds (empty, literal text, or formula)
//! - [`CellContent`] - A value plus an optional style reference

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::formula::evaluate_stub;

/// Index into a host-owned style table.
pub type StyleId = u32;

/// The value stored in a cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Literal(String),
    Formula {
        expression: String,
        cached: Option<String>,
    },
}

/// A cell's value and style reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellContent {
    pub value: CellValue,
    pub style: Option<StyleId>,
}

impl CellContent {
    pub fn empty() -> CellContent {
        CellContent::default()
    }

    pub fn literal(text: impl Into<String>) -> CellContent {
        CellContent {
            value: CellValue::Literal(text.into()),
            style: None,
        }
    }

    /// Create a formula cell. The cached value comes from the evaluation stub.
    pub fn formula(expression: impl Into<String>) -> CellContent {
        let expression = expression.into();
        let cached = evaluate_stub(&expression);
        CellContent {
            value: CellValue::Formula { expression, cached },
            style: None,
        }
    }

    pub fn with_style(mut self, style: StyleId) -> CellContent {
        self.style = Some(style);
        self
    }

    /// Parse user input.
    /// - Empty string or whitespace -> Empty
    /// - Starts with '=' -> Formula (without the '=')
    /// - Otherwise -> Literal (trimmed)
    pub fn from_input(input: &str) -> CellContent {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CellContent::empty();
        }
        if let Some(expression) = trimmed.strip_prefix('=') {
            return CellContent::formula(expression);
        }
        CellContent::literal(trimmed)
    }

    /// Empty cells never live in the store.
    pub fn is_empty(&self) -> bool {
        matches!(self.value, CellValue::Empty)
    }

    /// Text as the user would type it back into the cell.
    pub fn input_text(&self) -> Cow<'_, str> {
        match &self.value {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Literal(s) => Cow::Borrowed(s),
            CellValue::Formula { expression, .. } => Cow::Owned(format!("={}", expression)),
        }
    }

    /// Text shown in the grid: the cached formula result when there is one.
    pub fn display_text(&self) -> Cow<'_, str> {
        match &self.value {
            CellValue::Formula {
                cached: Some(value),
                ..
            } => Cow::Borrowed(value),
            _ => self.input_text(),
        }
    }
}
