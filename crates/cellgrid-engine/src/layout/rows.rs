//! Automatic row heights for wrapped cells.

use rustc_hash::FxHashMap;

use super::cache::{LayoutCache, LayoutKey};
use super::wrap::WrapOptions;
use crate::engine::CellRef;

/// Vertical metrics shared by every row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    pub line_height: f32,
    pub vertical_padding: f32,
    pub min_row_height: f32,
}

impl Default for RowMetrics {
    fn default() -> Self {
        RowMetrics {
            line_height: 16.0,
            vertical_padding: 6.0,
            min_row_height: 22.0,
        }
    }
}

impl RowMetrics {
    /// Height needed to show `lines` wrapped lines, floored at the minimum.
    pub fn height_for_lines(&self, lines: usize) -> f32 {
        (lines as f32 * self.line_height + self.vertical_padding).max(self.min_row_height)
    }
}

/// Column widths: one default plus per-column overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnWidths {
    default: f32,
    overrides: FxHashMap<usize, f32>,
}

impl ColumnWidths {
    pub fn new(default: f32) -> ColumnWidths {
        ColumnWidths {
            default,
            overrides: FxHashMap::default(),
        }
    }

    pub fn width(&self, col: usize) -> f32 {
        self.overrides.get(&col).copied().unwrap_or(self.default)
    }

    pub fn set(&mut self, col: usize, width: f32) {
        self.overrides.insert(col, width);
    }

    pub fn reset(&mut self, col: usize) {
        self.overrides.remove(&col);
    }
}

/// Per-row heights. Rows start at the minimum and only ever grow.
#[derive(Debug, Clone, PartialEq)]
pub struct RowHeights {
    min: f32,
    heights: FxHashMap<usize, f32>,
}

impl RowHeights {
    pub fn new(min_row_height: f32) -> RowHeights {
        RowHeights {
            min: min_row_height,
            heights: FxHashMap::default(),
        }
    }

    pub fn height(&self, row: usize) -> f32 {
        self.heights.get(&row).copied().unwrap_or(self.min)
    }

    /// Raise `row` to `required` if that is taller. Returns whether it grew.
    pub fn grow(&mut self, row: usize, required: f32) -> bool {
        if required <= self.height(row) {
            return false;
        }
        self.heights.insert(row, required);
        true
    }

    /// Rows that have grown past the minimum, in ascending order.
    pub fn grown(&self) -> Vec<(usize, f32)> {
        let mut rows: Vec<_> = self.heights.iter().map(|(&r, &h)| (r, h)).collect();
        rows.sort_by_key(|(r, _)| *r);
        rows
    }

    pub fn clear(&mut self) {
        self.heights.clear();
    }
}

/// Everything `autosize_rows` needs besides the cells themselves.
#[derive(Debug, Clone, Copy)]
pub struct AutosizeRequest<'a> {
    pub font: &'a str,
    pub options: WrapOptions,
    pub widths: &'a ColumnWidths,
    pub metrics: &'a RowMetrics,
}

/// Grow each row to fit its wrapped cells. `cells` should hold only cells
/// that wrap. Returns the rows that grew, ascending.
pub fn autosize_rows<'t, I, F>(
    cells: I,
    request: &AutosizeRequest<'_>,
    cache: &LayoutCache,
    heights: &mut RowHeights,
    mut measure: F,
) -> Vec<usize>
where
    I: IntoIterator<Item = (CellRef, &'t str)>,
    F: FnMut(&str) -> f32,
{
    let mut required: FxHashMap<usize, f32> = FxHashMap::default();
    for (cell, text) in cells {
        let key = LayoutKey::new(text, request.font, request.widths.width(cell.col), request.options);
        let lines = cache.wrap(&key, &mut measure).len();
        let height = request.metrics.height_for_lines(lines);
        let slot = required.entry(cell.row).or_insert(0.0);
        *slot = slot.max(height);
    }

    let mut grown: Vec<usize> = required
        .into_iter()
        .filter(|&(row, height)| heights.grow(row, height))
        .map(|(row, _)| row)
        .collect();
    grown.sort_unstable();
    tracing::debug!(rows = grown.len(), "row heights grown");
    grown
}
