//! Plain-text summary of a loaded sheet and its wrapped layout.

use std::fmt::{self, Write};

use cellgrid_core::{LayoutConfig, SheetState};
use cellgrid_engine::layout::{
    AutosizeRequest, ColumnWidths, LayoutCache, LayoutKey, RowHeights, autosize_rows, cell_width,
};

/// Autosize every populated row at `width` columns and describe the result.
pub fn render(
    state: &SheetState,
    layout: &LayoutConfig,
    width: f32,
) -> Result<String, fmt::Error> {
    let cells = state.cells.sorted();
    let texts: Vec<(_, String)> = cells
        .iter()
        .map(|(cell, content)| (*cell, content.display_text().into_owned()))
        .collect();

    let widths = ColumnWidths::new(width);
    let metrics = layout.metrics();
    let request = AutosizeRequest {
        font: &layout.font,
        options: layout.wrap_options(),
        widths: &widths,
        metrics: &metrics,
    };
    let cache = LayoutCache::new();
    let mut heights = RowHeights::new(metrics.min_row_height);
    autosize_rows(
        texts.iter().map(|(cell, text)| (*cell, text.as_str())),
        &request,
        &cache,
        &mut heights,
        cell_width,
    );

    let mut out = String::new();
    writeln!(out, "rows: {}", state.rows)?;
    writeln!(out, "cols: {}", state.cols)?;
    writeln!(out, "cells: {}", state.cells.len())?;

    writeln!(out, "row heights:")?;
    for row in 0..state.rows {
        let height = heights.height(row);
        if height > metrics.min_row_height {
            writeln!(out, "  {}: {}", row + 1, height)?;
        }
    }

    for (cell, text) in &texts {
        let key = LayoutKey::new(text, &layout.font, widths.width(cell.col), request.options);
        let lines = cache.wrap(&key, cell_width);
        writeln!(out, "{}:", cell)?;
        for line in lines.iter() {
            writeln!(out, "  {}", line)?;
        }
    }
    Ok(out)
}
