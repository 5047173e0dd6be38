use cellgrid_engine::engine::{CellContent, CellRef, CellStore};

use super::state::SheetState;

impl SheetState {
    /// Replace every cell with `rows` of already-tokenized fields.
    ///
    /// Blank fields (after trimming) leave no entry. Dimensions grow to fit the
    /// input and never shrink. The editing cursor is dropped.
    pub(crate) fn load_bulk(&mut self, rows: Vec<Vec<String>>) {
        let input_rows = rows.len();
        let input_cols = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut cells = CellStore::new();
        for (row, fields) in rows.into_iter().enumerate() {
            for (col, field) in fields.into_iter().enumerate() {
                if field.trim().is_empty() {
                    continue;
                }
                cells.set(CellRef::new(row, col), CellContent::literal(field));
            }
        }

        self.cells = cells;
        self.rows = self.rows.max(input_rows);
        self.cols = self.cols.max(input_cols);
        self.editing = None;
        self.clamp_selection();
        tracing::info!(
            rows = input_rows,
            cols = input_cols,
            cells = self.cells.len(),
            "bulk load applied"
        );
    }
}
