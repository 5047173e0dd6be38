//! Sparse cell storage.
//!
//! Cells are kept in a two-level map (row -> column -> content). Both levels
//! are behind `Arc` and copied on write, so cloning a store is O(1) and the
//! first write after a clone copies only the row index and the touched row.
//! Empty content is never stored: absence of a key is emptiness.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::cell::CellContent;
use super::cell_ref::CellRef;

type Row = FxHashMap<usize, CellContent>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellStore {
    rows: Arc<FxHashMap<usize, Arc<Row>>>,
    len: usize,
}

impl CellStore {
    pub fn new() -> CellStore {
        CellStore::default()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, cell: &CellRef) -> Option<&CellContent> {
        self.rows.get(&cell.row)?.get(&cell.col)
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.get(cell).is_some()
    }

    /// Insert or overwrite a cell. Empty content removes the key instead.
    /// Returns the previous content, if any.
    pub fn set(&mut self, cell: CellRef, content: CellContent) -> Option<CellContent> {
        if content.is_empty() {
            return self.remove(&cell);
        }
        let rows = Arc::make_mut(&mut self.rows);
        let row = Arc::make_mut(rows.entry(cell.row).or_default());
        let old = row.insert(cell.col, content);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    pub fn remove(&mut self, cell: &CellRef) -> Option<CellContent> {
        // Absent keys must not trigger a copy of shared rows.
        if !self.contains(cell) {
            return None;
        }
        let rows = Arc::make_mut(&mut self.rows);
        let row = Arc::make_mut(rows.get_mut(&cell.row)?);
        let old = row.remove(&cell.col);
        if row.is_empty() {
            rows.remove(&cell.row);
        }
        if old.is_some() {
            self.len -= 1;
        }
        old
    }

    /// Remove and return every cell whose coordinate matches `pred`.
    /// Visits occupied entries only.
    pub fn remove_where(
        &mut self,
        mut pred: impl FnMut(&CellRef) -> bool,
    ) -> Vec<(CellRef, CellContent)> {
        let targets: Vec<CellRef> = self
            .iter()
            .map(|(cell, _)| cell)
            .filter(|cell| pred(cell))
            .collect();
        targets
            .into_iter()
            .filter_map(|cell| self.remove(&cell).map(|content| (cell, content)))
            .collect()
    }

    pub fn clear(&mut self) {
        self.rows = Arc::default();
        self.len = 0;
    }

    /// Iterate populated cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &CellContent)> + '_ {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, content)| (CellRef::new(row, col), content))
        })
    }

    /// Populated cells in row-major order.
    pub fn sorted(&self) -> Vec<(CellRef, &CellContent)> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_by_key(|(cell, _)| *cell);
        cells
    }

    /// Populated cells of a single row, in no particular order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, &CellContent)> + '_ {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, content)| (col, content)))
    }

    /// Smallest (rows, cols) that contains every populated cell.
    pub fn extent(&self) -> (usize, usize) {
        self.iter().fold((0, 0), |(rows, cols), (cell, _)| {
            (rows.max(cell.row + 1), cols.max(cell.col + 1))
        })
    }
}

impl FromIterator<(CellRef, CellContent)> for CellStore {
    fn from_iter<I: IntoIterator<Item = (CellRef, CellContent)>>(iter: I) -> Self {
        let mut store = CellStore::new();
        for (cell, content) in iter {
            store.set(cell, content);
        }
        store
    }
}
