use cellgrid_engine::engine::CellRef;

use super::state::SheetState;

/// Axis for row/column operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    Row,
    Column,
}

impl Axis {
    fn coord(self, cell: &CellRef) -> usize {
        match self {
            Axis::Row => cell.row,
            Axis::Column => cell.col,
        }
    }

    /// Same cell with its coordinate on this axis replaced.
    fn with_coord(self, cell: &CellRef, coord: usize) -> CellRef {
        match self {
            Axis::Row => CellRef::new(coord, cell.col),
            Axis::Column => CellRef::new(cell.row, coord),
        }
    }

    fn count(self, state: &SheetState) -> usize {
        match self {
            Axis::Row => state.rows,
            Axis::Column => state.cols,
        }
    }

    fn count_mut(self, state: &mut SheetState) -> &mut usize {
        match self {
            Axis::Row => &mut state.rows,
            Axis::Column => &mut state.cols,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

impl SheetState {
    pub(crate) fn grow(&mut self, axis: Axis, n: usize) {
        let count = axis.count_mut(self);
        *count = count.saturating_add(n);
    }

    /// Open an empty line at `position`, shifting every occupied cell at or
    /// past it by one. Only populated cells are visited. Refused when the
    /// axis is already at its maximum size.
    pub(crate) fn insert_line(&mut self, axis: Axis, position: usize) {
        let count = axis.count(self);
        if count.checked_add(1).is_none() {
            tracing::warn!(axis = axis.name(), position, "insert refused: axis is full");
            return;
        }
        let at = position.min(count);
        if at != position {
            tracing::warn!(axis = axis.name(), position, clamped = at, "insert position clamped");
        }

        // Occupied coordinates are below `count`, so `coord + 1` cannot overflow.
        let moved = self.cells.remove_where(|cell| axis.coord(cell) >= at);
        let shifted = moved.len();
        for (cell, content) in moved {
            let target = axis.with_coord(&cell, axis.coord(&cell) + 1);
            self.cells.set(target, content);
        }
        if let Some(edit) = &mut self.editing
            && axis.coord(&edit.cell) >= at
        {
            edit.cell = axis.with_coord(&edit.cell, axis.coord(&edit.cell) + 1);
        }
        self.grow(axis, 1);
        self.clamp_selection();
        tracing::debug!(axis = axis.name(), at, shifted, "line inserted");
    }

    /// Drop every cell on the line at `position` and shift later cells back by
    /// one. Dimensions are left as they are. An edit on the deleted line is
    /// abandoned.
    pub(crate) fn delete_line(&mut self, axis: Axis, position: usize) {
        let count = axis.count(self);
        if count == 0 {
            tracing::warn!(axis = axis.name(), position, "delete on empty axis ignored");
            return;
        }
        let at = position.min(count - 1);
        if at != position {
            tracing::warn!(axis = axis.name(), position, clamped = at, "delete position clamped");
        }

        let removed = self.cells.remove_where(|cell| axis.coord(cell) >= at);
        for (cell, content) in removed {
            let coord = axis.coord(&cell);
            if coord > at {
                self.cells.set(axis.with_coord(&cell, coord - 1), content);
            }
        }
        self.editing = self.editing.take().and_then(|mut edit| {
            let coord = axis.coord(&edit.cell);
            if coord == at {
                return None;
            }
            if coord > at {
                edit.cell = axis.with_coord(&edit.cell, coord - 1);
            }
            Some(edit)
        });
        tracing::debug!(axis = axis.name(), at, "line deleted");
    }

    /// Grow dimensions so `cell` is inside the grid. False when no grid of
    /// `usize` dimensions can contain it.
    pub(crate) fn fit(&mut self, cell: &CellRef) -> bool {
        if self.in_bounds(cell) {
            return true;
        }
        let (Some(rows), Some(cols)) = (cell.row.checked_add(1), cell.col.checked_add(1)) else {
            tracing::warn!(%cell, "cell lies past the largest possible grid");
            return false;
        };
        tracing::debug!(%cell, rows = self.rows, cols = self.cols, "grid grown to fit cell");
        self.rows = self.rows.max(rows);
        self.cols = self.cols.max(cols);
        true
    }
}
