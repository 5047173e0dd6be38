use cellgrid_engine::engine::{CellContent, CellRef, CellStore};

use super::history::History;
use super::observe::Subscribers;
use crate::config::EngineConfig;

/// Anchor/extent range. The extent is where the cursor ends up after a drag
/// or shift-move; either corner may be the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub anchor: CellRef,
    pub extent: CellRef,
}

impl Selection {
    pub fn single(cell: CellRef) -> Selection {
        Selection {
            anchor: cell,
            extent: cell,
        }
    }

    pub fn clamped(self, rows: usize, cols: usize) -> Selection {
        Selection {
            anchor: self.anchor.clamped(rows, cols),
            extent: self.extent.clamped(rows, cols),
        }
    }

    /// (top-left, bottom-right) corners.
    pub fn bounds(&self) -> (CellRef, CellRef) {
        (
            CellRef::new(
                self.anchor.row.min(self.extent.row),
                self.anchor.col.min(self.extent.col),
            ),
            CellRef::new(
                self.anchor.row.max(self.extent.row),
                self.anchor.col.max(self.extent.col),
            ),
        )
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        let (top_left, bottom_right) = self.bounds();
        (top_left.row..=bottom_right.row).contains(&cell.row)
            && (top_left.col..=bottom_right.col).contains(&cell.col)
    }
}

/// An in-progress cell edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditCursor {
    pub cell: CellRef,
    pub value: String,
}

/// Immutable view handed to renderers; also the unit of undo snapshots.
/// Cloning is cheap: the cell store shares structure between clones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetState {
    pub cells: CellStore,
    pub rows: usize,
    pub cols: usize,
    pub selection: Selection,
    pub editing: Option<EditCursor>,
}

impl SheetState {
    pub fn new(rows: usize, cols: usize) -> SheetState {
        SheetState {
            cells: CellStore::new(),
            rows,
            cols,
            selection: Selection::default(),
            editing: None,
        }
    }

    /// Content at `cell`; Empty when nothing is stored there.
    pub fn get_cell(&self, cell: &CellRef) -> CellContent {
        self.cells.get(cell).cloned().unwrap_or_default()
    }

    pub fn in_bounds(&self, cell: &CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn editing_coord(&self) -> Option<CellRef> {
        self.editing.as_ref().map(|edit| edit.cell)
    }

    pub fn edit_value(&self) -> Option<&str> {
        self.editing.as_ref().map(|edit| edit.value.as_str())
    }

    pub(crate) fn clamp_selection(&mut self) {
        self.selection = self.selection.clamped(self.rows, self.cols);
    }
}

/// The spreadsheet state engine: current state, undo history and change
/// subscribers. All changes go through [`Sheet::dispatch`].
pub struct Sheet {
    pub(crate) state: SheetState,
    pub(crate) history: History,
    pub(crate) subscribers: Subscribers,
}

impl Sheet {
    /// Create an empty sheet with the default history depth.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_history_depth(rows, cols, super::DEFAULT_HISTORY_DEPTH)
    }

    pub fn with_history_depth(rows: usize, cols: usize, depth: usize) -> Self {
        Sheet {
            state: SheetState::new(rows, cols),
            history: History::new(depth),
            subscribers: Subscribers::default(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_history_depth(config.initial_rows, config.initial_cols, config.history_depth)
    }

    pub fn state(&self) -> &SheetState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn get_cell(&self, cell: &CellRef) -> CellContent {
        self.state.get_cell(cell)
    }

    pub fn rows(&self) -> usize {
        self.state.rows
    }

    pub fn cols(&self) -> usize {
        self.state.cols
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
