use cellgrid_engine::engine::{CellContent, CellRef};
use serde::{Deserialize, Serialize};

/// Everything a host can ask the sheet to do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    SetCell { cell: CellRef, content: CellContent },
    /// Applied as one unit with a single undo entry.
    SetCells(Vec<(CellRef, CellContent)>),
    GrowRows(usize),
    GrowCols(usize),
    InsertColumnAt(usize),
    InsertRowAt(usize),
    DeleteColumnAt(usize),
    DeleteRowAt(usize),
    /// A missing extent collapses the selection onto the anchor.
    SetSelection {
        anchor: CellRef,
        extent: Option<CellRef>,
    },
    /// `cell: None` stops editing. A missing value starts from the cell's
    /// current input text.
    SetEditing {
        cell: Option<CellRef>,
        value: Option<String>,
    },
    /// Replace all content with pre-tokenized rows of fields.
    LoadBulk(Vec<Vec<String>>),
    Undo,
    Redo,
}

impl Action {
    /// Whether the action changes cells or dimensions (and is therefore
    /// recorded in history).
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Action::SetSelection { .. } | Action::SetEditing { .. } | Action::Undo | Action::Redo
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::SetCell { .. } => "set_cell",
            Action::SetCells(_) => "set_cells",
            Action::GrowRows(_) => "grow_rows",
            Action::GrowCols(_) => "grow_cols",
            Action::InsertColumnAt(_) => "insert_column_at",
            Action::InsertRowAt(_) => "insert_row_at",
            Action::DeleteColumnAt(_) => "delete_column_at",
            Action::DeleteRowAt(_) => "delete_row_at",
            Action::SetSelection { .. } => "set_selection",
            Action::SetEditing { .. } => "set_editing",
            Action::LoadBulk(_) => "load_bulk",
            Action::Undo => "undo",
            Action::Redo => "redo",
        }
    }
}
