use cellgrid_engine::engine::{CellContent, CellRef, CellValue, evaluate_stub};

use super::action::Action;
use super::observe::{Change, SubscriptionId};
use super::state::{EditCursor, Selection, Sheet, SheetState};
use super::structure::Axis;
use crate::error::{CellgridError, Result};

impl SheetState {
    /// Store `content` at `cell`, keeping the store sparse. A write no grid
    /// can contain is dropped.
    pub(crate) fn set_cell(&mut self, cell: CellRef, content: CellContent) {
        let content = with_stub_value(content);
        if !content.is_empty() && !self.fit(&cell) {
            return;
        }
        self.cells.set(cell, content);
    }

    pub(crate) fn set_cells(&mut self, batch: Vec<(CellRef, CellContent)>) {
        for (cell, content) in batch {
            self.set_cell(cell, content);
        }
    }

    /// Returns whether the selection moved.
    fn set_selection(&mut self, anchor: CellRef, extent: Option<CellRef>) -> bool {
        let selection = Selection {
            anchor,
            extent: extent.unwrap_or(anchor),
        }
        .clamped(self.rows, self.cols);
        if selection == self.selection {
            return false;
        }
        self.selection = selection;
        true
    }

    /// Returns whether the editing cursor changed. The cell is clamped into
    /// the grid like the selection.
    fn set_editing(&mut self, cell: Option<CellRef>, value: Option<String>) -> bool {
        let editing = cell.map(|cell| {
            let cell = cell.clamped(self.rows, self.cols);
            EditCursor {
                cell,
                value: value.unwrap_or_else(|| self.get_cell(&cell).input_text().into_owned()),
            }
        });
        if editing == self.editing {
            return false;
        }
        self.editing = editing;
        true
    }
}

/// Fill in a missing cached value for formulas the stub understands.
fn with_stub_value(mut content: CellContent) -> CellContent {
    if let CellValue::Formula { expression, cached } = &mut content.value
        && cached.is_none()
    {
        *cached = evaluate_stub(expression);
    }
    content
}

impl Sheet {
    /// Apply one action. Mutating actions record the prior state in history
    /// first. Returns whether the state view changed; subscribers are
    /// notified only in that case.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let name = action.name();
        let mutating = action.is_mutating();
        let change = match action {
            Action::Undo => self.history.undo(&mut self.state).then_some(Change::Undo),
            Action::Redo => self.history.redo(&mut self.state).then_some(Change::Redo),
            Action::SetSelection { anchor, extent } => self
                .state
                .set_selection(anchor, extent)
                .then_some(Change::Selection),
            Action::SetEditing { cell, value } => self
                .state
                .set_editing(cell, value)
                .then_some(Change::Editing),
            Action::LoadBulk(rows) if rows.is_empty() => None,
            Action::LoadBulk(rows) => self.mutate(Change::Load, |s| s.load_bulk(rows)),
            Action::SetCell { cell, content } => {
                self.mutate(Change::Cells, |s| s.set_cell(cell, content))
            }
            Action::SetCells(batch) => self.mutate(Change::Cells, |s| s.set_cells(batch)),
            Action::GrowRows(n) => self.mutate(Change::Structure, |s| s.grow(Axis::Row, n)),
            Action::GrowCols(n) => self.mutate(Change::Structure, |s| s.grow(Axis::Column, n)),
            Action::InsertColumnAt(at) => {
                self.mutate(Change::Structure, |s| s.insert_line(Axis::Column, at))
            }
            Action::InsertRowAt(at) => {
                self.mutate(Change::Structure, |s| s.insert_line(Axis::Row, at))
            }
            Action::DeleteColumnAt(at) => {
                self.mutate(Change::Structure, |s| s.delete_line(Axis::Column, at))
            }
            Action::DeleteRowAt(at) => {
                self.mutate(Change::Structure, |s| s.delete_line(Axis::Row, at))
            }
        };

        tracing::debug!(
            action = name,
            mutating,
            changed = change.is_some(),
            past = self.history.past_len(),
            future = self.history.future_len(),
            "dispatch"
        );

        match change {
            Some(change) => {
                self.subscribers.notify(&self.state, change);
                true
            }
            None => false,
        }
    }

    /// Snapshot, apply, record. Every mutating action is one history entry.
    fn mutate(&mut self, change: Change, apply: impl FnOnce(&mut SheetState)) -> Option<Change> {
        let before = self.state.clone();
        apply(&mut self.state);
        self.history.record(before);
        Some(change)
    }

    pub fn set_cell(&mut self, cell: CellRef, content: CellContent) -> bool {
        self.dispatch(Action::SetCell { cell, content })
    }

    /// Parse `input` the way a user would type it and store it.
    pub fn set_cell_from_input(&mut self, cell: CellRef, input: &str) -> bool {
        self.set_cell(cell, CellContent::from_input(input))
    }

    pub fn set_cells(&mut self, batch: Vec<(CellRef, CellContent)>) -> bool {
        self.dispatch(Action::SetCells(batch))
    }

    /// Clear the specified cell
    pub fn clear_cell(&mut self, cell: CellRef) -> bool {
        self.set_cell(cell, CellContent::empty())
    }

    pub fn grow_rows(&mut self, n: usize) -> bool {
        self.dispatch(Action::GrowRows(n))
    }

    pub fn grow_cols(&mut self, n: usize) -> bool {
        self.dispatch(Action::GrowCols(n))
    }

    /// Insert a column left of `at`
    pub fn insert_column_at(&mut self, at: usize) -> bool {
        self.dispatch(Action::InsertColumnAt(at))
    }

    /// Insert a row above `at`
    pub fn insert_row_at(&mut self, at: usize) -> bool {
        self.dispatch(Action::InsertRowAt(at))
    }

    pub fn delete_column_at(&mut self, at: usize) -> bool {
        self.dispatch(Action::DeleteColumnAt(at))
    }

    pub fn delete_row_at(&mut self, at: usize) -> bool {
        self.dispatch(Action::DeleteRowAt(at))
    }

    pub fn set_selection(&mut self, anchor: CellRef, extent: Option<CellRef>) -> bool {
        self.dispatch(Action::SetSelection { anchor, extent })
    }

    pub fn set_editing(&mut self, cell: Option<CellRef>, value: Option<String>) -> bool {
        self.dispatch(Action::SetEditing { cell, value })
    }

    /// Write the editing cursor's value into its cell and stop editing.
    /// The stop is not recorded, so undo returns to the pre-edit content
    /// without reopening the editor.
    pub fn commit_edit(&mut self) -> bool {
        let Some(edit) = self.state.editing.clone() else {
            return false;
        };
        self.set_editing(None, None);
        self.set_cell_from_input(edit.cell, &edit.value)
    }

    pub fn load_bulk(&mut self, rows: Vec<Vec<String>>) -> bool {
        self.dispatch(Action::LoadBulk(rows))
    }

    /// Undo the last mutating action. False when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.dispatch(Action::Undo)
    }

    /// Redo the last undone action. False when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.dispatch(Action::Redo)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Look up a cell by A1 name.
    pub fn cell_by_name(&self, name: &str) -> Result<CellContent> {
        let cell =
            CellRef::parse(name).ok_or_else(|| CellgridError::InvalidCellRef(name.to_string()))?;
        Ok(self.state.get_cell(&cell))
    }

    /// Call `listener` after every dispatch that changes the state view.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SheetState, Change) + 'static,
    ) -> SubscriptionId {
        self.subscribers.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn text(s: &str) -> CellContent {
        CellContent::literal(s)
    }

    fn bulk(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_insert_column_then_undo_restores_cell_and_width() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_cell(CellRef::new(0, 0), text("A"));
        sheet.insert_column_at(0);

        assert_eq!(sheet.get_cell(&CellRef::new(0, 1)), text("A"));
        assert!(sheet.get_cell(&CellRef::new(0, 0)).is_empty());
        assert_eq!(sheet.cols(), 4);

        assert!(sheet.undo());
        assert_eq!(sheet.get_cell(&CellRef::new(0, 0)), text("A"));
        assert!(sheet.get_cell(&CellRef::new(0, 1)).is_empty());
        assert_eq!(sheet.cols(), 3);
    }

    #[test]
    fn test_bulk_load_populates_only_non_blank_fields() {
        let mut sheet = Sheet::new(1, 1);
        sheet.load_bulk(bulk(&[&["a", "b"], &["c", ""]]));

        let populated: Vec<CellRef> = sheet
            .state()
            .cells
            .sorted()
            .into_iter()
            .map(|(cell, _)| cell)
            .collect();
        assert_eq!(
            populated,
            vec![CellRef::new(0, 0), CellRef::new(0, 1), CellRef::new(1, 0)]
        );
        assert_eq!(sheet.get_cell(&CellRef::new(1, 0)), text("c"));
    }

    #[test]
    fn test_single_undo_reverts_whole_import() {
        let mut sheet = Sheet::new(2, 2);
        sheet.set_cell(CellRef::new(1, 1), text("keep"));
        let before = sheet.state().clone();

        sheet.load_bulk(bulk(&[&["x", "y", "z"], &["1"], &["2"]]));
        assert_eq!(sheet.history().past_len(), 2);
        assert!(sheet.undo());
        assert_eq!(sheet.state(), &before);
    }

    #[test]
    fn test_empty_bulk_load_is_a_no_op() {
        let mut sheet = Sheet::new(2, 2);
        sheet.set_cell(CellRef::new(0, 0), text("a"));
        let before = sheet.state().clone();

        assert!(!sheet.load_bulk(Vec::new()));
        assert_eq!(sheet.state(), &before);
        assert_eq!(sheet.history().past_len(), 1);
    }

    #[test]
    fn test_clearing_absent_cell_leaves_store_unchanged() {
        let mut sheet = Sheet::new(5, 5);
        sheet.set_cell(CellRef::new(1, 1), text("x"));
        let cells = sheet.state().cells.clone();

        sheet.clear_cell(CellRef::new(3, 3));
        assert_eq!(sheet.state().cells, cells);
        assert_eq!(sheet.state().cells.len(), 1);
    }

    #[test]
    fn test_every_mutating_action_undoes_exactly() {
        let actions = vec![
            Action::SetCell { cell: CellRef::new(0, 1), content: text("new") },
            Action::SetCell { cell: CellRef::new(0, 0), content: CellContent::empty() },
            Action::SetCell { cell: CellRef::new(9, 9), content: text("far") },
            Action::SetCells(vec![
                (CellRef::new(0, 0), text("p")),
                (CellRef::new(2, 2), CellContent::formula("SUM(A1:A2)")),
            ]),
            Action::GrowRows(4),
            Action::GrowCols(0),
            Action::InsertColumnAt(1),
            Action::InsertColumnAt(40),
            Action::InsertRowAt(0),
            Action::DeleteColumnAt(0),
            Action::DeleteRowAt(2),
            Action::LoadBulk(bulk(&[&["q"]])),
        ];

        for action in actions {
            let mut sheet = Sheet::new(3, 3);
            sheet.set_cell(CellRef::new(0, 0), text("a").with_style(2));
            sheet.set_cell(CellRef::new(2, 1), text("b"));
            sheet.set_selection(CellRef::new(1, 1), Some(CellRef::new(2, 2)));
            let before = sheet.state().clone();

            assert!(sheet.dispatch(action.clone()), "{:?} reported no change", action);
            assert!(sheet.undo(), "{:?} left nothing to undo", action);
            assert_eq!(sheet.state(), &before, "undo of {:?} was not exact", action);

            let after_undo = sheet.state().clone();
            assert!(sheet.redo());
            assert!(sheet.undo());
            assert_eq!(sheet.state(), &after_undo);
        }
    }

    #[test]
    fn test_history_is_capped_at_fifty() {
        let mut sheet = Sheet::new(1, 1);
        for i in 0..60 {
            sheet.set_cell(CellRef::new(0, 0), text(&i.to_string()));
        }
        assert_eq!(sheet.history().past_len(), 50);

        while sheet.undo() {}
        // Oldest surviving snapshot is the state before write #10.
        assert_eq!(sheet.get_cell(&CellRef::new(0, 0)), text("9"));
    }

    #[test]
    fn test_selection_and_editing_bypass_history() {
        let mut sheet = Sheet::new(4, 4);
        sheet.set_cell(CellRef::new(0, 0), text("a"));
        sheet.set_cell(CellRef::new(0, 0), text("b"));
        sheet.undo();
        assert_eq!(sheet.history().future_len(), 1);

        sheet.set_selection(CellRef::new(3, 3), None);
        sheet.set_editing(Some(CellRef::new(0, 0)), None);
        assert_eq!(sheet.history().past_len(), 1);
        assert_eq!(sheet.history().future_len(), 1);
        assert_eq!(sheet.state().edit_value(), Some("a"));

        assert!(sheet.redo());
        assert_eq!(sheet.get_cell(&CellRef::new(0, 0)), text("b"));
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut sheet = Sheet::new(2, 2);
        sheet.set_cell(CellRef::new(0, 0), text("a"));
        sheet.undo();
        assert!(sheet.can_redo());
        sheet.grow_rows(1);
        assert!(!sheet.can_redo());
        assert!(!sheet.redo());
    }

    #[test]
    fn test_undo_redo_at_boundaries_are_no_ops() {
        let mut sheet = Sheet::new(2, 2);
        let before = sheet.state().clone();
        assert!(!sheet.undo());
        assert!(!sheet.redo());
        assert_eq!(sheet.state(), &before);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut sheet = Sheet::new(3, 2);
        sheet.set_selection(CellRef::new(10, 10), Some(CellRef::new(1, 0)));
        let selection = sheet.state().selection;
        assert_eq!(selection.anchor, CellRef::new(2, 1));
        assert_eq!(selection.extent, CellRef::new(1, 0));
        assert!(selection.contains(&CellRef::new(2, 0)));
    }

    #[test]
    fn test_set_cell_outside_grid_grows_it() {
        let mut sheet = Sheet::new(2, 2);
        sheet.set_cell(CellRef::new(4, 6), text("x"));
        assert_eq!((sheet.rows(), sheet.cols()), (5, 7));

        sheet.clear_cell(CellRef::new(20, 20));
        assert_eq!((sheet.rows(), sheet.cols()), (5, 7));
    }

    #[test]
    fn test_formula_gets_stub_value() {
        let mut sheet = Sheet::new(2, 2);
        let raw = CellContent {
            value: CellValue::Formula {
                expression: "SUM(A1:A2)".to_string(),
                cached: None,
            },
            style: None,
        };
        sheet.set_cell(CellRef::new(0, 0), raw);
        assert_eq!(sheet.get_cell(&CellRef::new(0, 0)).display_text(), "0");

        sheet.set_cell_from_input(CellRef::new(1, 0), "=A1*2");
        assert_eq!(sheet.get_cell(&CellRef::new(1, 0)).display_text(), "=A1*2");
    }

    #[test]
    fn test_commit_edit_writes_value_and_undo_skips_editor() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_editing(Some(CellRef::new(1, 1)), Some("hello".to_string()));
        assert_eq!(sheet.state().editing_coord(), Some(CellRef::new(1, 1)));

        assert!(sheet.commit_edit());
        assert_eq!(sheet.get_cell(&CellRef::new(1, 1)), text("hello"));
        assert!(sheet.state().editing.is_none());

        sheet.undo();
        assert!(sheet.get_cell(&CellRef::new(1, 1)).is_empty());
        assert!(sheet.state().editing.is_none());
        assert!(!sheet.commit_edit());
    }

    #[test]
    fn test_set_cell_at_max_coordinate_is_dropped() {
        let mut sheet = Sheet::new(2, 2);
        sheet.set_cell(CellRef::new(0, usize::MAX), text("x"));
        sheet.set_cell(CellRef::new(usize::MAX, 0), text("y"));

        assert_eq!((sheet.rows(), sheet.cols()), (2, 2));
        assert!(sheet.state().cells.is_empty());
        assert!(sheet.undo());
    }

    #[test]
    fn test_commit_after_insert_targets_moved_cell() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_cell(CellRef::new(0, 0), text("A"));
        sheet.set_editing(Some(CellRef::new(0, 0)), Some("B".to_string()));
        sheet.insert_column_at(0);

        assert!(sheet.commit_edit());
        assert!(sheet.get_cell(&CellRef::new(0, 0)).is_empty());
        assert_eq!(sheet.get_cell(&CellRef::new(0, 1)), text("B"));
    }

    #[test]
    fn test_delete_of_edited_line_abandons_edit() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_cell(CellRef::new(1, 1), text("keep"));
        sheet.set_editing(Some(CellRef::new(0, 1)), Some("lost".to_string()));
        sheet.delete_row_at(0);

        assert!(!sheet.commit_edit());
        assert_eq!(sheet.get_cell(&CellRef::new(0, 1)), text("keep"));
    }

    #[test]
    fn test_editing_cell_is_clamped() {
        let mut sheet = Sheet::new(3, 2);
        sheet.set_editing(Some(CellRef::new(1000, 1000)), Some("v".to_string()));
        assert_eq!(sheet.state().editing_coord(), Some(CellRef::new(2, 1)));

        sheet.commit_edit();
        assert_eq!((sheet.rows(), sheet.cols()), (3, 2));
        assert_eq!(sheet.get_cell(&CellRef::new(2, 1)), text("v"));
    }

    #[test]
    fn test_bulk_load_clears_editing() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_editing(Some(CellRef::new(0, 0)), None);
        sheet.load_bulk(bulk(&[&["a"]]));
        assert!(sheet.state().editing.is_none());
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let mut sheet = Sheet::new(3, 3);
        let seen: Rc<RefCell<Vec<(Change, usize)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let id = sheet.subscribe(move |state, change| {
            sink.borrow_mut().push((change, state.cells.len()));
        });

        sheet.set_cell(CellRef::new(0, 0), text("a"));
        sheet.set_selection(CellRef::new(1, 1), None);
        sheet.set_selection(CellRef::new(1, 1), None);
        sheet.insert_column_at(0);
        sheet.undo();
        sheet.redo();
        sheet.redo();

        assert_eq!(
            *seen.borrow(),
            vec![
                (Change::Cells, 1),
                (Change::Selection, 1),
                (Change::Structure, 1),
                (Change::Undo, 1),
                (Change::Redo, 1),
            ]
        );

        assert!(sheet.unsubscribe(id));
        assert_eq!(sheet.subscriber_count(), 0);
        sheet.grow_cols(1);
        assert_eq!(seen.borrow().len(), 5);
    }

    #[test]
    fn test_cell_by_name() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_cell(CellRef::new(2, 1), text("b3"));
        assert_eq!(sheet.cell_by_name("B3").unwrap(), text("b3"));
        assert!(sheet.cell_by_name("C9").unwrap().is_empty());
        assert!(matches!(
            sheet.cell_by_name("3B"),
            Err(CellgridError::InvalidCellRef(_))
        ));
    }
}
