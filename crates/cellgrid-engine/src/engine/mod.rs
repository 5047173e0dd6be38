//! Spreadsheet storage API.
//!
//! - [`CellContent`], [`CellValue`] - What a cell holds
//! - [`CellStore`] - Sparse, structurally shared cell storage
//! - [`CellRef`] - Grid coordinates (A1 notation <-> row/col indices)
//! - [`col_to_letters`], [`letters_to_col`] - Column label bijection
//! - [`evaluate_stub`] - Placeholder formula evaluation

mod cell;
mod cell_ref;
mod formula;
mod store;

pub use cell::{CellContent, CellValue, StyleId};
pub use cell_ref::{CellRef, col_to_letters, letters_to_col};
pub use formula::evaluate_stub;
pub use store::CellStore;
