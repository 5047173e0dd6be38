//! cellgrid-core - UI-agnostic sheet state, undo history and configuration.

pub mod config;
pub mod error;
pub mod sheet;

pub use config::{EngineConfig, LayoutConfig};
pub use error::{CellgridError, Result};
pub use sheet::{Action, Change, Sheet, SheetState};

pub use cellgrid_engine::engine::{CellContent, CellRef, CellValue};
