//! Sheet state, actions and undo history.
//!
//! - [`Sheet`] - The reducer: dispatches [`Action`]s, records history, notifies listeners
//! - [`SheetState`] - The snapshot renderers read and history stores
//! - [`History`] - Bounded undo/redo stacks

mod action;
mod bulk;
mod history;
mod observe;
mod ops;
mod state;
mod structure;

pub use action::Action;
pub use history::{DEFAULT_HISTORY_DEPTH, History};
pub use observe::{Change, Listener, SubscriptionId};
pub use state::{EditCursor, Selection, Sheet, SheetState};
