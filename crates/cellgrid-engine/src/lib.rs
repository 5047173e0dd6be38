//! cellgrid_engine - sparse cell storage and text layout.

pub mod engine;
pub mod layout;
