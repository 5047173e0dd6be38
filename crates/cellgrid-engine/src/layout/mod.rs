//! Text layout for wrapped cells.
//!
//! - [`wrap_lines`], [`try_wrap_lines`] - Greedy wrapping against a caller's measure
//! - [`LayoutCache`] - Memoized wrap results with explicit invalidation
//! - [`autosize_rows`], [`RowHeights`] - Row heights derived from wrapped line counts

mod cache;
mod rows;
mod wrap;

pub use cache::{LayoutCache, LayoutKey};
pub use rows::{AutosizeRequest, ColumnWidths, RowHeights, RowMetrics, autosize_rows};
pub use wrap::{WrapOptions, cell_width, try_wrap_lines, wrap_lines};
