//! Engine configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid.
//!
//! ```toml
//! history_depth = 50
//! initial_rows = 100
//! initial_cols = 26
//!
//! [layout]
//! line_height = 16.0
//! min_row_height = 22.0
//! ```

use cellgrid_engine::layout::{ColumnWidths, RowMetrics, WrapOptions};
use serde::Deserialize;
use std::path::Path;

use crate::error::{CellgridError, Result};
use crate::sheet::DEFAULT_HISTORY_DEPTH;

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of undo snapshots kept.
    pub history_depth: usize,
    pub initial_rows: usize,
    pub initial_cols: usize,
    pub layout: LayoutConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            history_depth: DEFAULT_HISTORY_DEPTH,
            initial_rows: 100,
            initial_cols: 26,
            layout: LayoutConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub line_height: f32,
    pub vertical_padding: f32,
    pub min_row_height: f32,
    pub default_column_width: f32,
    /// Font descriptor used as part of the layout cache key.
    pub font: String,
    pub break_word: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let metrics = RowMetrics::default();
        LayoutConfig {
            line_height: metrics.line_height,
            vertical_padding: metrics.vertical_padding,
            min_row_height: metrics.min_row_height,
            default_column_width: 100.0,
            font: "default".to_string(),
            break_word: true,
        }
    }
}

impl LayoutConfig {
    pub fn metrics(&self) -> RowMetrics {
        RowMetrics {
            line_height: self.line_height,
            vertical_padding: self.vertical_padding,
            min_row_height: self.min_row_height,
        }
    }

    pub fn wrap_options(&self) -> WrapOptions {
        WrapOptions::default().break_word(self.break_word)
    }

    pub fn column_widths(&self) -> ColumnWidths {
        ColumnWidths::new(self.default_column_width)
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file. Files over 1 MiB are refused.
    pub fn load(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(CellgridError::ConfigTooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                max: MAX_CONFIG_FILE_BYTES,
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|err| CellgridError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `path` if it exists. A missing file yields defaults; an unreadable
    /// or invalid one yields defaults plus a warning for the host to report.
    pub fn load_or_default(path: &Path) -> (Self, Vec<String>) {
        if !path.exists() {
            return (Self::default(), Vec::new());
        }
        match Self::load(path) {
            Ok(config) => (config, Vec::new()),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "config rejected");
                (Self::default(), vec![err.to_string()])
            }
        }
    }
}
