//! Fixed report paths.

use std::path::{Path, PathBuf};

pub const DATA_FILE_NAME: &str = "superstore_sales.csv";
pub const FIGURES_DIR_NAME: &str = "figures";

/// Where the report reads its data and writes its figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub data_path: PathBuf,
    pub figures_dir: PathBuf,
}

impl ReportConfig {
    /// Data file and figures directory side by side under `base_dir`.
    pub fn from_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            data_path: base_dir.join(DATA_FILE_NAME),
            figures_dir: base_dir.join(FIGURES_DIR_NAME),
        }
    }
}

impl Default for ReportConfig {
    /// Resolved against the package directory, not the working directory.
    fn default() -> Self {
        Self::from_base_dir(env!("CARGO_MANIFEST_DIR"))
    }
}
