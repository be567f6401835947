//! Path utilities

use std::path::PathBuf;

/// Vox data directory (~/.vox), or `.vox` when no home directory is known
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".vox"))
        .unwrap_or_else(|| PathBuf::from(".vox"))
}

/// Config file location
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}
