//! Final-state export.

use std::path::Path;

use clout_core::WorldState;

use crate::error::EngineError;

/// Write `state` to `path` as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_state(state: &WorldState, path: &Path) -> Result<(), EngineError> {
    let io_err = |source: std::io::Error| EngineError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json).map_err(io_err)
}
