use std::path::Path;

use anyhow::Context;
use dotbrowse::CilModule;

/// Load a .NET module, reporting the path on failure.
pub fn load_module(path: &Path) -> anyhow::Result<CilModule> {
    CilModule::from_file(path)
        .with_context(|| format!("failed to load module: {}", path.display()))
}

/// Extract a display-friendly filename from a path.
pub fn file_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}
