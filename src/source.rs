//! Source discovery
//!
//! Finds the `.oml` files named by a path: the path itself when it is an
//! OML file, or the OML files directly inside it when it is a directory.
//! Subdirectories are not searched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of OML sources.
pub const OML_EXTENSION: &str = "oml";

/// True if `path` is an existing regular file with the `.oml` extension.
pub fn is_oml_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == OML_EXTENSION)
}

/// Collect the OML sources for `path`, sorted by path.
pub fn discover_sources(path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();

    if is_oml_file(path) {
        sources.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in fs::read_dir(path)? {
            let candidate = entry?.path();
            if is_oml_file(&candidate) {
                sources.push(candidate);
            }
        }
        sources.sort();
    }

    debug!(path = %path.display(), count = sources.len(), "discovered sources");
    Ok(sources)
}
