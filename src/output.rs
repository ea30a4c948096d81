use crate::error::{Error, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `content` to `path` in one step.
///
/// The text goes to a temporary file next to the destination which is then
/// renamed over it, so readers never observe a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let to_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(to_error)?;
    file.write_all(content.as_bytes()).map_err(to_error)?;
    file.as_file().sync_all().map_err(to_error)?;
    file.persist(path).map_err(|e| to_error(e.error))?;
    Ok(())
}
