use std::{io::Write as _, path::Path};

use tempfile::NamedTempFile;

use crate::foundation::error::{FramekitError, FramekitResult};

/// Write `bytes` to a hidden temporary file next to `dest`, then rename it over `dest`.
///
/// `dest`'s parent directory must already exist.
pub(crate) fn stage(dest: &Path, bytes: &[u8]) -> FramekitResult<NamedTempFile> {
    let dir = dest.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".framekit-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| FramekitError::io(dir, e))?;
    if let Err(e) = tmp.write_all(bytes).and_then(|()| tmp.flush()) {
        return Err(FramekitError::io(tmp.path(), e));
    }
    Ok(tmp)
}

pub(crate) fn commit(tmp: NamedTempFile, dest: &Path) -> FramekitResult<()> {
    tmp.persist(dest)
        .map_err(|e| FramekitError::io(dest, e.error))?;
    Ok(())
}

/// Create `dir` and its parents. Returns `true` when `dir` did not exist before.
pub(crate) fn ensure_dir(dir: &Path) -> FramekitResult<bool> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir).map_err(|e| FramekitError::io(dir, e))?;
    Ok(true)
}
