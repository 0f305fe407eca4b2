use std::path::Path;

use crate::foundation::{
    core::split_extension,
    error::{FramekitError, FramekitResult},
};
use crate::sequence::model::FrameSequence;

/// Name-based selection of frame files inside one directory.
///
/// Every field is optional; an empty filter selects every regular file.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameFilter {
    /// File name must start with this.
    pub prefix: Option<String>,
    /// File name with its last extension removed must end with this.
    pub suffix: Option<String>,
    /// Last extension must equal this (case-sensitive, leading `.` optional).
    pub extension: Option<String>,
}

impl FrameFilter {
    pub fn with_extension(ext: impl Into<String>) -> Self {
        Self {
            extension: Some(ext.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let (stem, ext) = split_extension(file_name);

        if let Some(prefix) = self.prefix.as_deref()
            && !file_name.starts_with(prefix)
        {
            return false;
        }
        if let Some(suffix) = self.suffix.as_deref()
            && !stem.ends_with(suffix)
        {
            return false;
        }
        if let Some(want) = self.extension.as_deref() {
            let want = want.strip_prefix('.').unwrap_or(want);
            if ext != Some(want) {
                return false;
            }
        }
        true
    }
}

/// List the regular files of `dir` accepted by `filter`, sorted lexicographically by file name.
///
/// Subdirectories are skipped, and so are names that are not valid UTF-8 since they cannot be
/// matched against the filter.
pub fn list_frames(dir: &Path, filter: &FrameFilter) -> FramekitResult<FrameSequence> {
    let entries = std::fs::read_dir(dir).map_err(|e| FramekitError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FramekitError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::debug!(path = %path.display(), "skipping non-utf8 file name");
            continue;
        };
        if filter.matches(&name) {
            names.push(name);
        }
    }
    names.sort();

    tracing::debug!(dir = %dir.display(), count = names.len(), "listed frames");
    Ok(names.into_iter().map(|n| dir.join(n)).collect())
}
