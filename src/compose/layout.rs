use std::path::{Path, PathBuf};

use crate::foundation::{
    core::split_extension,
    error::{FramekitError, FramekitResult},
};

/// Extension the sprite-sheet output path must carry.
pub const SHEET_EXTENSION: &str = "png";

/// On-disk placement of a sprite sheet and its sidecar.
///
/// For an output path `img/out.png` the artifact lives in its own directory:
///
/// ```text
/// img/out/
///   out.png
///   out_info.json
/// ```
///
/// Only the last extension is stripped, so `boom.v2.png` lands in `boom.v2/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    pub base: String,
    pub dir: PathBuf,
    pub image_path: PathBuf,
    pub sidecar_path: PathBuf,
}

impl SheetLayout {
    /// Derive the layout from a requested output path. Pure; touches nothing on disk.
    pub fn from_output_path(out: &Path) -> FramekitResult<Self> {
        let file_name = out
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                FramekitError::invalid_input(format!(
                    "output path '{}' has no usable file name",
                    out.display()
                ))
            })?;

        let (base, ext) = split_extension(file_name);
        if ext != Some(SHEET_EXTENSION) {
            return Err(FramekitError::invalid_input(format!(
                "output file must be a .{SHEET_EXTENSION} file, got '{file_name}'"
            )));
        }
        if base.is_empty() {
            return Err(FramekitError::invalid_input(format!(
                "output file name '{file_name}' has an empty base name"
            )));
        }

        let parent = out.parent().unwrap_or_else(|| Path::new(""));
        let dir = parent.join(base);
        Ok(Self {
            base: base.to_string(),
            image_path: dir.join(format!("{base}.{SHEET_EXTENSION}")),
            sidecar_path: dir.join(format!("{base}_info.json")),
            dir,
        })
    }
}
