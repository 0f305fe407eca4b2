use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::assets::decode::decode_frame;
use crate::compose::{layout::SheetLayout, staging};
use crate::foundation::{
    core::FrameSize,
    error::{FramekitError, FramekitResult},
};
use crate::sequence::{model::FrameSequence, trim::trim_trailing_black};

/// Layout record written next to a sprite sheet as `<base>_info.json`.
///
/// The JSON keys are consumed by external tooling and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SidecarMetadata {
    #[serde(rename = "Total_width")]
    pub total_width: u32,
    #[serde(rename = "Total_height")]
    pub total_height: u32,
    #[serde(rename = "Number_of_frames")]
    pub frame_count: u32,
}

/// How frames whose width differs from the first frame are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthPolicy {
    /// The first frame fixes the cell width. Wider frames spill into the next cell and are
    /// overwritten by it (the last one is clipped at the canvas edge); narrower frames leave
    /// transparent gaps.
    #[default]
    FirstFrame,
    /// Any width mismatch is rejected with [`FramekitError::UnsupportedFormat`].
    Strict,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetOpts {
    pub width_policy: WidthPolicy,
}

/// Compose `seq` into a horizontal sprite sheet at the layout derived from `out`.
///
/// Trailing black frames are trimmed from `seq` first (in place), so the caller sees the
/// frames that actually went into the sheet. Frame `i` is pasted at `x = i * w` where `w` is
/// the first frame's width; pasting overwrites instead of blending. Every frame must share the
/// first frame's height.
///
/// Nothing is written unless the whole sheet composes: the output path is validated before
/// any frame is read, and both files are staged and renamed into place at the end.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn to_sprite_sheet(
    seq: &mut FrameSequence,
    out: &Path,
    opts: &SheetOpts,
) -> FramekitResult<SidecarMetadata> {
    let layout = SheetLayout::from_output_path(out)?;

    let trimmed = trim_trailing_black(seq)?;
    if trimmed > 0 {
        tracing::debug!(trimmed, remaining = seq.len(), "trimmed trailing black frames");
    }
    if seq.is_empty() {
        return Err(FramekitError::invalid_input(
            "no frames left to compose after trimming trailing black frames",
        ));
    }

    let (canvas, meta) = compose(seq, opts)?;

    let png = encode_png(&canvas, &layout.image_path)?;
    let json = serde_json::to_vec(&meta).map_err(|e| FramekitError::serde(e.to_string()))?;

    persist_artifacts(&layout, &png, &json)?;

    tracing::info!(
        image = %layout.image_path.display(),
        width = meta.total_width,
        height = meta.total_height,
        frames = meta.frame_count,
        "wrote sprite sheet"
    );
    Ok(meta)
}

/// Stage both files inside `layout.dir` and rename them into place, image first.
///
/// A failure before the image rename leaves any previous artifact untouched. A failure on the
/// sidecar rename removes both files, since the old sidecar no longer describes the new image.
/// Either way, a directory created by this call is removed again if it ends up empty.
fn persist_artifacts(layout: &SheetLayout, png: &[u8], json: &[u8]) -> FramekitResult<()> {
    let created_dir = staging::ensure_dir(&layout.dir)?;

    let staged = staging::stage(&layout.image_path, png).and_then(|png_tmp| {
        let json_tmp = staging::stage(&layout.sidecar_path, json)?;
        Ok((png_tmp, json_tmp))
    });
    let (png_tmp, json_tmp) = match staged {
        Ok(tmps) => tmps,
        Err(e) => {
            remove_created_dir(layout, created_dir);
            return Err(e);
        }
    };

    if let Err(e) = staging::commit(png_tmp, &layout.image_path) {
        drop(json_tmp);
        remove_created_dir(layout, created_dir);
        return Err(e);
    }
    if let Err(e) = staging::commit(json_tmp, &layout.sidecar_path) {
        rollback(layout, created_dir);
        return Err(e);
    }
    Ok(())
}

fn rollback(layout: &SheetLayout, created_dir: bool) {
    tracing::warn!(dir = %layout.dir.display(), "rolling back partially written sprite sheet");
    let _ = std::fs::remove_file(&layout.image_path);
    let _ = std::fs::remove_file(&layout.sidecar_path);
    remove_created_dir(layout, created_dir);
}

fn remove_created_dir(layout: &SheetLayout, created_dir: bool) {
    if created_dir {
        // Fails, and is meant to, if anything else landed in the directory meanwhile.
        let _ = std::fs::remove_dir(&layout.dir);
    }
}

/// Paste every frame of `seq` onto a transparent canvas. `seq` must be non-empty.
fn compose(
    seq: &FrameSequence,
    opts: &SheetOpts,
) -> FramekitResult<(RgbaImage, SidecarMetadata)> {
    let mut paths = seq.iter();
    let Some(first_path) = paths.next() else {
        return Err(FramekitError::invalid_input("empty frame sequence"));
    };

    let first = decode_frame(first_path)?;
    let cell = FrameSize::of(&first);
    if cell.is_empty() {
        return Err(FramekitError::unsupported_format(format!(
            "first frame '{}' is {cell}; sprite sheet cells cannot be empty",
            first_path.display()
        )));
    }
    let frame_count = u32::try_from(seq.len())
        .map_err(|_| FramekitError::unsupported_format("too many frames for one sheet"))?;
    let total_width = frame_count.checked_mul(cell.width).ok_or_else(|| {
        FramekitError::unsupported_format(format!(
            "{frame_count} frames of width {} overflow the sheet width",
            cell.width
        ))
    })?;

    let mut canvas = RgbaImage::new(total_width, cell.height);
    image::imageops::replace(&mut canvas, &first, 0, 0);
    drop(first);

    for (idx, path) in paths.enumerate() {
        let frame = decode_frame(path)?;
        check_frame_size(path, cell, FrameSize::of(&frame), opts.width_policy)?;
        let x = i64::from(cell.width) * (idx as i64 + 1);
        image::imageops::replace(&mut canvas, &frame, x, 0);
    }

    let meta = SidecarMetadata {
        total_width,
        total_height: cell.height,
        frame_count,
    };
    Ok((canvas, meta))
}

fn check_frame_size(
    path: &Path,
    cell: FrameSize,
    got: FrameSize,
    policy: WidthPolicy,
) -> FramekitResult<()> {
    if got.height != cell.height {
        return Err(FramekitError::unsupported_format(format!(
            "frame '{}' is {got}, sprite sheet rows are {} px high",
            path.display(),
            cell.height
        )));
    }
    if got.width != cell.width {
        match policy {
            WidthPolicy::Strict => {
                return Err(FramekitError::unsupported_format(format!(
                    "frame '{}' is {got}, sprite sheet cells are {cell}",
                    path.display()
                )));
            }
            WidthPolicy::FirstFrame => {
                tracing::warn!(
                    frame = %path.display(),
                    size = %got,
                    cell = %cell,
                    "frame width differs from the first frame; cell width is kept"
                );
            }
        }
    }
    Ok(())
}

fn encode_png(canvas: &RgbaImage, dest: &Path) -> FramekitResult<Vec<u8>> {
    let mut buf = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| FramekitError::encode(dest, e))?;
    Ok(buf)
}
