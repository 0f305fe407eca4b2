use std::path::Path;

use image::RgbaImage;

use crate::foundation::error::{FramekitError, FramekitResult};

/// Decode a frame from disk into straight-alpha RGBA8, whatever its stored color type.
pub fn decode_frame(path: &Path) -> FramekitResult<RgbaImage> {
    let dyn_img = image::open(path).map_err(|e| FramekitError::decode(path, e))?;
    Ok(dyn_img.to_rgba8())
}

/// `true` when every pixel has zero red, green and blue. Alpha is ignored, so a black frame
/// with transparent regions still counts.
pub fn is_black(img: &RgbaImage) -> bool {
    img.as_raw().chunks_exact(4).all(|px| px[..3] == [0, 0, 0])
}

/// `true` when every pixel is opaque black `(0, 0, 0, 255)`.
pub fn is_solid_black(img: &RgbaImage) -> bool {
    img.as_raw()
        .chunks_exact(4)
        .all(|px| px == [0, 0, 0, 255])
}

pub fn is_opaque(img: &RgbaImage) -> bool {
    img.as_raw().chunks_exact(4).all(|px| px[3] == 255)
}
