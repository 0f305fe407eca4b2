use std::path::Path;

use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::assets::decode::{decode_frame, is_opaque};
use crate::compose::staging;
use crate::foundation::{
    core::FrameSize,
    error::{FramekitError, FramekitResult},
};
use crate::sequence::model::FrameSequence;

pub const DEFAULT_FRAME_DELAY_MS: u32 = 40;

/// How many times a GIF plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Looping {
    #[default]
    Forever,
    Times(u16),
}

impl From<Looping> for Repeat {
    fn from(l: Looping) -> Self {
        match l {
            Looping::Forever => Repeat::Infinite,
            Looping::Times(n) => Repeat::Finite(n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationOpts {
    /// Delay between frames. GIF stores delays in 10 ms units, so other values are rounded
    /// down by the encoder.
    pub frame_delay_ms: u32,
    pub looping: Looping,
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            looping: Looping::Forever,
        }
    }
}

/// Encode every frame of `seq`, in order, as an animated GIF at `out`.
///
/// No trimming happens here; call [`crate::trim_trailing_black`] first if needed. The first
/// frame fixes the canvas size; frames of another size are placed at the top-left corner of a
/// transparent canvas of that size.
///
/// GIF decoders draw each frame over the previous one, so frames with transparent pixels
/// visibly accumulate. Frames meant for this mode should be fully opaque; a warning is logged
/// for each one that is not.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn to_animation(
    seq: &FrameSequence,
    out: &Path,
    opts: &AnimationOpts,
) -> FramekitResult<()> {
    if seq.is_empty() {
        return Err(FramekitError::invalid_input(
            "cannot build an animation from an empty frame sequence",
        ));
    }
    if !out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
    {
        tracing::warn!(
            out = %out.display(),
            "animation is GIF-encoded regardless of the extension"
        );
    }
    if opts.frame_delay_ms % 10 != 0 {
        tracing::warn!(
            frame_delay_ms = opts.frame_delay_ms,
            "GIF delays have 10 ms resolution; the delay will be rounded"
        );
    }

    let bytes = encode_gif(seq, out, opts)?;

    if let Some(parent) = out.parent() {
        staging::ensure_dir(parent)?;
    }
    let tmp = staging::stage(out, &bytes)?;
    staging::commit(tmp, out)?;

    tracing::info!(out = %out.display(), frames = seq.len(), "wrote animation");
    Ok(())
}

fn encode_gif(
    seq: &FrameSequence,
    out: &Path,
    opts: &AnimationOpts,
) -> FramekitResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        encoder
            .set_repeat(opts.looping.into())
            .map_err(|e| FramekitError::encode(out, e))?;

        let delay = Delay::from_numer_denom_ms(opts.frame_delay_ms, 1);
        let mut canvas: Option<FrameSize> = None;
        for path in seq.iter() {
            let img = decode_frame(path)?;
            if !is_opaque(&img) {
                tracing::warn!(
                    frame = %path.display(),
                    "frame has transparent pixels; they will accumulate across GIF frames"
                );
            }
            let size = *canvas.get_or_insert(FrameSize::of(&img));
            let img = fit_to_canvas(img, size, path);
            encoder
                .encode_frame(Frame::from_parts(img, 0, 0, delay))
                .map_err(|e| FramekitError::encode(out, e))?;
        }
    }
    Ok(buf)
}

fn fit_to_canvas(img: RgbaImage, canvas: FrameSize, path: &Path) -> RgbaImage {
    if FrameSize::of(&img) == canvas {
        return img;
    }
    tracing::warn!(
        frame = %path.display(),
        size = %FrameSize::of(&img),
        canvas = %canvas,
        "frame size differs from the first frame; fitting it to the canvas"
    );
    let mut fitted = RgbaImage::new(canvas.width, canvas.height);
    image::imageops::replace(&mut fitted, &img, 0, 0);
    fitted
}
