use crate::assets::decode::{decode_frame, is_black};
use crate::foundation::error::FramekitResult;
use crate::sequence::model::FrameSequence;

/// Remove trailing all-black frames from `seq` in place and return how many were removed.
///
/// Scanning starts at the last frame and stops at the first frame with any non-zero red,
/// green or blue channel. Each inspected frame is decoded exactly once; nothing is cached, so
/// a surviving frame is decoded again by whoever composes it. A sequence that is black all the
/// way through ends up empty.
///
/// If a frame fails to decode the error is returned and the frames already removed stay
/// removed.
pub fn trim_trailing_black(seq: &mut FrameSequence) -> FramekitResult<usize> {
    let mut removed = 0usize;
    while let Some(last) = seq.last() {
        let img = decode_frame(last)?;
        if !is_black(&img) {
            break;
        }
        tracing::debug!(frame = %last.display(), "dropping trailing black frame");
        seq.pop();
        removed += 1;
    }
    Ok(removed)
}
