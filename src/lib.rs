//! Trim and compose exported animation frames.
//!
//! The flow is always the same:
//!
//! - list a directory into a [`FrameSequence`] with [`list_frames`];
//! - optionally drop trailing all-black frames with [`trim_trailing_black`];
//! - compose with [`to_sprite_sheet`] (trims implicitly, writes a PNG and a JSON sidecar into a
//!   directory named after the output) or [`to_animation`] (writes a looping GIF).
//!
//! Everything is synchronous and stateless across calls.
#![forbid(unsafe_code)]

pub mod assets;
pub mod compose;
pub mod foundation;
pub mod job;
pub mod sequence;

pub use crate::assets::decode::{decode_frame, is_black, is_solid_black};
pub use crate::compose::animation::{AnimationOpts, DEFAULT_FRAME_DELAY_MS, Looping, to_animation};
pub use crate::compose::layout::SheetLayout;
pub use crate::compose::sheet::{SheetOpts, SidecarMetadata, WidthPolicy, to_sprite_sheet};
pub use crate::foundation::core::FrameSize;
pub use crate::foundation::error::{ErrorKind, FramekitError, FramekitResult};
pub use crate::job::{Job, JobOutput, Output};
pub use crate::sequence::listing::{FrameFilter, list_frames};
pub use crate::sequence::model::FrameSequence;
pub use crate::sequence::trim::trim_trailing_black;
