//! Turning a frame sequence into a single artifact.
//!
//! Two outputs are supported:
//!
//! - a looping animated GIF ([`animation::to_animation`]), one encoded frame per input frame;
//! - a horizontal sprite sheet plus a JSON sidecar ([`sheet::to_sprite_sheet`]), laid out in a
//!   directory named after the output file (see [`layout::SheetLayout`]).
//!
//! Both stage their output next to the destination and rename it into place, so a failed call
//! never leaves a half-written artifact at the final path.

pub mod animation;
pub mod layout;
pub mod sheet;
mod staging;
