//! Ordered frame lists: building them from a directory, and trimming trailing black frames.

pub mod listing;
pub mod model;
pub mod trim;
