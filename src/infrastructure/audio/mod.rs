pub mod concat;
pub mod manifest;
pub mod scratch;

pub use concat::{Concatenator, FfmpegConcatenator};
pub use manifest::Manifest;
pub use scratch::ScratchSpace;
