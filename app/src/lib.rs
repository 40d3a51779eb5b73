pub mod app;
pub mod clip;
pub mod fetch;
pub mod tool;
pub mod trim;
pub mod workspace;

pub use clip::{produce_clip, ClipError, ClipOutput};
