//! Data models shared between the pipeline, the reaper and the boundary layer.

mod asset;
mod upload;

pub use asset::*;
pub use upload::*;
