//! Crop tool: aspect-locked region, interactive session and the pending-image queue.

pub mod queue;
pub mod region;
pub mod session;
