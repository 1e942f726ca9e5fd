//! Text and sticker overlays placed on the strip.

pub mod catalog;
pub mod element;
pub mod gesture;
pub mod layer;
