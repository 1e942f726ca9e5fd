//! Image and font assets.
//!
//! Photos travel through the crate as [`decode::EncodedImage`] (the bytes a user supplied or a
//! crop produced) and are decoded into premultiplied [`decode::SourceImage`] bitmaps only where
//! pixels are needed.

pub mod decode;
pub mod encode;
pub mod fonts;
/// Deadline-bounded parallel decoding.
pub mod join;
pub mod text;
