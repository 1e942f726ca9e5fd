//! The four-photo strip: layout, render jobs, rasterization and export.

pub mod compositor;
pub mod export;
pub mod job;
pub mod layout;
pub mod photo_strip;
