//! Fotoboo builds four-photo strips.
//!
//! Photos come from uploads or a camera, are cropped one at a time with an aspect-locked,
//! zoomable and rotatable crop region, and four of them are composed into a vertical strip with
//! text and sticker decorations and a watermark. The same layout constants drive the interactive
//! preview and the high-resolution export.
//!
//! - Crop a photo with a [`CropSession`]
//! - Drive the whole flow with a [`SessionOrchestrator`]
//! - Render a [`RenderJob`] with a [`StripCompositor`]
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod config;
pub mod crop;
pub mod decor;
pub mod geometry;
pub mod project;
pub mod render;
pub mod session;
pub mod strip;

pub use crate::foundation::core::{
    Affine, AspectRatio, Canvas, Line, Point, PointerKind, Rect, Rgba8, Size, Vec2,
};
pub use crate::foundation::error::{DeviceAccessError, FotobooError, FotobooResult};
pub use crate::foundation::math::normalize_degrees;

pub use crate::assets::decode::{EncodedImage, SourceImage};
pub use crate::config::settings::FotobooConfig;
pub use crate::crop::session::{CropSession, CropState};
pub use crate::decor::element::{DecorationElement, ElementId};
pub use crate::decor::layer::DecorationLayer;
pub use crate::project::model::{CropRequest, StripProject};
pub use crate::session::orchestrator::{BoothState, SessionOrchestrator};
pub use crate::strip::compositor::{ExportReport, StripCompositor};
pub use crate::strip::export::StripExport;
pub use crate::strip::job::RenderJob;
pub use crate::strip::layout::StripLayout;
