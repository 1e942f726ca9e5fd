//! Display-space to source-space mapping.
//!
//! A bitmap shown in a display box is scaled to cover the box (centered, overflowing on one
//! axis), then zoomed and rotated about the box center. Every function here is pure.

use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};

/// Uniform scale at which `image` fully covers `display`.
pub fn cover_scale(image: Size, display: Size) -> f64 {
    (display.width / image.width).max(display.height / image.height)
}

/// Source-space rectangle seen through `crop` (display space) at `zoom`.
///
/// The rectangle is not clamped to the image; regions outside it simply contribute no pixels,
/// and small sources are upsampled.
pub fn crop_to_source(image: Size, display: Size, crop: Rect, zoom: f64) -> Rect {
    let scale = cover_scale(image, display) * zoom;
    let offset = (crop.center() - display_center(display)) / scale;
    let source = Size::new(crop.width() / scale, crop.height() / scale);
    let center = Point::new(image.width / 2.0, image.height / 2.0) + offset;
    Rect::from_center_size(center, source)
}

/// De-rotation applied to the crop output canvas: rotate by `-rotation_deg` about its center.
pub fn crop_output_transform(output: Size, rotation_deg: f64) -> Affine {
    let c = Vec2::new(output.width / 2.0, output.height / 2.0);
    Affine::translate(c) * Affine::rotate(-rotation_deg.to_radians()) * Affine::translate(-c)
}

/// Image-space to display-space transform of the interactive preview.
pub fn preview_transform(image: Size, display: Size, zoom: f64, rotation_deg: f64) -> Affine {
    let scale = cover_scale(image, display) * zoom;
    Affine::translate(display_center(display).to_vec2())
        * Affine::rotate(rotation_deg.to_radians())
        * Affine::scale(scale)
        * Affine::translate(-Vec2::new(image.width / 2.0, image.height / 2.0))
}

/// Map a display point to the source pixel under it in the preview.
pub fn display_to_source(
    point: Point,
    image: Size,
    display: Size,
    zoom: f64,
    rotation_deg: f64,
) -> Point {
    preview_transform(image, display, zoom, rotation_deg).inverse() * point
}

pub fn source_to_display(
    point: Point,
    image: Size,
    display: Size,
    zoom: f64,
    rotation_deg: f64,
) -> Point {
    preview_transform(image, display, zoom, rotation_deg) * point
}

/// Centered cover crop of `image` for a box of aspect ratio `target_aspect` (width / height).
///
/// Wider images lose their left and right edges, taller images their top and bottom. An image
/// that already has the target aspect maps to its full extent.
pub fn cover_fit_source_rect(image: Size, target_aspect: f64) -> Rect {
    let image_aspect = image.width / image.height;
    let (w, h) = if image_aspect > target_aspect {
        (image.height * target_aspect, image.height)
    } else if image_aspect < target_aspect {
        (image.width, image.width / target_aspect)
    } else {
        (image.width, image.height)
    };
    Rect::new(
        (image.width - w) / 2.0,
        (image.height - h) / 2.0,
        (image.width + w) / 2.0,
        (image.height + h) / 2.0,
    )
}

fn display_center(display: Size) -> Point {
    Point::new(display.width / 2.0, display.height / 2.0)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mapper.rs"]
mod tests;
