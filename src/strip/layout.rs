//! The single layout contract shared by the interactive preview and the exported strip.
//!
//! All lengths are in preview units. The export multiplies every length by one scale factor,
//! so a decoration placed at `(x, y)` in the preview lands at exactly the same spot relative to
//! the photos in the exported image.

use crate::{
    foundation::{
        core::{AspectRatio, Canvas, Point, Rect, Size},
        error::{FotobooError, FotobooResult},
    },
    strip::photo_strip::PHOTO_COUNT,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StripLayout {
    /// Full strip width, padding included.
    pub strip_width: f64,
    /// Outer padding on the top, left and right edges; also the offset of the content origin.
    pub padding: f64,
    /// Vertical gap between consecutive photo slots.
    pub gap: f64,
    /// Aspect ratio of every photo slot.
    pub slot_aspect: AspectRatio,
    /// Band below the last slot, reserved for the watermark.
    pub bottom_band: f64,
    /// Distance from the bottom edge to the watermark baseline.
    pub watermark_baseline_offset: f64,
    pub watermark_size: f64,
    pub photo_count: usize,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            strip_width: 400.0,
            padding: 30.0,
            gap: 15.0,
            slot_aspect: AspectRatio::WIDESCREEN,
            bottom_band: 60.0,
            watermark_baseline_offset: 25.0,
            watermark_size: 28.0,
            photo_count: PHOTO_COUNT,
        }
    }
}

impl StripLayout {
    pub fn validate(&self) -> FotobooResult<()> {
        for (name, v) in [
            ("strip_width", self.strip_width),
            ("padding", self.padding),
            ("gap", self.gap),
            ("bottom_band", self.bottom_band),
            ("watermark_baseline_offset", self.watermark_baseline_offset),
            ("watermark_size", self.watermark_size),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FotobooError::validation(format!(
                    "strip layout {name} must be finite and >= 0"
                )));
            }
        }
        self.slot_aspect.validate()?;
        if self.slot_width() <= 0.0 {
            return Err(FotobooError::validation(
                "strip layout padding leaves no room for photos",
            ));
        }
        if self.photo_count != PHOTO_COUNT {
            return Err(FotobooError::validation(format!(
                "strip layout photo_count must be {PHOTO_COUNT}"
            )));
        }
        Ok(())
    }

    pub fn slot_width(&self) -> f64 {
        self.strip_width - self.padding * 2.0
    }

    pub fn slot_height(&self) -> f64 {
        self.slot_aspect.height_for(self.slot_width())
    }

    pub fn strip_height(&self) -> f64 {
        let n = self.photo_count as f64;
        self.padding * 2.0
            + self.slot_height() * n
            + self.gap * (n - 1.0).max(0.0)
            + self.bottom_band
    }

    pub fn preview_size(&self) -> Size {
        Size::new(self.strip_width, self.strip_height())
    }

    /// Top-left of the padded content area; decoration coordinates are relative to it.
    pub fn content_origin(&self) -> Point {
        Point::new(self.padding, self.padding)
    }

    /// Slot rectangle in preview units.
    pub fn slot_rect(&self, index: usize) -> Rect {
        let y = self.padding + index as f64 * (self.slot_height() + self.gap);
        Rect::from_origin_size(
            Point::new(self.padding, y),
            Size::new(self.slot_width(), self.slot_height()),
        )
    }

    /// Slot rectangle in export pixels.
    pub fn scaled_slot_rect(&self, index: usize, scale: f64) -> Rect {
        scale_rect(self.slot_rect(index), scale)
    }

    /// Pixel size of the exported strip.
    pub fn export_canvas(&self, scale: f64) -> Canvas {
        Canvas::new(
            (self.strip_width * scale).round() as u32,
            (self.strip_height() * scale).round() as u32,
        )
    }

    /// Map a decoration position (content coordinates, preview units) to export pixels.
    pub fn element_anchor(&self, position: Point, scale: f64) -> Point {
        let origin = self.content_origin();
        Point::new(
            (origin.x + position.x) * scale,
            (origin.y + position.y) * scale,
        )
    }

    /// Horizontally centered baseline point of the watermark, in export pixels.
    pub fn watermark_baseline(&self, scale: f64) -> Point {
        Point::new(
            self.strip_width / 2.0 * scale,
            (self.strip_height() - self.watermark_baseline_offset) * scale,
        )
    }
}

fn scale_rect(r: Rect, scale: f64) -> Rect {
    Rect::new(r.x0 * scale, r.y0 * scale, r.x1 * scale, r.y1 * scale)
}

#[cfg(test)]
#[path = "../../tests/unit/strip/layout.rs"]
mod tests;
