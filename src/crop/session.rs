//! Interactive crop controller.
//!
//! One session crops one image. Pointer coordinates are in display space, the box the host shows
//! the cover-scaled image in. `commit` maps the region back to source pixels and renders the
//! fixed-size output.

use crate::{
    assets::{
        decode::{EncodedImage, SourceImage},
        encode::encode_jpeg,
    },
    config::settings::CropConfig,
    crop::region::{Corner, CropRegion},
    foundation::{
        core::{Affine, Line, Point, PointerKind, Rect, Size, Vec2},
        error::{FotobooError, FotobooResult},
        math::normalize_degrees,
    },
    geometry::mapper::{crop_output_transform, crop_to_source, preview_transform},
    render::cpu::Surface,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropState {
    Idle,
    Active,
    Done,
    Aborted,
}

/// Pointer cursor a host should show at a display position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Move,
    ResizeNwse,
    ResizeNesw,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Interaction {
    None,
    /// Pointer offset from the region origin at grab time.
    Drag { grab: Vec2 },
    /// `anchor` is the corner opposite `handle`; it never moves during the gesture.
    Resize { handle: Corner, anchor: Point },
}

#[derive(Debug)]
pub struct CropSession {
    config: CropConfig,
    state: CropState,
    display: Size,
    image: Option<SourceImage>,
    region: Option<CropRegion>,
    zoom: f64,
    rotation: f64,
    interaction: Interaction,
}

impl CropSession {
    pub fn new(config: CropConfig) -> Self {
        Self {
            config,
            state: CropState::Idle,
            display: Size::ZERO,
            image: None,
            region: None,
            zoom: 1.0,
            rotation: 0.0,
            interaction: Interaction::None,
        }
    }

    /// Load `image` into a display box of `display` size and center the initial region.
    ///
    /// Allowed from any state; a session that was in progress is replaced.
    pub fn begin(&mut self, image: SourceImage, display: Size) -> FotobooResult<()> {
        if !(display.width.is_finite() && display.height.is_finite())
            || display.width <= 0.0
            || display.height <= 0.0
        {
            return Err(FotobooError::validation(
                "crop display size must be finite and > 0",
            ));
        }

        let aspect = self.config.aspect;
        let width = (display.width * self.config.initial_width_fraction)
            .min(f64::from(image.width()))
            .min(display.height * aspect.value());

        self.region = Some(CropRegion::centered(display, width, aspect));
        self.display = display;
        self.image = Some(image);
        self.zoom = 1.0;
        self.rotation = 0.0;
        self.interaction = Interaction::None;
        self.state = CropState::Active;
        tracing::debug!(
            display_w = self.display.width,
            display_h = self.display.height,
            region_w = width,
            "crop session started"
        );
        Ok(())
    }

    /// Decode `encoded` fully, then [`CropSession::begin`].
    pub fn begin_encoded(&mut self, encoded: &EncodedImage, display: Size) -> FotobooResult<()> {
        let image = encoded.decode()?;
        self.begin(image, display)
    }

    pub fn state(&self) -> CropState {
        self.state
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn region(&self) -> Option<CropRegion> {
        self.region
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn display(&self) -> Size {
        self.display
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction != Interaction::None
    }

    /// Start a resize when `p` is on a corner handle, else a drag when `p` is inside the region.
    ///
    /// Returns whether a gesture started.
    pub fn pointer_down(&mut self, p: Point, kind: PointerKind) -> bool {
        let Some(region) = self.active_region() else {
            return false;
        };

        if let Some(handle) = region.handle_at(p, self.config.handle_tolerance(kind)) {
            self.interaction = Interaction::Resize {
                handle,
                anchor: region.corner(handle.opposite()),
            };
            return true;
        }
        if region.contains(p) {
            self.interaction = Interaction::Drag {
                grab: p - region.origin(),
            };
            return true;
        }
        false
    }

    /// Apply the current gesture; returns whether the region changed.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let Some(region) = self.active_region() else {
            return false;
        };

        match self.interaction {
            Interaction::None => false,
            Interaction::Drag { grab } => {
                let x = (p.x - grab.x)
                    .min(self.display.width - region.width)
                    .max(0.0);
                let y = (p.y - grab.y)
                    .min(self.display.height - region.height)
                    .max(0.0);
                let next = CropRegion { x, y, ..region };
                self.region = Some(next);
                next != region
            }
            Interaction::Resize { handle, anchor } => {
                let width = if handle.is_west() {
                    anchor.x - p.x
                } else {
                    p.x - anchor.x
                };
                let height = self.config.aspect.height_for(width);
                let next = CropRegion {
                    x: if handle.is_west() { anchor.x - width } else { anchor.x },
                    y: if handle.is_north() { anchor.y - height } else { anchor.y },
                    width,
                    height,
                };

                if width < self.config.min_size || height < self.config.min_size {
                    tracing::debug!(width, height, "resize rejected: below minimum size");
                    return false;
                }
                if !next.fits_within(self.display) {
                    tracing::debug!(?next, "resize rejected: outside display bounds");
                    return false;
                }
                self.region = Some(next);
                true
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.interaction = Interaction::None;
    }

    /// Add `delta` to the zoom, clamped to the configured range. Returns the new zoom.
    pub fn set_zoom(&mut self, delta: f64) -> f64 {
        if self.state == CropState::Active && delta.is_finite() {
            self.zoom = (self.zoom + delta).clamp(self.config.min_zoom, self.config.max_zoom);
        }
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(-self.config.zoom_step)
    }

    /// Rotate clockwise by a quarter turn, wrapping at 360.
    pub fn rotate(&mut self) -> f64 {
        self.set_rotation(self.rotation + 90.0)
    }

    pub fn set_rotation(&mut self, degrees: f64) -> f64 {
        if self.state == CropState::Active {
            self.rotation = normalize_degrees(degrees);
        }
        self.rotation
    }

    /// Place the region directly, e.g. from a saved request.
    pub fn set_region(&mut self, x: f64, y: f64, width: f64) -> FotobooResult<()> {
        if self.active_region().is_none() {
            return Err(FotobooError::validation("no image loaded for cropping"));
        }
        let next = CropRegion::with_width(x, y, width, self.config.aspect);
        if !(x.is_finite() && y.is_finite() && width.is_finite()) {
            return Err(FotobooError::validation("crop region must be finite"));
        }
        if next.width < self.config.min_size || next.height < self.config.min_size {
            return Err(FotobooError::validation(format!(
                "crop region must be at least {} px per side",
                self.config.min_size
            )));
        }
        if !next.fits_within(self.display) {
            return Err(FotobooError::validation(
                "crop region must stay inside the display",
            ));
        }
        self.region = Some(next);
        Ok(())
    }

    pub fn cursor_hint(&self, p: Point, kind: PointerKind) -> CursorHint {
        match self.interaction {
            Interaction::Drag { .. } => return CursorHint::Move,
            Interaction::Resize { handle, .. } => return resize_cursor(handle),
            Interaction::None => {}
        }
        let Some(region) = self.active_region() else {
            return CursorHint::Default;
        };
        if let Some(handle) = region.handle_at(p, self.config.handle_tolerance(kind)) {
            resize_cursor(handle)
        } else if region.contains(p) {
            CursorHint::Move
        } else {
            CursorHint::Default
        }
    }

    /// Darkened areas around the region: top, bottom, left, right.
    pub fn overlay_bands(&self) -> Option<[Rect; 4]> {
        let r = self.active_region()?;
        let (dw, dh) = (self.display.width, self.display.height);
        let bottom = r.y + r.height;
        let right = r.x + r.width;
        Some([
            Rect::new(0.0, 0.0, dw, r.y),
            Rect::new(0.0, bottom, dw, dh),
            Rect::new(0.0, r.y, r.x, bottom),
            Rect::new(right, r.y, dw, bottom),
        ])
    }

    /// Rule-of-thirds guides inside the region: two verticals, then two horizontals.
    pub fn grid_lines(&self) -> Option<[Line; 4]> {
        let r = self.active_region()?;
        let (x0, y0, x1, y1) = (r.x, r.y, r.x + r.width, r.y + r.height);
        let vx = |f: f64| r.x + r.width * f;
        let hy = |f: f64| r.y + r.height * f;
        Some([
            Line::new((vx(1.0 / 3.0), y0), (vx(1.0 / 3.0), y1)),
            Line::new((vx(2.0 / 3.0), y0), (vx(2.0 / 3.0), y1)),
            Line::new((x0, hy(1.0 / 3.0)), (x1, hy(1.0 / 3.0))),
            Line::new((x0, hy(2.0 / 3.0)), (x1, hy(2.0 / 3.0))),
        ])
    }

    /// Image-to-display transform for painting the preview.
    pub fn preview_transform(&self) -> Option<Affine> {
        let image = self.image.as_ref()?;
        self.active_region()?;
        Some(preview_transform(
            image.size(),
            self.display,
            self.zoom,
            self.rotation,
        ))
    }

    /// The source-pixel rectangle the region currently selects.
    pub fn source_rect(&self) -> Option<Rect> {
        let image = self.image.as_ref()?;
        let region = self.active_region()?;
        Some(crop_to_source(
            image.size(),
            self.display,
            region.rect(),
            self.zoom,
        ))
    }

    /// Render the output bitmap without finishing the session.
    ///
    /// `None` when no image is loaded.
    pub fn render_output(&self) -> FotobooResult<Option<SourceImage>> {
        let (Some(image), Some(src)) = (self.image.as_ref(), self.source_rect()) else {
            return Ok(None);
        };

        let out = Size::new(
            f64::from(self.config.output_width),
            f64::from(self.config.output_height),
        );
        let mut surface = Surface::new(self.config.output_width, self.config.output_height)?;
        surface.draw_image_region(
            image,
            src,
            Rect::from_origin_size(Point::ORIGIN, out),
            crop_output_transform(out, self.rotation),
        )?;
        surface.into_image().map(Some)
    }

    /// Render, encode as JPEG and finish the session.
    ///
    /// Returns `Ok(None)` without side effects when no image is loaded. On error the session
    /// stays active so the caller can retry.
    #[tracing::instrument(skip(self), fields(zoom = self.zoom, rotation = self.rotation))]
    pub fn commit(&mut self) -> FotobooResult<Option<EncodedImage>> {
        let Some(output) = self.render_output()? else {
            tracing::debug!(state = ?self.state, "commit ignored: session not ready");
            return Ok(None);
        };
        let encoded = encode_jpeg(&output, self.config.jpeg_quality)?;
        self.clear();
        self.state = CropState::Done;
        Ok(Some(encoded))
    }

    /// Drop the image and region; the session is left `Aborted`.
    pub fn cancel(&mut self) {
        self.clear();
        self.state = CropState::Aborted;
    }

    fn clear(&mut self) {
        self.image = None;
        self.region = None;
        self.zoom = 1.0;
        self.rotation = 0.0;
        self.interaction = Interaction::None;
    }

    fn active_region(&self) -> Option<CropRegion> {
        if self.state == CropState::Active {
            self.region
        } else {
            None
        }
    }
}

fn resize_cursor(handle: Corner) -> CursorHint {
    match handle {
        Corner::Nw | Corner::Se => CursorHint::ResizeNwse,
        Corner::Ne | Corner::Sw => CursorHint::ResizeNesw,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/session.rs"]
mod tests;
