//! Strip rasterization.
//!
//! Photos are cover-fitted into their slots, decorations are drawn on top in insertion order and
//! the watermark goes last. Every length comes from [`StripLayout`] times the job's scale, the
//! same numbers the preview uses at scale 1.

use std::time::Duration;

use crate::{
    assets::{
        decode::SourceImage,
        fonts::FontBook,
        join::{SlotOutcome, join_decodes},
        text::{TextBrushRgba8, TextLayout, TextLayoutEngine},
    },
    config::settings::FontConfig,
    decor::element::{DecorationElement, ElementId},
    foundation::{
        core::{Affine, Rgba8, Size, Vec2},
        error::{FotobooError, FotobooResult},
    },
    geometry::mapper::cover_fit_source_rect,
    render::cpu::Surface,
    strip::{
        job::{DecodeFailurePolicy, RenderJob},
        layout::StripLayout,
    },
};

/// What an export could not draw.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ExportReport {
    /// `(slot, reason)` for photos left blank under [`DecodeFailurePolicy::SkipSlot`].
    pub failed_slots: Vec<(usize, String)>,
    /// Decorations that were not drawn, with the reason.
    pub skipped_elements: Vec<(ElementId, String)>,
    pub watermark_drawn: bool,
    #[serde(skip)]
    pub decode_elapsed: Duration,
}

impl ExportReport {
    /// True when everything in the job made it into the image.
    pub fn is_clean(&self) -> bool {
        self.failed_slots.is_empty() && self.skipped_elements.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct StripRender {
    pub image: SourceImage,
    pub report: ExportReport,
}

pub struct StripCompositor {
    fonts: FontBook,
    text: TextLayoutEngine,
}

impl std::fmt::Debug for StripCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripCompositor")
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl StripCompositor {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            fonts,
            text: TextLayoutEngine::new(),
        }
    }

    /// Load fonts as configured: system fonts unless disabled, plus extra directories.
    pub fn from_font_config(config: &FontConfig) -> Self {
        let fonts = if config.skip_system_fonts {
            let mut book = FontBook::empty();
            for dir in &config.dirs {
                book.load_dir(dir);
            }
            book
        } else {
            FontBook::with_system_fonts(&config.dirs)
        };
        Self::new(fonts)
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    #[tracing::instrument(
        skip(self, job),
        fields(photos = job.photos.len(), elements = job.elements.len(), scale = job.scale)
    )]
    pub fn render(&mut self, job: &RenderJob) -> FotobooResult<StripRender> {
        job.validate()?;

        let layout = &job.layout;
        let canvas = layout.export_canvas(job.scale);
        let mut surface = Surface::new(canvas.width, canvas.height)?;
        surface.fill(job.background);

        let join = join_decodes(&job.photos, job.decode_timeout);
        let mut report = ExportReport {
            decode_elapsed: join.elapsed(),
            ..ExportReport::default()
        };

        let failures = join.failures();
        if !failures.is_empty() {
            match job.decode_failure {
                DecodeFailurePolicy::Abort => {
                    let detail = failures
                        .iter()
                        .map(|(slot, reason)| format!("photo {}: {reason}", slot + 1))
                        .collect::<Vec<_>>()
                        .join("; ");
                    return Err(FotobooError::render(format!(
                        "{} of {} photos could not be loaded ({detail})",
                        failures.len(),
                        job.photos.len()
                    )));
                }
                DecodeFailurePolicy::SkipSlot => {
                    tracing::warn!(failed = failures.len(), "exporting with blank photo slots");
                    report.failed_slots = failures;
                }
            }
        }

        for (slot, outcome) in join.into_outcomes().into_iter().enumerate() {
            let SlotOutcome::Decoded(photo) = outcome else {
                continue;
            };
            draw_photo(&mut surface, layout, slot, &photo, job.scale)?;
        }

        for element in &job.elements {
            if let Err(reason) = self.draw_element(&mut surface, job, element) {
                tracing::warn!(id = %element.id(), %reason, "decoration skipped");
                report.skipped_elements.push((element.id(), reason));
            }
        }

        report.watermark_drawn = self.draw_watermark(&mut surface, job);

        let image = surface.into_image()?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            clean = report.is_clean(),
            "strip rendered"
        );
        Ok(StripRender { image, report })
    }

    fn draw_element(
        &mut self,
        surface: &mut Surface,
        job: &RenderJob,
        element: &DecorationElement,
    ) -> Result<(), String> {
        let (font_id, brush) = match element {
            DecorationElement::Text(t) => (t.font.as_str(), TextBrushRgba8::from(t.color)),
            DecorationElement::Sticker(_) => {
                (job.sticker_font.as_str(), TextBrushRgba8::from(Rgba8::BLACK))
            }
        };
        let text = self.shape(element.content(), font_id, element.size() * job.scale, brush)?;

        let anchor = job.layout.element_anchor(element.position(), job.scale);
        let extent = Size::new(text.width(), text.height());
        surface.draw_text(&text, element_transform(extent, anchor.to_vec2(), element.rotation()));
        Ok(())
    }

    fn draw_watermark(&mut self, surface: &mut Surface, job: &RenderJob) -> bool {
        let mark = &job.watermark;
        if !mark.enabled || mark.text.trim().is_empty() {
            return false;
        }
        let size = job.layout.watermark_size * job.scale;
        let text = match self.shape(&mark.text, &mark.font, size, mark.color.into()) {
            Ok(text) => text,
            Err(reason) => {
                tracing::warn!(%reason, "watermark skipped");
                return false;
            }
        };

        let baseline = job.layout.watermark_baseline(job.scale);
        surface.draw_text(
            &text,
            Affine::translate((baseline.x - text.width() / 2.0, baseline.y - text.baseline())),
        );
        true
    }

    fn shape(
        &mut self,
        content: &str,
        font_id: &str,
        size_px: f64,
        brush: TextBrushRgba8,
    ) -> Result<TextLayout, String> {
        let font = self
            .fonts
            .resolve(font_id)
            .ok_or_else(|| format!("no font available for '{font_id}'"))?;
        self.text
            .layout_line(content, &font, size_px as f32, brush)
            .map_err(|e| e.to_string())
    }
}

fn draw_photo(
    surface: &mut Surface,
    layout: &StripLayout,
    slot: usize,
    photo: &SourceImage,
    scale: f64,
) -> FotobooResult<()> {
    let src = cover_fit_source_rect(photo.size(), layout.slot_aspect.value());
    let dst = layout.scaled_slot_rect(slot, scale);
    surface.draw_image_region(photo, src, dst, Affine::IDENTITY)
}

/// Place a shaped element with its top-left at `anchor`, rotated about its own center.
pub(crate) fn element_transform(extent: Size, anchor: Vec2, rotation_deg: f64) -> Affine {
    let center = Vec2::new(extent.width / 2.0, extent.height / 2.0);
    Affine::translate(anchor)
        * Affine::translate(center)
        * Affine::rotate(rotation_deg.to_radians())
        * Affine::translate(-center)
}

#[cfg(test)]
#[path = "../../tests/unit/strip/compositor.rs"]
mod tests;
