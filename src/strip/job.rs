use std::time::Duration;

use crate::{
    assets::decode::EncodedImage,
    config::settings::{ExportConfig, StripConfig},
    decor::element::DecorationElement,
    foundation::{
        core::Rgba8,
        error::{FotobooError, FotobooResult},
    },
    strip::{layout::StripLayout, photo_strip::PhotoStrip},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Watermark {
    pub enabled: bool,
    pub text: String,
    pub color: Rgba8,
    pub font: String,
}

impl Default for Watermark {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "Fotoboo".to_string(),
            color: Rgba8::rgb(0x93, 0x33, 0xea),
            font: "Pacifico, cursive".to_string(),
        }
    }
}

/// What an export does when some photos cannot be decoded in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeFailurePolicy {
    /// Fail the export and name every failed slot.
    #[default]
    Abort,
    /// Leave failed slots showing the background and report them.
    SkipSlot,
}

/// Everything one export reads, captured when the export starts.
///
/// Later edits to the strip or its decorations never reach a job already built.
#[derive(Clone, Debug)]
pub struct RenderJob {
    pub photos: Vec<EncodedImage>,
    pub background: Rgba8,
    pub elements: Vec<DecorationElement>,
    pub layout: StripLayout,
    /// Export pixels per preview unit.
    pub scale: f64,
    pub watermark: Watermark,
    pub sticker_font: String,
    pub decode_timeout: Duration,
    pub decode_failure: DecodeFailurePolicy,
    /// Built from the decoration editor rather than the plain strip.
    pub custom: bool,
}

impl RenderJob {
    pub fn from_strip(strip: &PhotoStrip, config: &StripConfig, export: &ExportConfig) -> Self {
        Self {
            photos: strip.photos().to_vec(),
            background: strip.background(),
            elements: strip.decorations().snapshot(),
            layout: config.layout,
            scale: config.export_scale,
            watermark: config.watermark.clone(),
            sticker_font: config.sticker_font.clone(),
            decode_timeout: export.decode_timeout(),
            decode_failure: export.decode_failure,
            custom: strip.is_custom(),
        }
    }

    pub fn validate(&self) -> FotobooResult<()> {
        self.layout.validate()?;
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(FotobooError::validation(
                "export scale must be finite and > 0",
            ));
        }
        if self.photos.len() != self.layout.photo_count {
            return Err(FotobooError::validation(format!(
                "a strip needs exactly {} photos, got {}",
                self.layout.photo_count,
                self.photos.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip/job.rs"]
mod tests;
