use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::{
        core::{AspectRatio, PointerKind, Rgba8},
        error::{FotobooError, FotobooResult},
    },
    strip::{
        job::{DecodeFailurePolicy, Watermark},
        layout::StripLayout,
    },
};

/// Every tunable of the pipeline, loaded from JSON with all fields defaulted.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FotobooConfig {
    pub crop: CropConfig,
    pub strip: StripConfig,
    pub export: ExportConfig,
    pub capture: CaptureConfig,
    pub fonts: FontConfig,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub aspect: AspectRatio,
    pub output_width: u32,
    pub output_height: u32,
    pub jpeg_quality: u8,
    /// Smallest allowed crop side, in display pixels.
    pub min_size: f64,
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub mouse_handle_tolerance: f64,
    pub touch_handle_tolerance: f64,
    /// Initial region width as a fraction of the display width.
    pub initial_width_fraction: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            aspect: AspectRatio::WIDESCREEN,
            output_width: 1920,
            output_height: 1080,
            jpeg_quality: 98,
            min_size: 50.0,
            zoom_step: 0.1,
            min_zoom: 0.1,
            max_zoom: 3.0,
            mouse_handle_tolerance: 20.0,
            touch_handle_tolerance: 40.0,
            initial_width_fraction: 0.8,
        }
    }
}

impl CropConfig {
    pub fn handle_tolerance(&self, kind: PointerKind) -> f64 {
        match kind {
            PointerKind::Mouse => self.mouse_handle_tolerance,
            PointerKind::Touch => self.touch_handle_tolerance,
        }
    }

    pub fn validate(&self) -> FotobooResult<()> {
        self.aspect.validate()?;
        if self.output_width == 0 || self.output_height == 0 {
            return Err(FotobooError::validation("crop output size must be > 0"));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(FotobooError::validation(
                "crop jpeg_quality must be in 1..=100",
            ));
        }
        for (name, v) in [
            ("min_size", self.min_size),
            ("zoom_step", self.zoom_step),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("mouse_handle_tolerance", self.mouse_handle_tolerance),
            ("touch_handle_tolerance", self.touch_handle_tolerance),
            ("initial_width_fraction", self.initial_width_fraction),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FotobooError::validation(format!(
                    "crop {name} must be finite and > 0"
                )));
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(FotobooError::validation("crop min_zoom must be <= max_zoom"));
        }
        if self.initial_width_fraction > 1.0 {
            return Err(FotobooError::validation(
                "crop initial_width_fraction must be <= 1",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StripConfig {
    pub layout: StripLayout,
    /// Export pixels per preview unit.
    pub export_scale: f64,
    pub background: Rgba8,
    pub watermark: Watermark,
    /// Font stack used for sticker glyphs.
    pub sticker_font: String,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            layout: StripLayout::default(),
            export_scale: 5.0,
            background: Rgba8::WHITE,
            watermark: Watermark::default(),
            sticker_font: "Noto Color Emoji, Apple Color Emoji, sans-serif".to_string(),
        }
    }
}

impl StripConfig {
    pub fn validate(&self) -> FotobooResult<()> {
        self.layout.validate()?;
        if !self.export_scale.is_finite() || self.export_scale <= 0.0 {
            return Err(FotobooError::validation(
                "strip export_scale must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_prefix: String,
    pub decode_timeout_ms: u64,
    pub decode_failure: DecodeFailurePolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "fotoboo".to_string(),
            decode_timeout_ms: 10_000,
            decode_failure: DecodeFailurePolicy::Abort,
        }
    }
}

impl ExportConfig {
    pub fn decode_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.decode_timeout_ms)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub shots: usize,
    pub countdown_secs: u32,
    pub settle_ms: u64,
    pub output_width: u32,
    pub output_height: u32,
    pub mirror: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            ideal_width: 640,
            ideal_height: 480,
            shots: 4,
            countdown_secs: 7,
            settle_ms: 2_000,
            output_width: 1920,
            output_height: 1080,
            mirror: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Directories scanned (non-recursively) for extra font files.
    pub dirs: Vec<PathBuf>,
    /// Skip the system font database entirely.
    pub skip_system_fonts: bool,
}

impl FotobooConfig {
    /// Read a JSON config file, then apply environment overrides and validate.
    pub fn load(path: &Path) -> FotobooResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&text)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> FotobooResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// `FOTOBOO_DECODE_TIMEOUT_MS`, `FOTOBOO_EXPORT_SCALE` and `FOTOBOO_FONT_DIR`.
    ///
    /// Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(ms) = var("FOTOBOO_DECODE_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
        {
            self.export.decode_timeout_ms = ms;
        }
        if let Some(scale) = var("FOTOBOO_EXPORT_SCALE")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s > 0.0)
        {
            self.strip.export_scale = scale;
        }
        if let Some(dir) = var("FOTOBOO_FONT_DIR").filter(|d| !d.is_empty()) {
            let dir = PathBuf::from(dir);
            if !self.fonts.dirs.contains(&dir) {
                self.fonts.dirs.push(dir);
            }
        }
    }

    pub fn validate(&self) -> FotobooResult<()> {
        self.crop.validate()?;
        self.strip.validate()?;
        if self.export.decode_timeout_ms == 0 {
            return Err(FotobooError::validation(
                "export decode_timeout_ms must be > 0",
            ));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(FotobooError::validation(
                "export file_prefix must be non-empty",
            ));
        }
        if self.capture.shots == 0 {
            return Err(FotobooError::validation("capture shots must be > 0"));
        }
        if self.capture.output_width == 0 || self.capture.output_height == 0 {
            return Err(FotobooError::validation("capture output size must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
