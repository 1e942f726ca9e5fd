//! JSON documents read by the command-line tool.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    assets::decode::{EncodedImage, SourceImage},
    config::settings::CropConfig,
    crop::session::CropSession,
    decor::{element::DecorationElement, layer::DecorationLayer},
    foundation::{
        core::{Point, PointerKind, Rgba8, Size},
        error::{FotobooError, FotobooResult},
    },
    strip::photo_strip::{PHOTO_COUNT, PhotoStrip},
};

/// A strip described on disk: photo files, background and decorations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StripProject {
    /// Photo files relative to the project file, top to bottom.
    pub photos: Vec<String>,
    #[serde(default = "default_background")]
    pub background: Rgba8,
    #[serde(default)]
    pub decorations: Vec<DecorationElement>,
    /// Export under the decorated-strip file name.
    #[serde(default)]
    pub custom: bool,
}

fn default_background() -> Rgba8 {
    Rgba8::WHITE
}

impl StripProject {
    pub fn from_json(json: &str) -> FotobooResult<Self> {
        serde_json::from_str(json).map_err(|e| FotobooError::serde(format!("strip project: {e}")))
    }

    pub fn load(path: &Path) -> FotobooResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read project '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> FotobooResult<()> {
        if self.photos.len() != PHOTO_COUNT {
            return Err(FotobooError::validation(format!(
                "Please select exactly {PHOTO_COUNT} photos"
            )));
        }
        for photo in &self.photos {
            normalize_rel_path(photo)?;
        }
        for element in &self.decorations {
            if element.content().trim().is_empty() {
                return Err(FotobooError::validation(format!(
                    "{}: Please enter some text",
                    element.id()
                )));
            }
            if !element.size().is_finite() || element.size() <= 0.0 {
                return Err(FotobooError::validation(format!(
                    "{}: size must be finite and > 0",
                    element.id()
                )));
            }
            let p = element.position();
            if !(p.x.is_finite() && p.y.is_finite() && element.rotation().is_finite()) {
                return Err(FotobooError::validation(format!(
                    "{}: position and rotation must be finite",
                    element.id()
                )));
            }
        }
        DecorationLayer::from_elements(self.decorations.clone())?;
        Ok(())
    }

    /// Read the photos from `root` and build the strip.
    pub fn into_strip(&self, root: &Path) -> FotobooResult<PhotoStrip> {
        self.validate()?;

        let mut photos = Vec::with_capacity(self.photos.len());
        for rel in &self.photos {
            let path = root.join(normalize_rel_path(rel)?);
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read photo '{}'", path.display()))?;
            let image = EncodedImage::sniff(bytes).ok_or_else(|| {
                FotobooError::validation(format!("'{rel}' is not a supported image"))
            })?;
            photos.push(image);
        }

        let mut strip = PhotoStrip::new(photos, self.background)?;
        strip.set_decorations(DecorationLayer::from_elements(self.decorations.clone())?);
        strip.set_custom(self.custom);
        Ok(strip)
    }
}

/// Normalize a project-relative path; absolute paths and `..` are rejected.
pub fn normalize_rel_path(source: &str) -> FotobooResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(FotobooError::validation("photo paths must be relative"));
    }
    if s.is_empty() {
        return Err(FotobooError::validation("photo path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(FotobooError::validation("photo paths must not contain '..'"));
        }
        out.push(part);
    }
    if out.is_empty() {
        return Err(FotobooError::validation("photo path must contain a file name"));
    }
    Ok(out.join("/"))
}

/// Initial crop placement, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// One recorded pointer event.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PointerStep {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        kind: PointerKind,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up,
}

/// A scripted crop: where the image is shown and what the user did to the region.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRequest {
    pub display: Size,
    #[serde(default)]
    pub region: Option<RegionPlacement>,
    #[serde(default)]
    pub pointer: Vec<PointerStep>,
    /// Zoom button presses; negative values zoom out.
    #[serde(default)]
    pub zoom_steps: i32,
    /// Quarter turns clockwise.
    #[serde(default)]
    pub rotations: u32,
}

impl CropRequest {
    pub fn from_json(json: &str) -> FotobooResult<Self> {
        serde_json::from_str(json).map_err(|e| FotobooError::serde(format!("crop request: {e}")))
    }

    pub fn load(path: &Path) -> FotobooResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read crop request '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Replay the request on a session that has already begun.
    pub fn apply(&self, session: &mut CropSession) -> FotobooResult<()> {
        if let Some(region) = self.region {
            session.set_region(region.x, region.y, region.width)?;
        }
        for step in &self.pointer {
            match *step {
                PointerStep::Down { x, y, kind } => {
                    session.pointer_down(Point::new(x, y), kind);
                }
                PointerStep::Move { x, y } => {
                    session.pointer_move(Point::new(x, y));
                }
                PointerStep::Up => session.pointer_up(),
            }
        }
        for _ in 0..self.zoom_steps.unsigned_abs() {
            if self.zoom_steps > 0 {
                session.zoom_in();
            } else {
                session.zoom_out();
            }
        }
        for _ in 0..self.rotations % 4 {
            session.rotate();
        }
        Ok(())
    }

    /// Crop `image` as scripted and return the encoded output.
    pub fn run(&self, image: SourceImage, config: CropConfig) -> FotobooResult<EncodedImage> {
        let mut session = CropSession::new(config);
        session.begin(image, self.display)?;
        self.apply(&mut session)?;
        session
            .commit()?
            .ok_or_else(|| FotobooError::render("crop session had no image to commit"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
