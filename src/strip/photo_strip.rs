use crate::{
    assets::decode::EncodedImage,
    decor::layer::DecorationLayer,
    foundation::{
        core::Rgba8,
        error::{FotobooError, FotobooResult},
    },
};

/// Photos per strip.
pub const PHOTO_COUNT: usize = 4;

/// The user's final selection, top to bottom, plus its look.
#[derive(Clone, Debug)]
pub struct PhotoStrip {
    photos: Vec<EncodedImage>,
    background: Rgba8,
    decorations: DecorationLayer,
    custom: bool,
}

impl PhotoStrip {
    pub fn new(photos: Vec<EncodedImage>, background: Rgba8) -> FotobooResult<Self> {
        if photos.len() != PHOTO_COUNT {
            return Err(FotobooError::validation(format!(
                "Please select exactly {PHOTO_COUNT} photos"
            )));
        }
        Ok(Self {
            photos,
            background,
            decorations: DecorationLayer::new(),
            custom: false,
        })
    }

    pub fn photos(&self) -> &[EncodedImage] {
        &self.photos
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    pub fn set_background(&mut self, color: Rgba8) {
        self.background = color;
    }

    pub fn decorations(&self) -> &DecorationLayer {
        &self.decorations
    }

    pub fn decorations_mut(&mut self) -> &mut DecorationLayer {
        &mut self.decorations
    }

    pub fn set_decorations(&mut self, layer: DecorationLayer) {
        self.decorations = layer;
    }

    /// Whether the strip went through the decoration editor; only changes the export file name.
    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn set_custom(&mut self, custom: bool) {
        self.custom = custom;
    }
}
