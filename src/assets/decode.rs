use std::sync::Arc;

use anyhow::Context;

use crate::foundation::{
    core::{Canvas, Rgba8, Size},
    error::{FotobooError, FotobooResult},
    math::premultiply_rgba8_in_place,
};

/// Immutable decoded bitmap in premultiplied RGBA8.
///
/// Cloning is cheap; edits always produce a new image.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap premultiplied, row-major RGBA8 bytes.
    pub fn from_rgba8_premul(width: u32, height: u32, data: Vec<u8>) -> FotobooResult<Self> {
        if width == 0 || height == 0 {
            return Err(FotobooError::decode("image dimensions must be > 0"));
        }
        if data.len() != width as usize * height as usize * 4 {
            return Err(FotobooError::decode("image byte length mismatch"));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        })
    }

    /// Single-color image; handy for placeholders and capture fakes.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Self {
        let px = color.premultiplied();
        let len = width as usize * height as usize;
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn size(&self) -> Size {
        self.canvas().size()
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn rgba8_premul(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }

    /// Premultiplied RGBA of one pixel, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Encoded raster bytes plus the format they were sniffed or encoded as.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedImage {
    format: image::ImageFormat,
    bytes: Arc<Vec<u8>>,
}

impl EncodedImage {
    pub fn new(format: image::ImageFormat, bytes: Vec<u8>) -> Self {
        Self {
            format,
            bytes: Arc::new(bytes),
        }
    }

    /// Sniff the format from the bytes; `None` when they are not a supported raster image.
    pub fn sniff(bytes: Vec<u8>) -> Option<Self> {
        let format = sniff_image_format(&bytes)?;
        Some(Self::new(format, bytes))
    }

    pub fn format(&self) -> image::ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }

    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub(crate) fn shared_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }

    pub fn decode(&self) -> FotobooResult<SourceImage> {
        decode_image(self.bytes())
    }
}

/// Recognize a raster format from its magic bytes.
pub fn sniff_image_format(bytes: &[u8]) -> Option<image::ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> FotobooResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| FotobooError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    SourceImage::from_rgba8_premul(width, height, rgba8_premul)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
