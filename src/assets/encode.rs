use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::decode::{EncodedImage, SourceImage},
    foundation::{error::FotobooResult, math::unpremultiply_rgba8_in_place},
};

/// Encode as baseline JPEG at `quality` (1..=100).
///
/// JPEG has no alpha channel: transparent areas come out black, the way a canvas JPEG export
/// composites over black. Premultiplied color channels are exactly that composite.
pub fn encode_jpeg(image: &SourceImage, quality: u8) -> FotobooResult<EncodedImage> {
    let mut rgb = Vec::with_capacity(image.width() as usize * image.height() as usize * 3);
    for px in image.rgba8_premul().chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut buf = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .encode(
            &rgb,
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .context("encode jpeg")?;

    Ok(EncodedImage::new(image::ImageFormat::Jpeg, buf))
}

/// Encode as lossless PNG with straight alpha.
pub fn encode_png(image: &SourceImage) -> FotobooResult<EncodedImage> {
    let mut straight = image.rgba8_premul().to_vec();
    unpremultiply_rgba8_in_place(&mut straight);

    let rgba = image::RgbaImage::from_raw(image.width(), image.height(), straight)
        .context("wrap rgba buffer for png")?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;

    Ok(EncodedImage::new(image::ImageFormat::Png, buf))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
