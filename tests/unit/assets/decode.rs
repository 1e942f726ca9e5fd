use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.width(), 1);
    assert_eq!(decoded.height(), 1);
    assert_eq!(
        decoded.rgba8_premul(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rejects_non_images() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(err.to_string().contains("decode error:"));
}

#[test]
fn sniffing_recognizes_png_only_for_png_bytes() {
    let buf = png_bytes(2, 1, vec![0; 8]);
    let encoded = EncodedImage::sniff(buf).unwrap();
    assert_eq!(encoded.format(), image::ImageFormat::Png);
    assert_eq!(encoded.mime_type(), "image/png");
    assert_eq!(encoded.extension(), "png");
    assert!(EncodedImage::sniff(b"hello".to_vec()).is_none());
}

#[test]
fn solid_and_pixel_access() {
    let img = SourceImage::solid(3, 2, Rgba8::rgb(10, 20, 30));
    assert_eq!(img.pixel(2, 1), Some([10, 20, 30, 255]));
    assert_eq!(img.pixel(3, 0), None);
    assert!((img.aspect() - 1.5).abs() < 1e-12);
}

#[test]
fn from_parts_validates_length() {
    assert!(SourceImage::from_rgba8_premul(2, 2, vec![0; 15]).is_err());
    assert!(SourceImage::from_rgba8_premul(0, 2, vec![]).is_err());
    assert!(SourceImage::from_rgba8_premul(2, 2, vec![0; 16]).is_ok());
}
