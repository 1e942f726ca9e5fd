use super::*;
use crate::{
    assets::{decode::SourceImage, encode::encode_png},
    config::settings::FotobooConfig,
};

fn photos(n: usize) -> Vec<EncodedImage> {
    let png = encode_png(&SourceImage::solid(4, 4, Rgba8::WHITE)).unwrap();
    vec![png; n]
}

#[test]
fn job_snapshots_strip_and_config() {
    let config = FotobooConfig::default();
    let mut strip = PhotoStrip::new(photos(4), Rgba8::rgb(1, 2, 3)).unwrap();
    strip.set_custom(true);
    let id = strip.decorations_mut().add_sticker("🎉").unwrap();

    let job = RenderJob::from_strip(&strip, &config.strip, &config.export);
    strip.decorations_mut().move_to(id, 999.0, 999.0);
    strip.set_background(Rgba8::BLACK);

    assert_eq!(job.background, Rgba8::rgb(1, 2, 3));
    assert_eq!(job.elements.len(), 1);
    assert_eq!(job.elements[0].position().x, 50.0);
    assert!(job.custom);
    assert_eq!(job.scale, 5.0);
    assert_eq!(job.decode_timeout, std::time::Duration::from_millis(10_000));
    job.validate().unwrap();
}

#[test]
fn validate_rejects_bad_scale() {
    let config = FotobooConfig::default();
    let strip = PhotoStrip::new(photos(4), Rgba8::WHITE).unwrap();
    let mut job = RenderJob::from_strip(&strip, &config.strip, &config.export);
    job.scale = f64::NAN;
    assert!(job.validate().unwrap_err().is_validation());
    job.scale = 0.0;
    assert!(job.validate().is_err());
}

#[test]
fn strip_requires_exactly_four_photos() {
    let err = PhotoStrip::new(photos(3), Rgba8::WHITE).unwrap_err();
    assert_eq!(err.to_string(), "validation error: Please select exactly 4 photos");
    assert!(PhotoStrip::new(photos(5), Rgba8::WHITE).is_err());
}

#[test]
fn watermark_defaults_match_brand() {
    let mark = Watermark::default();
    assert!(mark.enabled);
    assert_eq!(mark.text, "Fotoboo");
    assert_eq!(mark.color.to_hex(), "#9333ea");
}
