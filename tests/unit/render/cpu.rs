use super::*;

fn two_tone() -> SourceImage {
    // Left pixel red, right pixel blue.
    SourceImage::from_rgba8_premul(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap()
}

#[test]
fn oversized_or_empty_surfaces_are_rejected() {
    assert!(Surface::new(70_000, 10).is_err());
    assert!(Surface::new(10, 70_000).is_err());
    assert!(Surface::new(0, 10).is_err());
    let s = Surface::new(2000, 4650).unwrap();
    assert_eq!((s.width(), s.height()), (2000, 4650));
}

#[test]
fn fill_paints_every_pixel() {
    let mut s = Surface::new(8, 4).unwrap();
    s.fill(Rgba8::rgb(0xfe, 0xf3, 0xc7));
    let img = s.into_image().unwrap();
    assert_eq!(img.pixel(0, 0), Some([0xfe, 0xf3, 0xc7, 255]));
    assert_eq!(img.pixel(7, 3), Some([0xfe, 0xf3, 0xc7, 255]));
}

#[test]
fn image_lands_in_destination_only() {
    let mut s = Surface::new(20, 10).unwrap();
    s.fill(Rgba8::WHITE);
    let red = SourceImage::solid(4, 4, Rgba8::rgb(255, 0, 0));
    s.draw_image_region(
        &red,
        Rect::new(0.0, 0.0, 4.0, 4.0),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Affine::IDENTITY,
    )
    .unwrap();
    let img = s.into_image().unwrap();
    assert_eq!(img.pixel(5, 5), Some([255, 0, 0, 255]));
    assert_eq!(img.pixel(15, 5), Some([255, 255, 255, 255]));
}

#[test]
fn source_region_selects_pixels() {
    let mut s = Surface::new(10, 10).unwrap();
    s.fill(Rgba8::WHITE);
    s.draw_image_region(
        &two_tone(),
        Rect::new(1.0, 0.0, 2.0, 1.0),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Affine::IDENTITY,
    )
    .unwrap();
    let img = s.into_image().unwrap();
    assert_eq!(img.pixel(5, 5), Some([0, 0, 255, 255]));
}

#[test]
fn extra_transform_applies_after_placement() {
    let mut s = Surface::new(20, 10).unwrap();
    s.fill(Rgba8::WHITE);
    let red = SourceImage::solid(2, 2, Rgba8::rgb(255, 0, 0));
    s.draw_image_region(
        &red,
        Rect::new(0.0, 0.0, 2.0, 2.0),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Affine::translate((10.0, 0.0)),
    )
    .unwrap();
    let img = s.into_image().unwrap();
    assert_eq!(img.pixel(5, 5), Some([255, 255, 255, 255]));
    assert_eq!(img.pixel(15, 5), Some([255, 0, 0, 255]));
}

#[test]
fn region_outside_image_draws_nothing() {
    let mut s = Surface::new(4, 4).unwrap();
    s.fill(Rgba8::BLACK);
    let red = SourceImage::solid(2, 2, Rgba8::rgb(255, 0, 0));
    s.draw_image_region(
        &red,
        Rect::new(5.0, 5.0, 7.0, 7.0),
        Rect::new(0.0, 0.0, 4.0, 4.0),
        Affine::IDENTITY,
    )
    .unwrap();
    assert_eq!(s.into_image().unwrap().pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn degenerate_source_region_is_an_error() {
    let mut s = Surface::new(4, 4).unwrap();
    let red = SourceImage::solid(2, 2, Rgba8::rgb(255, 0, 0));
    let err = s
        .draw_image_region(
            &red,
            Rect::new(1.0, 1.0, 1.0, 2.0),
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Affine::IDENTITY,
        )
        .unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}
