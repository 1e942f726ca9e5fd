use super::*;

const EPS: f64 = 1e-9;

fn assert_rect_eq(a: Rect, b: Rect) {
    assert!(
        (a.x0 - b.x0).abs() < EPS
            && (a.y0 - b.y0).abs() < EPS
            && (a.x1 - b.x1).abs() < EPS
            && (a.y1 - b.y1).abs() < EPS,
        "{a:?} != {b:?}"
    );
}

#[test]
fn cover_scale_fills_both_axes() {
    let s = cover_scale(Size::new(4000.0, 3000.0), Size::new(800.0, 450.0));
    assert!((s - 0.2).abs() < EPS);
    assert!(4000.0 * s >= 800.0 - EPS && 3000.0 * s >= 450.0 - EPS);

    let s = cover_scale(Size::new(100.0, 400.0), Size::new(800.0, 450.0));
    assert!((s - 8.0).abs() < EPS);
}

#[test]
fn centered_crop_maps_around_image_center() {
    let image = Size::new(4000.0, 3000.0);
    let display = Size::new(800.0, 450.0);
    let crop = Rect::from_center_size((400.0, 225.0), (640.0, 360.0));

    let src = crop_to_source(image, display, crop, 1.0);
    assert_rect_eq(src, Rect::new(400.0, 600.0, 3600.0, 2400.0));
    assert!((src.width() / src.height() - 16.0 / 9.0).abs() < EPS);
}

#[test]
fn zoom_shrinks_the_source_window() {
    let image = Size::new(4000.0, 3000.0);
    let display = Size::new(800.0, 450.0);
    let crop = Rect::from_center_size((400.0, 225.0), (640.0, 360.0));

    let src = crop_to_source(image, display, crop, 2.0);
    assert!((src.width() - 1600.0).abs() < EPS);
    assert!((src.center().x - 2000.0).abs() < EPS);
}

#[test]
fn offset_crop_moves_by_offset_over_scale() {
    let image = Size::new(4000.0, 3000.0);
    let display = Size::new(800.0, 450.0);
    let crop = Rect::new(0.0, 0.0, 160.0, 90.0);

    let src = crop_to_source(image, display, crop, 1.0);
    // Crop center is (-320, -180) from the display center; scale 0.2.
    assert!((src.center().x - (2000.0 - 1600.0)).abs() < EPS);
    assert!((src.center().y - (1500.0 - 900.0)).abs() < EPS);
}

#[test]
fn tiny_sources_are_not_rejected() {
    let src = crop_to_source(
        Size::new(16.0, 9.0),
        Size::new(800.0, 450.0),
        Rect::new(0.0, 0.0, 800.0, 450.0),
        3.0,
    );
    assert!(src.width() > 0.0 && src.width() < 16.0);
}

#[test]
fn cover_fit_crops_the_long_axis_centered() {
    assert_rect_eq(
        cover_fit_source_rect(Size::new(4000.0, 3000.0), 16.0 / 9.0),
        Rect::new(0.0, 375.0, 4000.0, 2625.0),
    );
    assert_rect_eq(
        cover_fit_source_rect(Size::new(3000.0, 1000.0), 16.0 / 9.0),
        Rect::new(611.111_111_111_111_1, 0.0, 2388.888_888_888_889, 1000.0),
    );
}

#[test]
fn cover_fit_is_identity_for_matching_aspect() {
    assert_rect_eq(
        cover_fit_source_rect(Size::new(1920.0, 1080.0), 16.0 / 9.0),
        Rect::new(0.0, 0.0, 1920.0, 1080.0),
    );
}

#[test]
fn output_transform_derotates_about_center() {
    let out = Size::new(1920.0, 1080.0);
    assert_eq!(crop_output_transform(out, 0.0), Affine::IDENTITY);

    let flipped = crop_output_transform(out, 180.0) * Point::new(0.0, 0.0);
    assert!((flipped.x - 1920.0).abs() < 1e-6 && (flipped.y - 1080.0).abs() < 1e-6);

    let center = crop_output_transform(out, 90.0) * Point::new(960.0, 540.0);
    assert!((center.x - 960.0).abs() < 1e-6 && (center.y - 540.0).abs() < 1e-6);
}

#[test]
fn point_mappings_round_trip_through_the_preview() {
    let image = Size::new(4000.0, 3000.0);
    let display = Size::new(800.0, 450.0);

    let c = display_to_source(Point::new(400.0, 225.0), image, display, 1.7, 90.0);
    assert!((c.x - 2000.0).abs() < 1e-6 && (c.y - 1500.0).abs() < 1e-6);

    let p = Point::new(123.0, 77.0);
    let back = source_to_display(
        display_to_source(p, image, display, 0.5, 270.0),
        image,
        display,
        0.5,
        270.0,
    );
    assert!((back - p).hypot() < 1e-6);
}
