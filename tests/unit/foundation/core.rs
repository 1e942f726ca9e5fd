use super::*;

#[test]
fn hex_forms_parse() {
    assert_eq!(Rgba8::from_hex("#9333ea").unwrap(), Rgba8::rgb(0x93, 0x33, 0xea));
    assert_eq!(Rgba8::from_hex("fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::from_hex("#00000080").unwrap(),
        Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0x80
        }
    );
    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#gggggg").is_err());
}

#[test]
fn hex_is_serde_representation() {
    let c = Rgba8::rgb(0xfe, 0xf3, 0xc7);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#fef3c7\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
    assert!(serde_json::from_str::<Rgba8>("\"blue\"").is_err());
}

#[test]
fn premultiplied_scales_by_alpha() {
    let c = Rgba8 {
        r: 200,
        g: 100,
        b: 0,
        a: 128,
    };
    assert_eq!(c.premultiplied(), [100, 50, 0, 128]);
    assert_eq!(Rgba8::WHITE.premultiplied(), [255, 255, 255, 255]);
}

#[test]
fn widescreen_ratio() {
    let r = AspectRatio::default();
    assert!((r.value() - 16.0 / 9.0).abs() < 1e-12);
    assert!((r.height_for(1920.0) - 1080.0).abs() < 1e-9);
    assert!(AspectRatio::new(0.0, 9.0).is_err());
}

#[test]
fn canvas_rect_spans_pixels() {
    let c = Canvas::new(1920, 1080);
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 1920.0, 1080.0));
}
