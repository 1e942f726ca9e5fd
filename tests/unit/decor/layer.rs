use super::*;

fn ids(layer: &DecorationLayer) -> Vec<ElementId> {
    layer.elements().iter().map(DecorationElement::id).collect()
}

#[test]
fn new_elements_land_on_default_anchors_and_get_selected() {
    let mut layer = DecorationLayer::new();
    let t = layer
        .add_text("Hello", "Pacifico, cursive", DEFAULT_TEXT_SIZE, DEFAULT_TEXT_COLOR)
        .unwrap();
    assert_eq!(layer.selected_id(), Some(t));
    assert_eq!(layer.get(t).unwrap().position(), Point::new(50.0, 100.0));

    let s = layer.add_sticker("🎉").unwrap();
    assert_eq!(layer.selected_id(), Some(s));
    let sticker = layer.get(s).unwrap();
    assert_eq!(sticker.position(), Point::new(50.0, 200.0));
    assert_eq!(sticker.size(), 48.0);
    assert_eq!(sticker.rotation(), 0.0);
    assert_ne!(t, s);
}

#[test]
fn blank_text_is_rejected_without_side_effects() {
    let mut layer = DecorationLayer::new();
    let err = layer
        .add_text("   ", "Tinos, serif", 32.0, Rgba8::BLACK)
        .unwrap_err();
    assert_eq!(err.to_string(), "validation error: Please enter some text");
    assert!(layer.is_empty());
    assert!(layer.add_text("x", "Tinos, serif", 0.0, Rgba8::BLACK).is_err());
}

#[test]
fn selection_is_single_and_clears_on_unknown_ids() {
    let mut layer = DecorationLayer::new();
    let a = layer.add_sticker("⭐").unwrap();
    let b = layer.add_sticker("🌈").unwrap();
    layer.select(Some(a));
    assert_eq!(layer.selected().unwrap().id(), a);
    layer.select(Some(ElementId(999)));
    assert_eq!(layer.selected_id(), None);
    layer.select(Some(b));
    layer.select(None);
    assert!(layer.selected().is_none());
}

#[test]
fn mutations_touch_only_the_target() {
    let mut layer = DecorationLayer::new();
    let a = layer.add_sticker("⭐").unwrap();
    let b = layer.add_text("hi", "Delius, cursive", 20.0, Rgba8::BLACK).unwrap();

    assert!(layer.move_to(a, -40.0, 900.0));
    assert!(layer.resize(a, 120.0));
    assert!(layer.rotate(a, 45.0));

    let untouched = layer.get(b).unwrap();
    assert_eq!(untouched.position(), Point::new(50.0, 100.0));
    assert_eq!(untouched.size(), 20.0);
    assert_eq!(untouched.rotation(), 0.0);

    let moved = layer.get(a).unwrap();
    assert_eq!(moved.position(), Point::new(-40.0, 900.0));
    assert_eq!(moved.size(), 120.0);

    let ghost = ElementId(77);
    assert!(!layer.move_to(ghost, 1.0, 1.0));
    assert!(!layer.resize(ghost, 10.0));
    assert!(!layer.rotate(ghost, 10.0));
    assert!(!layer.resize(a, f64::NAN));
}

#[test]
fn text_size_updates_skip_stickers() {
    let mut layer = DecorationLayer::new();
    let s = layer.add_sticker("🦄").unwrap();
    let t = layer.add_text("yo", "Tangerine, cursive", 32.0, Rgba8::BLACK).unwrap();
    assert!(!layer.update_text_size(s, 60.0));
    assert!(layer.update_text_size(t, 60.0));
    assert_eq!(layer.get(t).unwrap().size(), 60.0);
    assert_eq!(layer.get(s).unwrap().size(), 48.0);
}

#[test]
fn rotation_is_normalized() {
    let mut layer = DecorationLayer::new();
    let s = layer.add_sticker("🎈").unwrap();
    layer.rotate(s, 450.0);
    assert_eq!(layer.get(s).unwrap().rotation(), 90.0);
    layer.rotate_by(s, -180.0);
    assert_eq!(layer.get(s).unwrap().rotation(), 270.0);
    layer.rotate(s, -30.0);
    assert_eq!(layer.get(s).unwrap().rotation(), 330.0);
}

#[test]
fn draw_order_is_insertion_order_regardless_of_selection() {
    let mut layer = DecorationLayer::new();
    let a = layer.add_text("a", "Tinos, serif", 16.0, Rgba8::BLACK).unwrap();
    let b = layer.add_sticker("💜").unwrap();
    let c = layer.add_text("c", "Tinos, serif", 16.0, Rgba8::BLACK).unwrap();

    layer.select(Some(a));
    layer.move_to(a, 10.0, 10.0);
    layer.select(None);
    assert_eq!(ids(&layer), vec![a, b, c]);

    assert!(layer.remove(b));
    assert_eq!(ids(&layer), vec![a, c]);
    let d = layer.add_sticker("🔥").unwrap();
    assert_eq!(ids(&layer), vec![a, c, d]);
}

#[test]
fn removing_the_selected_element_clears_selection() {
    let mut layer = DecorationLayer::new();
    let a = layer.add_sticker("🍕").unwrap();
    let b = layer.add_sticker("🍔").unwrap();
    layer.select(Some(a));
    assert!(layer.remove(b));
    assert_eq!(layer.selected_id(), Some(a));
    assert!(layer.remove(a));
    assert_eq!(layer.selected_id(), None);
    assert!(!layer.remove(a));
}

#[test]
fn snapshots_round_trip_and_keep_ids_fresh() {
    let mut layer = DecorationLayer::new();
    layer.add_text("hey", "Yellowtail, cursive", 40.0, Rgba8::rgb(1, 2, 3)).unwrap();
    let last = layer.add_sticker("✨").unwrap();

    let json = serde_json::to_string(&layer.snapshot()).unwrap();
    assert!(json.contains(r#""kind":"text""#));
    let elements: Vec<DecorationElement> = serde_json::from_str(&json).unwrap();

    let mut restored = DecorationLayer::from_elements(elements).unwrap();
    assert_eq!(restored.elements(), layer.elements());
    let fresh = restored.add_sticker("🎯").unwrap();
    assert!(fresh > last);

    let dup = vec![restored.elements()[0].clone(), restored.elements()[0].clone()];
    assert!(DecorationLayer::from_elements(dup).is_err());
}

#[test]
fn restored_rotations_are_wrapped() {
    let mut layer = DecorationLayer::new();
    let sticker = layer.add_sticker("🌸").unwrap();
    let mut elements = layer.snapshot();
    *elements[0].rotation_mut() = 450.0;
    let mut text = layer.snapshot()[0].clone();
    if let DecorationElement::Sticker(s) = &mut text {
        s.id = ElementId(sticker.0 + 1);
        s.rotation = -90.0;
    }
    elements.push(text);

    let restored = DecorationLayer::from_elements(elements).unwrap();
    let rotations: Vec<f64> = restored.elements().iter().map(|e| e.rotation()).collect();
    assert_eq!(rotations, vec![90.0, 270.0]);
}
