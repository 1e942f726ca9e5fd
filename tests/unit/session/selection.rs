use super::*;

#[test]
fn toggle_preserves_pick_order() {
    let mut set = SelectionSet::new();
    assert!(set.toggle(2).unwrap());
    assert!(set.toggle(0).unwrap());
    assert!(set.toggle(3).unwrap());
    assert_eq!(set.indices(), &[2, 0, 3]);
    assert_eq!(set.position(0), Some(1));

    assert!(!set.toggle(0).unwrap());
    assert_eq!(set.indices(), &[2, 3]);
}

#[test]
fn fifth_pick_is_rejected_without_change() {
    let mut set = SelectionSet::new();
    for i in 0..4 {
        set.toggle(i).unwrap();
    }
    assert!(set.is_full());

    let err = set.toggle(4).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "validation error: You can only select 4 photos");
    assert_eq!(set.indices(), &[0, 1, 2, 3]);

    // Deselecting still works when full.
    assert!(!set.toggle(1).unwrap());
    assert_eq!(set.len(), 3);
}

#[test]
fn removal_drops_and_shifts_indices() {
    let mut set = SelectionSet::new();
    for i in [4, 1, 2, 0] {
        set.toggle(i).unwrap();
    }
    set.on_photo_removed(2);
    assert_eq!(set.indices(), &[3, 1, 0]);

    set.on_photo_removed(5);
    assert_eq!(set.indices(), &[3, 1, 0]);
}

#[test]
fn size_never_exceeds_limit() {
    let mut set = SelectionSet::new();
    for i in 0..20 {
        let _ = set.toggle(i % 7);
        assert!(set.len() <= MAX_SELECTION);
    }
}
