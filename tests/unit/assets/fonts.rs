use super::*;

#[test]
fn font_stacks_unquote_and_classify() {
    assert_eq!(
        parse_font_stack("\"Comic Neue\", cursive"),
        vec![
            FontFamilyName::Named("Comic Neue".to_string()),
            FontFamilyName::Cursive
        ]
    );
    assert_eq!(
        parse_font_stack("Tinos, serif"),
        vec![FontFamilyName::Named("Tinos".to_string()), FontFamilyName::Serif]
    );
    assert_eq!(
        parse_font_stack(" 'Pacifico' ,, Sans-Serif "),
        vec![
            FontFamilyName::Named("Pacifico".to_string()),
            FontFamilyName::SansSerif
        ]
    );
    assert!(parse_font_stack("").is_empty());
}

#[test]
fn empty_book_resolves_nothing_and_caches_the_miss() {
    let mut book = FontBook::empty();
    assert_eq!(book.face_count(), 0);
    assert!(book.resolve("Pacifico, cursive").is_none());
    assert!(book.resolve("Pacifico, cursive").is_none());
}

#[test]
fn garbage_font_data_adds_no_faces() {
    let mut book = FontBook::empty();
    book.load_font_data(b"not a font".to_vec());
    assert_eq!(book.face_count(), 0);
    assert!(book.resolve("sans-serif").is_none());
}

#[test]
fn missing_font_dir_is_ignored() {
    let mut book = FontBook::empty();
    book.load_dir(Path::new("target/does-not-exist/fonts"));
    assert_eq!(book.face_count(), 0);
}
