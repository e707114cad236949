use bmfont_text::{load, BmFontError, Font, Glyph, Kerning};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_load_valid() -> Result<(), BmFontError> {
    let font = load("resources/valid.fnt")?;

    assert_eq!(font.face, "\"valid\"");
    assert_eq!(font.size, 8);
    assert_eq!(font.line_height, 8);
    assert_eq!(font.base, 7);
    assert_eq!(font.scale_w, 128);
    assert_eq!(font.scale_h, 512);
    assert_eq!(font.page_count(), 1);
    assert_eq!(font.page_name(0), Some("valid.png"));

    assert_eq!(font.glyph_count(), 3);
    assert_eq!(
        font.glyphs[0],
        Glyph {
            id: 33,
            x: 2,
            y: 3,
            width: 6,
            height: 7,
            x_offset: 0,
            y_offset: 1,
            x_advance: 8,
            page: 0,
            channel: 15,
        }
    );

    assert_eq!(font.kerning_count(), 2);
    assert_eq!(
        font.kernings[0],
        Kerning {
            first: 33,
            second: 34,
            amount: -4,
        }
    );
    assert_eq!(font.kerning(33, 34), -4);
    assert_eq!(
        font.glyph(33).map(|g| g.advance_with_kerning(34, &font)),
        Some(4)
    );
    assert_eq!(font.index().advance(33, 34), Some(4));
    assert_eq!(
        font.source.as_deref(),
        Some(std::path::Path::new("resources/valid.fnt"))
    );

    Ok(())
}

#[test]
fn test_load_without_kernings() -> Result<(), BmFontError> {
    let font = load("resources/valid_no_kernings.fnt")?;

    assert_eq!(font.face, "\"valid\"");
    assert_eq!(font.page_count(), 1);
    assert_eq!(font.page_name(0), Some("valid.png"));
    assert_eq!(font.glyph_count(), 3);
    assert_eq!(font.kerning_count(), 0);

    Ok(())
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        load("resources/does_not_exist"),
        Err(BmFontError::IO(_))
    ));
}

#[rstest]
#[case("too_few_pages.fnt", "Fewer pages than specified in file. Expected: 2, actual: 1")]
#[case("too_few_chars.fnt", "Fewer chars than specified in file. Expected: 4, actual: 3")]
#[case(
    "too_few_kernings.fnt",
    "Fewer kernings than specified in file. Expected: 3, actual: 2"
)]
#[case(
    "too_many_pages.fnt",
    "More pages than specified in file (line 4, col 1). Expected: 1"
)]
#[case(
    "too_many_chars.fnt",
    "More chars than specified in file (line 7, col 1). Expected: 2"
)]
#[case(
    "too_many_kernings.fnt",
    "More kernings than specified in file (line 10, col 1). Expected: 1"
)]
fn test_count_mismatches(#[case] file: &str, #[case] message: &str) {
    let err = load(format!("resources/{}", file)).unwrap_err();
    assert_eq!(err.to_string(), message);
}

#[test]
fn test_save_as_json() -> Result<(), BmFontError> {
    let font = load("resources/valid.fnt")?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("valid.json");
    font.save(&path)?;

    let saved: Font = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved, font);

    Ok(())
}
