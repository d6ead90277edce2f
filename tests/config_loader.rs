use std::fs;
use std::path::Path;

use mentonlang::model::ControlMarker;
use mentonlang::parser::{load, load_file};
use mentonlang::processor::GlyphRun;

#[test]
fn loads_fixture_config() {
    let json = fs::read_to_string("tests/fixtures/config.json").unwrap();
    let config = load(&json).expect("valid json");

    assert_eq!(config.symbols.len(), 1);
    assert_eq!(config.symbols[0].glyphs, "찢찢");
    assert_eq!(config.control_marker, ControlMarker::LineBreak);
    assert_eq!(config.max_steps, Some(10000));
    assert!(!config.replace_standard);

    let ctx = config.into_context().expect("valid symbols");
    assert_eq!(ctx.symbols().resolve(&GlyphRun::new("찢찢")), Some(9731));
    assert_eq!(ctx.symbols().resolve(&GlyphRun::new("허훠")), Some(101));
    assert_eq!(ctx.options().max_steps, Some(10000));
}

#[test]
fn replace_standard_drops_builtin_entries() {
    let json = r#"{ "replace_standard": true, "symbols": [{ "glyphs": "하", "code": 72 }] }"#;
    let ctx = load(json).unwrap().into_context().unwrap();
    assert_eq!(ctx.symbols().len(), 1);
    assert_eq!(ctx.run("와타시는\n하\n한다는 것이야"), Ok("H".into()));
}

#[test]
fn invalid_symbol_entry_is_rejected() {
    let json = r#"{ "symbols": [{ "glyphs": "~", "code": 72 }] }"#;
    let err = load(json).unwrap().into_context().unwrap_err();
    assert_eq!(err.to_string(), "glyph run `~` is a reserved marker");
}

#[test]
fn missing_file_names_the_path() {
    let err = load_file(Path::new("tests/fixtures/nope.json")).unwrap_err();
    assert!(err.to_string().contains("nope.json"), "got {err}");
}
