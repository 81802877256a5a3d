/// Feature-level tests for hover dispatch
///
/// Each scenario drives the same path the backend uses for a hover request:
/// extract the word under a document position, then look it up in the
/// catalog's derived word-documentation index.

use indoc::indoc;

use quickcheck::quickcheck;

use ropey::Rope;

use tower_lsp::lsp_types::{Hover, HoverContents, Position};

use cclua_language_server::catalog::ApiCatalog;
use cclua_language_server::lsp::document::word_at;
use cclua_language_server::lsp::features::hover::hover_for_word;

const FIXTURE: &str = indoc! {r#"
    local img = cc.graphics.Image
    cc.graphics.drawTexture(img, 10, 20)
    cc.gui.enableDocking()
    print("done")
"#};

fn dispatch_at(catalog: &ApiCatalog, text: &str, line: u32, character: u32) -> Option<Hover> {
    let rope = Rope::from_str(text);
    let (word, range) = word_at(&rope, &Position { line, character })?;
    hover_for_word(catalog, &word, range)
}

fn markup_value(hover: &Hover) -> &str {
    match &hover.contents {
        HoverContents::Markup(content) => content.value.as_str(),
        other => panic!("Expected markup contents, got {:?}", other),
    }
}

#[test]
fn test_hover_over_method() {
    let catalog = ApiCatalog::new();

    // Inside `drawTexture` on the second line
    let hover = dispatch_at(&catalog, FIXTURE, 1, 15).unwrap();
    assert_eq!(
        markup_value(&hover),
        "Draws the specified image at the specified x and y coordinates."
    );
}

#[test]
fn test_hover_reports_word_range() {
    let catalog = ApiCatalog::new();

    let hover = dispatch_at(&catalog, FIXTURE, 1, 15).unwrap();
    let range = hover.range.unwrap();
    assert_eq!(range.start, Position { line: 1, character: 12 });
    assert_eq!(range.end, Position { line: 1, character: 23 });
}

#[test]
fn test_hover_over_namespace_words() {
    let catalog = ApiCatalog::new();

    let hover = dispatch_at(&catalog, FIXTURE, 1, 1).unwrap();
    assert_eq!(markup_value(&hover), "Cocos Creator API");

    let hover = dispatch_at(&catalog, FIXTURE, 1, 5).unwrap();
    assert_eq!(markup_value(&hover), "Cocos Creator Graphics API");

    let hover = dispatch_at(&catalog, FIXTURE, 2, 4).unwrap();
    assert_eq!(markup_value(&hover), "Cocos Creator GUI API");
}

#[test]
fn test_hover_over_image_prefers_namespace_documentation() {
    let catalog = ApiCatalog::new();

    // `Image` names both a graphics entry and the cc.graphics.Image.
    // namespace; the namespace documentation wins in the derived index.
    let hover = dispatch_at(&catalog, FIXTURE, 0, 26).unwrap();
    assert_eq!(markup_value(&hover), "Cocos Creator Image API");
}

#[test]
fn test_hover_over_unknown_word() {
    let catalog = ApiCatalog::new();

    // `print` is a Lua builtin, not part of the cc catalog
    assert!(dispatch_at(&catalog, FIXTURE, 3, 2).is_none());
}

#[test]
fn test_hover_off_any_word() {
    let catalog = ApiCatalog::new();

    // On the space between two call arguments
    assert!(dispatch_at(&catalog, FIXTURE, 1, 28).is_none());
    // Outside the document
    assert!(dispatch_at(&catalog, FIXTURE, 42, 0).is_none());
}

fn is_known_word(catalog: &ApiCatalog, word: &str) -> bool {
    word == "cc"
        || catalog.namespaces().iter().any(|namespace| {
            namespace.word == word || namespace.entries.iter().any(|entry| entry.name == word)
        })
}

quickcheck! {
    /// Hover documentation exists exactly for the fixed word set.
    fn prop_hover_only_for_known_words(word: String) -> bool {
        let catalog = ApiCatalog::new();
        catalog.documentation_for_word(&word).is_some() == is_known_word(&catalog, &word)
    }
}
