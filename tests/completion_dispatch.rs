/// Feature-level tests for namespace completion dispatch
///
/// Each scenario drives the same path the backend uses for a completion
/// request: derive the line prefix from a document position, then dispatch
/// against the catalog.

use indoc::indoc;

use quickcheck::quickcheck;

use ropey::Rope;

use tower_lsp::lsp_types::{CompletionItem, Position};

use cclua_language_server::catalog::ApiCatalog;
use cclua_language_server::lsp::document::line_prefix;
use cclua_language_server::lsp::features::completion::suggestions_for_line_prefix;

fn labels(items: &[CompletionItem]) -> Vec<String> {
    items.iter().map(|item| item.label.clone()).collect()
}

fn dispatch_at(catalog: &ApiCatalog, text: &str, line: u32, character: u32) -> Vec<CompletionItem> {
    let rope = Rope::from_str(text);
    let prefix = line_prefix(&rope, &Position { line, character });
    suggestions_for_line_prefix(catalog, &prefix)
}

#[test]
fn test_graphics_completion_after_trigger() {
    let catalog = ApiCatalog::new();
    let code = indoc! {r#"
        local img = cc.graphics.
    "#};

    // Cursor immediately after the trigger `.` on the first line
    let items = dispatch_at(&catalog, code, 0, 24);
    assert_eq!(
        labels(&items),
        vec!["Image", "loadTexture", "drawTexture", "FilterMode", "Point", "Bilinear"]
    );
}

#[test]
fn test_image_completion_after_trigger() {
    let catalog = ApiCatalog::new();
    let code = indoc! {r#"
        local img = cc.graphics.Image
        img = cc.graphics.Image.
    "#};

    let items = dispatch_at(&catalog, code, 1, 24);
    assert_eq!(labels(&items), vec!["getWidth", "getHeight", "getFilter", "setFilter"]);
}

#[test]
fn test_gui_completion_after_trigger() {
    let catalog = ApiCatalog::new();
    let code = indoc! {r#"
        function setup()
          cc.gui.
        end
    "#};

    let items = dispatch_at(&catalog, code, 1, 9);
    assert_eq!(labels(&items), vec!["enableDocking", "disableDocking", "text"]);
}

#[test]
fn test_unrelated_namespace_yields_no_suggestions() {
    let catalog = ApiCatalog::new();
    let code = indoc! {r#"
        local x = math.
    "#};

    let items = dispatch_at(&catalog, code, 0, 15);
    assert!(items.is_empty(), "math. is not a catalog namespace");
}

#[test]
fn test_cursor_before_trigger_yields_no_suggestions() {
    let catalog = ApiCatalog::new();
    let code = indoc! {r#"
        local img = cc.graphics.
    "#};

    // One column left of the trigger: prefix is "local img = cc.graphics"
    let items = dispatch_at(&catalog, code, 0, 23);
    assert!(items.is_empty());
}

#[test]
fn test_empty_document_yields_no_suggestions() {
    let catalog = ApiCatalog::new();
    assert!(dispatch_at(&catalog, "", 0, 0).is_empty());
    assert!(dispatch_at(&catalog, "", 5, 3).is_empty());
}

#[test]
fn test_dispatch_is_deterministic() {
    let catalog = ApiCatalog::new();
    let code = "cc.graphics.";

    let first = labels(&dispatch_at(&catalog, code, 0, 12));
    let second = labels(&dispatch_at(&catalog, code, 0, 12));
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

quickcheck! {
    /// Suggestions exist exactly when the prefix ends with a catalog
    /// namespace path.
    fn prop_suggestions_only_for_namespace_suffixes(prefix: String) -> bool {
        let catalog = ApiCatalog::new();
        let expected = catalog
            .namespaces()
            .iter()
            .any(|namespace| prefix.ends_with(&namespace.path));
        let got = !suggestions_for_line_prefix(&catalog, &prefix).is_empty();
        got == expected
    }
}
