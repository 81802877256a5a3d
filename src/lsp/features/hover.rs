//! Hover documentation for the `cc` scripting API
//!
//! The word under the cursor is matched against the catalog's derived
//! word-documentation index. A hit becomes a markdown hover payload covering
//! the word's range; a miss is a normal outcome and yields no hover.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Range};

use tracing::debug;

use crate::catalog::ApiCatalog;

/// Returns the hover payload for the word under the cursor, or `None` when
/// the word is not a known API symbol.
pub fn hover_for_word(catalog: &ApiCatalog, word: &str, range: Range) -> Option<Hover> {
    let doc = catalog.documentation_for_word(word)?;
    debug!("Returning hover for '{}'", word);
    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: doc.to_string(),
        }),
        range: Some(range),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Position;

    fn word_range(line: u32, start: u32, end: u32) -> Range {
        Range {
            start: Position { line, character: start },
            end: Position { line, character: end },
        }
    }

    fn markup_value(hover: &Hover) -> &str {
        match &hover.contents {
            HoverContents::Markup(content) => content.value.as_str(),
            other => panic!("Expected markup contents, got {:?}", other),
        }
    }

    #[test]
    fn test_hover_for_method() {
        let catalog = ApiCatalog::new();
        let range = word_range(0, 12, 23);
        let hover = hover_for_word(&catalog, "drawTexture", range).unwrap();
        assert_eq!(
            markup_value(&hover),
            "Draws the specified image at the specified x and y coordinates."
        );
        assert_eq!(hover.range, Some(range));
    }

    #[test]
    fn test_hover_for_namespace_word() {
        let catalog = ApiCatalog::new();
        let hover = hover_for_word(&catalog, "cc", word_range(0, 0, 2)).unwrap();
        assert_eq!(markup_value(&hover), "Cocos Creator API");
    }

    #[test]
    fn test_hover_for_unknown_word() {
        let catalog = ApiCatalog::new();
        assert!(hover_for_word(&catalog, "unknown", word_range(0, 0, 7)).is_none());
        assert!(hover_for_word(&catalog, "", word_range(0, 0, 0)).is_none());
    }
}
