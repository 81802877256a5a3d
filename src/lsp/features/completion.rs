//! Namespace completion for the `cc` scripting API
//!
//! Dispatch is a suffix check with no persisted state: the text on the
//! current line before the cursor is matched against the fixed namespace
//! paths, most specific first, and the matching namespace's entries are
//! converted into completion items. Insert text uses LSP snippet syntax so
//! the client's snippet engine expands the placeholder slots.

use tower_lsp::lsp_types::{CompletionItem, Documentation, InsertTextFormat};

use tracing::debug;

use crate::catalog::{ApiCatalog, ApiEntry};

/// Returns the suggestions for the namespace the line prefix completes, in
/// catalog declaration order, or an empty list when no namespace path
/// matches.
pub fn suggestions_for_line_prefix(catalog: &ApiCatalog, line_prefix: &str) -> Vec<CompletionItem> {
    match catalog.namespace_for_line_prefix(line_prefix) {
        Some(namespace) => {
            debug!("Line prefix completes namespace {}", namespace.path);
            namespace.entries.iter().map(to_completion_item).collect()
        }
        None => Vec::new(),
    }
}

fn to_completion_item(entry: &ApiEntry) -> CompletionItem {
    CompletionItem {
        label: entry.name.clone(),
        kind: Some(entry.kind.completion_item_kind()),
        documentation: Some(Documentation::String(entry.doc.clone())),
        insert_text: Some(entry.insert_template.clone()),
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        ..Default::default()
    }
}
