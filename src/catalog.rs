//! Static API catalog for the Cocos Creator Lua scripting surface
//!
//! This module defines the completable symbols of the `cc` scripting API,
//! grouped into namespaces (`cc.graphics.`, `cc.graphics.Image.`, `cc.gui.`),
//! together with a word-to-documentation index used for hover lookups.
//!
//! The catalog is immutable: it is built once at startup and shared behind an
//! `Arc`. The hover index is derived from the namespace and entry tables at
//! construction time, so the two can never drift apart.

use rustc_hash::FxHashMap;

use tower_lsp::lsp_types::CompletionItemKind;

/// Hover documentation for the root `cc` table itself.
const ROOT_WORD: &str = "cc";
const ROOT_DOC: &str = "Cocos Creator API";

/// Symbol category of a catalog entry.
///
/// Only selects the icon the client renders next to a suggestion; it carries
/// no behavioral weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSymbolKind {
    Class,
    Method,
    Enum,
    EnumMember,
}

impl ApiSymbolKind {
    /// Maps the catalog category onto the LSP completion item kind.
    pub fn completion_item_kind(self) -> CompletionItemKind {
        match self {
            ApiSymbolKind::Class => CompletionItemKind::CLASS,
            ApiSymbolKind::Method => CompletionItemKind::METHOD,
            ApiSymbolKind::Enum => CompletionItemKind::ENUM,
            ApiSymbolKind::EnumMember => CompletionItemKind::ENUM_MEMBER,
        }
    }
}

/// A single completable API symbol.
#[derive(Debug, Clone)]
pub struct ApiEntry {
    /// Display name, unique within its namespace.
    pub name: String,
    pub kind: ApiSymbolKind,
    /// Insert text in LSP snippet syntax (`$1`, `${1:image}`), expanded by
    /// the client's snippet engine.
    pub insert_template: String,
    /// One-line prose description.
    pub doc: String,
}

/// A namespace of the scripting API.
///
/// `path` is the exact suffix matched against the text before the cursor,
/// including the trailing `.` separator. `word` is the bare identifier naming
/// the namespace, used for hover on the namespace name itself.
#[derive(Debug, Clone)]
pub struct Namespace {
    pub path: String,
    pub word: String,
    pub doc: String,
    /// Declaration order is significant: it is the order suggestions are
    /// presented to the user.
    pub entries: Vec<ApiEntry>,
}

/// The immutable API catalog: namespace tables plus the derived hover index.
#[derive(Debug)]
pub struct ApiCatalog {
    namespaces: Vec<Namespace>,
    word_docs: FxHashMap<String, String>,
}

impl ApiCatalog {
    pub fn new() -> Self {
        // Most-specific path first: suffix matching scans this list in order.
        let namespaces = vec![image_namespace(), graphics_namespace(), gui_namespace()];

        // Derive the hover index: root word, then namespace words, then entry
        // names. First insertion wins, so a name shared between a namespace
        // and an entry (e.g. `Image`) resolves to the namespace documentation.
        let mut word_docs = FxHashMap::default();
        word_docs.insert(ROOT_WORD.to_string(), ROOT_DOC.to_string());
        for namespace in &namespaces {
            word_docs
                .entry(namespace.word.clone())
                .or_insert_with(|| namespace.doc.clone());
        }
        for namespace in &namespaces {
            for entry in &namespace.entries {
                word_docs
                    .entry(entry.name.clone())
                    .or_insert_with(|| entry.doc.clone());
            }
        }

        ApiCatalog { namespaces, word_docs }
    }

    /// Returns the namespace being completed, if the text before the cursor
    /// ends with one of the fixed namespace paths.
    pub fn namespace_for_line_prefix(&self, line_prefix: &str) -> Option<&Namespace> {
        self.namespaces
            .iter()
            .find(|namespace| line_prefix.ends_with(&namespace.path))
    }

    /// Returns the entries of the namespace with exactly the given path, in
    /// declaration order.
    pub fn entries_for_namespace(&self, path: &str) -> Option<&[ApiEntry]> {
        self.namespaces
            .iter()
            .find(|namespace| namespace.path == path)
            .map(|namespace| namespace.entries.as_slice())
    }

    /// Looks up hover documentation for a word. Case-sensitive exact match;
    /// `None` is the normal outcome for unknown words.
    pub fn documentation_for_word(&self, word: &str) -> Option<&str> {
        self.word_docs.get(word).map(String::as_str)
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }
}

impl Default for ApiCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Symbols completed after `cc.graphics.`
fn graphics_namespace() -> Namespace {
    Namespace {
        path: "cc.graphics.".to_string(),
        word: "graphics".to_string(),
        doc: "Cocos Creator Graphics API".to_string(),
        entries: vec![
            ApiEntry {
                name: "Image".to_string(),
                kind: ApiSymbolKind::Class,
                insert_template: "Image".to_string(),
                doc: "Represents an image.".to_string(),
            },
            ApiEntry {
                name: "loadTexture".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "loadTexture(\"$1\")".to_string(),
                doc: "Loads an image from the specified file path.".to_string(),
            },
            ApiEntry {
                name: "drawTexture".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "drawTexture(${1:image}, ${2:x}, ${3:y})".to_string(),
                doc: "Draws the specified image at the specified x and y coordinates.".to_string(),
            },
            ApiEntry {
                name: "FilterMode".to_string(),
                kind: ApiSymbolKind::Enum,
                insert_template: "FilterMode".to_string(),
                doc: "Represents the filter mode used when rendering an image.".to_string(),
            },
            ApiEntry {
                name: "Point".to_string(),
                kind: ApiSymbolKind::EnumMember,
                insert_template: "Point".to_string(),
                doc: "Uses point filtering when rendering an image.".to_string(),
            },
            ApiEntry {
                name: "Bilinear".to_string(),
                kind: ApiSymbolKind::EnumMember,
                insert_template: "Bilinear".to_string(),
                doc: "Uses bilinear filtering when rendering an image.".to_string(),
            },
        ],
    }
}

/// Methods completed after `cc.graphics.Image.`
fn image_namespace() -> Namespace {
    Namespace {
        path: "cc.graphics.Image.".to_string(),
        word: "Image".to_string(),
        doc: "Cocos Creator Image API".to_string(),
        entries: vec![
            ApiEntry {
                name: "getWidth".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "getWidth()".to_string(),
                doc: "Returns the width of the image in pixels.".to_string(),
            },
            ApiEntry {
                name: "getHeight".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "getHeight()".to_string(),
                doc: "Returns the height of the image in pixels.".to_string(),
            },
            ApiEntry {
                name: "getFilter".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "getFilter()".to_string(),
                doc: "Returns the current filter mode of the image.".to_string(),
            },
            ApiEntry {
                name: "setFilter".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "setFilter(${1:filter})".to_string(),
                doc: "Sets the filter mode of the image to the specified value.".to_string(),
            },
        ],
    }
}

/// Symbols completed after `cc.gui.`
fn gui_namespace() -> Namespace {
    Namespace {
        path: "cc.gui.".to_string(),
        word: "gui".to_string(),
        doc: "Cocos Creator GUI API".to_string(),
        entries: vec![
            ApiEntry {
                name: "enableDocking".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "enableDocking()".to_string(),
                doc: "Enables docking for the GUI component.".to_string(),
            },
            ApiEntry {
                name: "disableDocking".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "disableDocking()".to_string(),
                doc: "Disables docking for the GUI component.".to_string(),
            },
            ApiEntry {
                name: "text".to_string(),
                kind: ApiSymbolKind::Method,
                insert_template: "text(\"$1\")".to_string(),
                doc: "Displays the specified text on the GUI component.".to_string(),
            },
        ],
    }
}
