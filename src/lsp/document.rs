use ropey::Rope;

use tower_lsp::lsp_types::{Position, Range, TextDocumentContentChangeEvent, Url};

pub use crate::lsp::models::{LspDocument, LspDocumentState};

/// Converts an LSP position to a character offset in the Rope.
fn position_to_char_offset(position: &Position, text: &Rope) -> usize {
    let line = position.line as usize;
    let char = position.character as usize;
    text.line_to_char(line) + char
}

impl LspDocumentState {
    /// Applies a list of content changes to the document state, updating the
    /// text. Returns the updated text if the version is newer, otherwise an
    /// error.
    pub fn apply(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<String, String> {
        if version <= self.version {
            return Err(format!("Version {} not newer than {}", version, self.version));
        }
        for change in &changes {
            if let Some(range) = change.range {
                let start = position_to_char_offset(&range.start, &self.text);
                let end = position_to_char_offset(&range.end, &self.text);
                self.text.remove(start..end);
                self.text.insert(start, &change.text);
            } else {
                // Full update if no range is provided
                self.text = Rope::from_str(&change.text);
            }
        }
        self.version = version;
        Ok(self.text.to_string())
    }
}

impl LspDocument {
    /// Returns the URI of the document.
    pub async fn uri(&self) -> Url {
        self.state.read().await.uri.clone()
    }

    /// Returns the current text of the document as a string.
    pub async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    /// Returns the current version of the document.
    pub async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    /// Applies changes to the document, updating text and version.
    pub async fn apply(
        &self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Option<String> {
        let mut state = self.state.write().await;
        state.apply(changes, version).ok()
    }
}

/// Returns the characters of the line at `position` up to and excluding the
/// cursor column.
///
/// Positions outside the document yield the empty string; a column past the
/// end of the line yields the whole line without its line break. Both are
/// valid inputs that simply fail to match any namespace downstream.
pub fn line_prefix(text: &Rope, position: &Position) -> String {
    let Some(line) = text.get_line(position.line as usize) else {
        return String::new();
    };
    let mut prefix: String = line.chars().take(position.character as usize).collect();
    while prefix.ends_with(['\n', '\r']) {
        prefix.pop();
    }
    prefix
}

/// Extracts the identifier under the cursor, together with its range on the
/// line.
///
/// Walks backward and forward from the cursor column over identifier
/// characters (letters, digits, underscores), matching Lua's identifier
/// rules. Returns `None` when the cursor is not on an identifier.
pub fn word_at(text: &Rope, position: &Position) -> Option<(String, Range)> {
    let line = text.get_line(position.line as usize)?;
    let chars: Vec<char> = line.chars().collect();
    let char_idx = (position.character as usize).min(chars.len());

    // Find start of identifier (walk backward)
    let mut start = char_idx;
    while start > 0 {
        match chars.get(start - 1) {
            Some(c) if is_identifier_char(*c) => start -= 1,
            _ => break,
        }
    }

    // Find end of identifier (walk forward)
    let mut end = char_idx;
    while end < chars.len() {
        match chars.get(end) {
            Some(c) if is_identifier_char(*c) => end += 1,
            _ => break,
        }
    }

    if start == end {
        return None;
    }

    let word: String = chars[start..end].iter().collect();
    let range = Range {
        start: Position {
            line: position.line,
            character: start as u32,
        },
        end: Position {
            line: position.line,
            character: end as u32,
        },
    };
    Some((word, range))
}

/// Check if a character is valid in a Lua identifier
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
