use ropey::Rope;

use tower_lsp::lsp_types::Url;

/// State for an open text document managed by the LSP server.
#[derive(Debug)]
pub struct LspDocumentState {
    pub uri: Url,
    /// Language identifier reported by the client on open (`lua` for
    /// documents covered by the client's document selector).
    pub language_id: String,
    pub text: Rope,
    pub version: i32,
}

/// LSP document with state for open files.
#[derive(Debug)]
pub struct LspDocument {
    pub id: u32,
    pub state: tokio::sync::RwLock<LspDocumentState>,
}
