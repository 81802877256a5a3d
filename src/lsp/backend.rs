//! LSP protocol handler implementations
//!
//! This module contains the `tower_lsp::LanguageServer` implementation for
//! the Cocos Creator Lua API backend:
//! - Lifecycle handlers (initialize, initialized, shutdown)
//! - Document lifecycle (did_open, did_change, did_save, did_close)
//! - Information providers (completion, hover)
//!
//! The backend owns the open-document map and a shared reference to the
//! immutable [`ApiCatalog`]; every completion and hover request is answered
//! by a stateless dispatch over those two.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use ropey::Rope;

use tokio::sync::RwLock;

use tower_lsp::{Client, LanguageServer, jsonrpc};
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DidSaveTextDocumentParams, Hover,
    HoverParams, HoverProviderCapability, InitializedParams, InitializeParams,
    InitializeResult, ServerCapabilities, TextDocumentSyncCapability,
    TextDocumentSyncKind, Url,
};

use tracing::{debug, info, warn};

use crate::catalog::ApiCatalog;
use crate::lsp::document::{line_prefix, word_at};
use crate::lsp::features::{completion, hover};
use crate::lsp::models::{LspDocument, LspDocumentState};

/// Language identifier the client's document selector scopes this server to.
const LANGUAGE_ID: &str = "lua";

#[derive(Debug)]
pub struct CcLuaBackend {
    client: Client,
    catalog: Arc<ApiCatalog>,
    documents_by_uri: DashMap<Url, Arc<LspDocument>>,
    serial_document_id: AtomicU32,
}

impl CcLuaBackend {
    /// Creates a new backend serving the given catalog.
    ///
    /// The catalog is injected rather than read through a global so the
    /// dispatch paths can be exercised against a substitute catalog.
    pub fn new(client: Client, catalog: Arc<ApiCatalog>) -> Self {
        CcLuaBackend {
            client,
            catalog,
            documents_by_uri: DashMap::new(),
            serial_document_id: AtomicU32::new(0),
        }
    }

    fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for CcLuaBackend {
    /// Handles the LSP initialize request, advertising completion (triggered
    /// on `.`) and hover.
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize: client={:?}", params.client_info);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string()]),
                    all_commit_characters: None,
                    resolve_provider: Some(false),
                    completion_item: None,
                    work_done_progress_options: Default::default(),
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    /// Handles the LSP initialized notification.
    async fn initialized(&self, params: InitializedParams) {
        info!("Initialized: {:?}", params);
        self.client
            .log_message(
                tower_lsp::lsp_types::MessageType::INFO,
                "Cocos Creator Lua API server initialized",
            )
            .await;
    }

    /// Handles the LSP shutdown request.
    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        Ok(())
    }

    /// Handles opening a text document, storing its text for later requests.
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let text = params.text_document.text;
        let version = params.text_document.version;
        let language_id = params.text_document.language_id;
        info!(
            "Opening document: URI={}, language={}, version={}",
            uri, language_id, version
        );

        if language_id != LANGUAGE_ID {
            // The client's document selector normally keeps other languages
            // away; still serve the document, but note the mismatch.
            warn!(
                "Document {} has language '{}', expected '{}'",
                uri, language_id, LANGUAGE_ID
            );
        }

        let document_id = self.next_document_id();
        let document = Arc::new(LspDocument {
            id: document_id,
            state: RwLock::new(LspDocumentState {
                uri: uri.clone(),
                language_id,
                text: Rope::from_str(&text),
                version,
            }),
        });
        self.documents_by_uri.insert(uri.clone(), document);
        info!("Opened document: URI={}, id={}, version={}", uri, document_id, version);
    }

    /// Handles changes to a text document, applying version-guarded updates.
    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let version = params.text_document.version;
        debug!("textDocument/didChange: URI={}, version={}", uri, version);

        if let Some(document) = self.documents_by_uri.get(&uri).map(|r| r.value().clone()) {
            if document.apply(params.content_changes, version).await.is_none() {
                warn!("Failed to apply changes to document with URI={}", uri);
            }
        } else {
            warn!("Failed to find document with URI={}", uri);
        }
    }

    /// Handles saving a text document (no-op: the catalog never changes and
    /// the text is already current from didChange).
    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("textDocument/didSave: URI={}", params.text_document.uri);
    }

    /// Handles closing a text document, removing it from state.
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some((_key, document)) = self.documents_by_uri.remove(&uri) {
            info!("Closed document: {}, id: {}", uri, document.id);
        } else {
            warn!("Failed to find document with URI={}", uri);
        }
    }

    /// Provides completion suggestions for the namespace being completed at
    /// the cursor, if any.
    async fn completion(&self, params: CompletionParams) -> jsonrpc::Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        debug!("Completion request at {}:{:?}", uri, position);

        let document = match self.documents_by_uri.get(&uri).map(|r| r.value().clone()) {
            Some(document) => document,
            None => {
                debug!("Document not found: {}", uri);
                return Ok(None);
            }
        };

        let prefix = {
            let state = document.state.read().await;
            line_prefix(&state.text, &position)
        };

        let items = completion::suggestions_for_line_prefix(&self.catalog, &prefix);
        if items.is_empty() {
            debug!("No namespace matches line prefix {:?}", prefix);
            Ok(None)
        } else {
            debug!("Returning {} completion items", items.len());
            Ok(Some(CompletionResponse::Array(items)))
        }
    }

    /// Provides hover documentation for the API symbol under the cursor, if
    /// any.
    async fn hover(&self, params: HoverParams) -> jsonrpc::Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        debug!("Hover request at {}:{:?}", uri, position);

        let document = match self.documents_by_uri.get(&uri).map(|r| r.value().clone()) {
            Some(document) => document,
            None => {
                debug!("Document not found: {}", uri);
                return Ok(None);
            }
        };

        let word = {
            let state = document.state.read().await;
            word_at(&state.text, &position)
        };

        let Some((word, range)) = word else {
            debug!("No word at position {:?}", position);
            return Ok(None);
        };

        Ok(hover::hover_for_word(&self.catalog, &word, range))
    }
}
