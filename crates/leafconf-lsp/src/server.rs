//! LSP backend for Leaf configuration files
//!
//! Keeps the latest text of every open document, republishes diagnostics on
//! each change and answers queries by reparsing the stored text.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DidSaveTextDocumentParams,
    DocumentSymbolParams, DocumentSymbolResponse, ExecuteCommandOptions, ExecuteCommandParams,
    GotoDefinitionParams, GotoDefinitionResponse, Hover, HoverParams, HoverProviderCapability,
    InitializeParams, InitializeResult, InitializedParams, Location, MessageType, OneOf,
    PrepareRenameResponse, ReferenceParams, RenameOptions, RenameParams, ServerCapabilities,
    ServerInfo, TextDocumentPositionParams, TextDocumentSyncCapability, TextDocumentSyncKind,
    Url, WorkDoneProgressOptions, WorkspaceEdit,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::convert::to_lsp_diagnostic;
use crate::domain::{CompletionEngine, HoverAnalyzer};
use crate::encoding::{PositionEncoding, PositionMapper};
use crate::intelligence::{NavigationAnalyzer, RenameAnalyzer};
use crate::session::CurrentFile;
use crate::structural::SymbolAnalyzer;
use leafconf_core::ConfDocument;
use leafconf_validate::ValidationEngine;

/// Make a file current and return its content
pub const LOAD_FILE_COMMAND: &str = "leafconf.loadFile";
/// Write text to the current file and return its path
pub const SAVE_FILE_COMMAND: &str = "leafconf.saveFile";

/// LSP Backend state
struct Backend {
    /// LSP client for sending notifications
    client: Client,
    /// Document store for open documents
    documents: Arc<RwLock<HashMap<Url, String>>>,
    /// Workspace settings from `leafconf.toml`
    settings: Arc<RwLock<Settings>>,
    /// Current file for load/save commands
    session: Arc<CurrentFile>,
    /// Column unit agreed on in `initialize`
    encoding: Arc<RwLock<PositionEncoding>>,
}

impl Backend {
    /// Create a new backend instance
    fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            settings: Arc::new(RwLock::new(Settings::default())),
            session: Arc::new(CurrentFile::new()),
            encoding: Arc::new(RwLock::new(PositionEncoding::default())),
        }
    }

    async fn encoding(&self) -> PositionEncoding {
        *self.encoding.read().await
    }

    /// Get document text by URI
    async fn get_document(&self, uri: &Url) -> Option<String> {
        let docs = self.documents.read().await;
        docs.get(uri).cloned()
    }

    /// Store document text
    async fn store_document(&self, uri: Url, text: String) {
        let mut docs = self.documents.write().await;
        docs.insert(uri, text);
    }

    /// Remove document from store
    async fn remove_document(&self, uri: &Url) {
        let mut docs = self.documents.write().await;
        docs.remove(uri);
    }

    /// Validate a document and publish diagnostics
    async fn validate(&self, uri: Url, text: &str) {
        debug!("Validating document: {}", uri);

        let doc = ConfDocument::parse(text);
        let diagnostics = self
            .settings
            .read()
            .await
            .apply(ValidationEngine::with_defaults().validate(&doc));

        let mapper = PositionMapper::new(&doc, self.encoding().await);
        let lsp_diagnostics: Vec<_> = diagnostics
            .iter()
            .map(|d| to_lsp_diagnostic(d, &uri, &mapper))
            .collect();

        debug!(
            "Publishing {} diagnostics for {}",
            lsp_diagnostics.len(),
            uri
        );
        self.client
            .publish_diagnostics(uri, lsp_diagnostics, None)
            .await;
    }

    async fn execute(&self, command: &str, arguments: &[Value]) -> Result<Option<Value>> {
        match command {
            LOAD_FILE_COMMAND => {
                let path = string_argument(arguments, "path")?;
                let content = self.session.load(path).await.map_err(session_error)?;
                Ok(Some(Value::String(content)))
            }
            SAVE_FILE_COMMAND => {
                let text = string_argument(arguments, "text")?;
                let path = self.session.save(text).await.map_err(session_error)?;
                Ok(Some(Value::String(path.display().to_string())))
            }
            other => Err(Error::invalid_params(format!("Unknown command: {}", other))),
        }
    }
}

/// First command argument, which must be a string
fn string_argument<'a>(arguments: &'a [Value], name: &str) -> Result<&'a str> {
    arguments
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_params(format!("Expected a {} argument", name)))
}

fn session_error(err: crate::session::SessionError) -> Error {
    warn!("Session command failed: {}", err);
    let mut error = Error::internal_error();
    error.message = err.to_string().into();
    error
}

fn negotiate_encoding(params: &InitializeParams) -> PositionEncoding {
    let offered = params
        .capabilities
        .general
        .as_ref()
        .and_then(|general| general.position_encodings.as_deref());
    PositionEncoding::negotiate(offered)
}

fn root_path(params: &InitializeParams) -> Option<PathBuf> {
    #[allow(deprecated)]
    let root_uri = params.root_uri.as_ref();
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri)
        .or(root_uri)
        .and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("leafconf LSP server initializing");

        if let Some(root) = root_path(&params) {
            *self.settings.write().await = Settings::load_or_default(&root);
        }

        let encoding = negotiate_encoding(&params);
        debug!("Position encoding: {:?}", encoding);
        *self.encoding.write().await = encoding;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                position_encoding: Some(encoding.kind()),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![
                        " ".to_string(),
                        "[".to_string(),
                        ",".to_string(),
                        "=".to_string(),
                    ]),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                references_provider: Some(OneOf::Left(true)),
                rename_provider: Some(OneOf::Right(RenameOptions {
                    prepare_provider: Some(true),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                })),
                document_symbol_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![
                        LOAD_FILE_COMMAND.to_string(),
                        SAVE_FILE_COMMAND.to_string(),
                    ],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "leafconf-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("leafconf LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "leafconf language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("leafconf LSP server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("Document opened: {}", params.text_document.uri);
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        self.store_document(uri.clone(), text.clone()).await;
        self.validate(uri, &text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("Document changed: {}", params.text_document.uri);
        let uri = params.text_document.uri;

        // Full sync: the last change carries the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            self.store_document(uri.clone(), change.text.clone()).await;
            self.validate(uri, &change.text).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("Document saved: {}", params.text_document.uri);
        let uri = params.text_document.uri;

        let text = match params.text {
            Some(text) => {
                self.store_document(uri.clone(), text.clone()).await;
                Some(text)
            }
            None => self.get_document(&uri).await,
        };
        if let Some(text) = text {
            self.validate(uri, &text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.remove_document(&params.text_document.uri).await;
        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        debug!("Completion request for: {}", uri);

        let text = match self.get_document(&uri).await {
            Some(doc) => doc,
            None => {
                warn!("Document not found for completion: {}", uri);
                return Ok(None);
            }
        };

        let snippets = self.settings.read().await.completion.snippets;
        let engine =
            CompletionEngine::with_snippets(snippets).with_encoding(self.encoding().await);
        let position = params.text_document_position.position;
        let items = engine.get_completions(&text, position);

        if items.is_empty() {
            Ok(None)
        } else {
            debug!("Generated {} completions for {}", items.len(), uri);
            Ok(Some(CompletionResponse::Array(items)))
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        debug!("Hover request for: {}", uri);

        let text = match self.get_document(&uri).await {
            Some(doc) => doc,
            None => {
                warn!("Document not found for hover: {}", uri);
                return Ok(None);
            }
        };

        let position = params.text_document_position_params.position;
        Ok(HoverAnalyzer::hover_with_encoding(
            &text,
            position,
            self.encoding().await,
        ))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        debug!("Definition request for: {}", uri);

        let text = match self.get_document(&uri).await {
            Some(doc) => doc,
            None => {
                warn!("Document not found for definition: {}", uri);
                return Ok(None);
            }
        };

        let analyzer = NavigationAnalyzer::with_encoding(&text, self.encoding().await);
        let position = params.text_document_position_params.position;
        Ok(analyzer
            .definition(&uri, position)
            .map(GotoDefinitionResponse::Scalar))
    }

    async fn references(&self, params: ReferenceParams) -> Result<Option<Vec<Location>>> {
        let uri = params.text_document_position.text_document.uri;
        debug!("References request for: {}", uri);

        let text = match self.get_document(&uri).await {
            Some(doc) => doc,
            None => {
                warn!("Document not found for references: {}", uri);
                return Ok(None);
            }
        };

        let analyzer = NavigationAnalyzer::with_encoding(&text, self.encoding().await);
        let locations = analyzer.references(
            &uri,
            params.text_document_position.position,
            params.context.include_declaration,
        );

        debug!("Found {} references in {}", locations.len(), uri);
        Ok(Some(locations))
    }

    async fn prepare_rename(
        &self,
        params: TextDocumentPositionParams,
    ) -> Result<Option<PrepareRenameResponse>> {
        let uri = params.text_document.uri;
        debug!("Prepare rename request for: {}", uri);

        let text = match self.get_document(&uri).await {
            Some(doc) => doc,
            None => {
                warn!("Document not found for rename: {}", uri);
                return Ok(None);
            }
        };

        let analyzer = RenameAnalyzer::with_encoding(&text, self.encoding().await);
        Ok(analyzer
            .can_rename_at(params.position)
            .map(|(range, placeholder)| PrepareRenameResponse::RangeWithPlaceholder {
                range,
                placeholder,
            }))
    }

    async fn rename(&self, params: RenameParams) -> Result<Option<WorkspaceEdit>> {
        let uri = params.text_document_position.text_document.uri.clone();
        debug!("Rename request for: {}", uri);

        let text = match self.get_document(&uri).await {
            Some(doc) => doc,
            None => {
                warn!("Document not found for rename: {}", uri);
                return Ok(None);
            }
        };

        let analyzer = RenameAnalyzer::with_encoding(&text, self.encoding().await);
        let position = params.text_document_position.position;
        let result = analyzer
            .rename_at_position(position, &params.new_name)
            .map_err(|err| Error::invalid_params(err.to_string()))?;

        debug!(
            "Renamed '{}' to '{}' with {} edits",
            result.old_name,
            result.new_name,
            result.edits.len()
        );

        let mut changes = HashMap::new();
        changes.insert(uri, result.edits);

        Ok(Some(WorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        }))
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;
        debug!("Document symbol request for: {}", uri);

        let text = match self.get_document(&uri).await {
            Some(doc) => doc,
            None => {
                warn!("Document not found for symbols: {}", uri);
                return Ok(None);
            }
        };

        let symbols =
            SymbolAnalyzer::extract_symbols_with_encoding(&text, self.encoding().await);
        debug!("Generated {} document symbols for {}", symbols.len(), uri);
        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        debug!("Execute command: {}", params.command);
        self.execute(&params.command, &params.arguments).await
    }
}

/// Run the LSP server on stdio
pub async fn run_server() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting leafconf Language Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
