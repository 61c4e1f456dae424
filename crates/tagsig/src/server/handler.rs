use std::{panic::AssertUnwindSafe, path::PathBuf};

use futures::FutureExt;
use serde_json::Value;
use tower_lsp::{
    LanguageServer,
    jsonrpc::{Error, Result},
    lsp_types::*,
};
use tracing::{debug, info, warn};

use crate::{
    config::{Settings, find_config_file, load_config_file},
    cycle::{Anchor, EchoContext},
    document::{CallSite, Document},
    server::{
        commands::{COMMANDS, CommandTarget, EchoCommand},
        state::TagSigServer,
    },
    signature::EchoEngine,
    tags::TagIndex,
};

const CLIENT_NOTIFICATION_PREFIX: &str = "tagsig:";

#[tower_lsp::async_trait]
impl LanguageServer for TagSigServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing tagsig...");

        let root = workspace_root(&params);
        let mut settings = Settings::default();
        if let Some(path) = root.as_deref().and_then(find_config_file) {
            match load_config_file(&path) {
                Ok(payload) => {
                    info!("Loaded {}", path.display());
                    settings = settings.merged_with_payload(&payload);
                },
                Err(error) => warn!("Ignoring config file: {error}"),
            }
        }
        if let Some(options) = params.initialization_options.as_ref() {
            settings = settings.merged_with_payload(options);
        }

        *self.workspace_root.write().await = root;
        self.apply_settings(settings, true).await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                signature_help_provider: Some(SignatureHelpOptions {
                    trigger_characters: Some(vec!["(".to_string()]),
                    retrigger_characters: Some(vec![",".to_string()]),
                    work_done_progress_options: Default::default(),
                }),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: COMMANDS.iter().map(|command| command.to_string()).collect(),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "tagsig".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("tagsig initialized");

        let settings = self.settings_snapshot().await;
        if settings.logging.level.allows_info() {
            let count = self.index_snapshot().await.files().len();
            let _ = AssertUnwindSafe(self.client.log_message(
                MessageType::INFO,
                prefixed_client_message(format!("Looking up signatures in {count} tags file(s)")),
            ))
            .catch_unwind()
            .await;
        }
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }
        self.apply_settings(merged, false).await;
        info!("Applied updated tagsig settings");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down tagsig");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let document = params.text_document;
        debug!("Opened {} ({}, v{})", short_name(&document.uri), document.language_id, document.version);
        self.document_store.open(document.uri, document.language_id, document.text, document.version);
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        self.document_store.apply_changes(&uri, params.content_changes, params.text_document.version);
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        self.document_store.close(&uri);
        self.contexts.remove(&uri);
    }

    async fn signature_help(
        &self,
        params: SignatureHelpParams,
    ) -> Result<Option<SignatureHelp>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(document) = self.document_store.get(&uri) else {
            return Ok(None);
        };

        self.observe_typed_span(&uri, &document, position);
        let Some(call) = document.call_site(position) else {
            return Ok(None);
        };
        let anchor = Anchor {
            line: call.paren.line,
            column: call.paren.character,
        };

        let settings = self.settings_snapshot().await;
        let index = self.index_snapshot().await;
        let engine = EchoEngine::new(&settings, index.as_ref());

        let ctx = match self.contexts.remove(&uri) {
            Some((_, mut ctx)) if ctx.anchor() == Some(anchor) && !ctx.is_empty() => {
                // The client cycles through signatures itself; follow it.
                if let Some(active) = params
                    .context
                    .and_then(|context| context.active_signature_help)
                    .and_then(|help| help.active_signature)
                {
                    ctx.select(active as usize + 1);
                }
                ctx
            },
            _ => open_call(&engine, &call, anchor, &document.language_id),
        };

        if ctx.is_empty() {
            return Ok(None);
        }
        let help = (!settings.display.tooltip_only).then(|| signature_help_for(&ctx));
        self.contexts.insert(uri, ctx);
        Ok(help)
    }

    async fn hover(
        &self,
        params: HoverParams,
    ) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let Some(document) = self.document_store.get(&uri) else {
            return Ok(None);
        };
        let Some((word, range)) = document.word_at(position) else {
            return Ok(None);
        };

        let settings = self.settings_snapshot().await;
        let index = self.index_snapshot().await;
        let tooltip = EchoEngine::new(&settings, index.as_ref()).tooltip(&word, &document.language_id);

        Ok(tooltip.map(|value| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::PlainText,
                value,
            }),
            range: Some(range),
        }))
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<Value>> {
        let Some(command) = EchoCommand::parse(&params.command) else {
            return Err(Error::invalid_params(format!("unknown command '{}'", params.command)));
        };
        let Some(target) = CommandTarget::from_arguments(&params.arguments) else {
            return Err(Error::invalid_params(format!("{} expects a document URI", params.command)));
        };

        let direction = match command {
            EchoCommand::LeaveInsert => {
                if let Some(mut ctx) = self.contexts.get_mut(&target.uri) {
                    ctx.on_insert_leave();
                }
                return Ok(None);
            },
            EchoCommand::Cycle(direction) => direction,
        };

        let current = match self.contexts.get_mut(&target.uri) {
            Some(mut ctx) => ctx.advance(direction).to_string(),
            None => String::new(),
        };

        let settings = self.settings_snapshot().await;
        let index = self.index_snapshot().await;
        let line = EchoEngine::new(&settings, index.as_ref()).display_line(&current, target.columns);
        Ok(Some(Value::String(line)))
    }
}

impl TagSigServer {
    /// Drop the echo state once the call it was opened for has been closed.
    fn observe_typed_span(
        &self,
        uri: &Url,
        document: &Document,
        position: Position,
    ) {
        let Some(mut ctx) = self.contexts.get_mut(uri) else {
            return;
        };
        let Some(anchor) = ctx.anchor() else {
            return;
        };
        let paren = Position::new(anchor.line, anchor.column);
        if let Some(span) = document.text_between(paren, position)
            && ctx.observe_span(span)
        {
            debug!("Call at {}:{} closed in {}", anchor.line + 1, anchor.column + 1, short_name(uri));
        }
    }
}

fn open_call<I: TagIndex + ?Sized>(
    engine: &EchoEngine<'_, I>,
    call: &CallSite,
    anchor: Anchor,
    language: &str,
) -> EchoContext {
    let mut ctx = EchoContext::anchored(anchor);
    engine.on_open_paren(&mut ctx, &call.text, call.previous_line.as_deref(), language);
    ctx
}

fn signature_help_for(ctx: &EchoContext) -> SignatureHelp {
    SignatureHelp {
        signatures: ctx
            .candidates()
            .iter()
            .map(|label| SignatureInformation {
                label: label.clone(),
                documentation: None,
                parameters: None,
                active_parameter: None,
            })
            .collect(),
        active_signature: Some(ctx.cursor().saturating_sub(1) as u32),
        active_parameter: None,
    }
}

fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| folder.uri.clone())
        .or_else(|| params.root_uri.clone())
        .and_then(|uri| uri.to_file_path().ok())
}

fn short_name(uri: &Url) -> String {
    uri.path().rsplit('/').next().unwrap_or(uri.path()).to_owned()
}

fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}
