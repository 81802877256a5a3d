use std::sync::Arc;

use anyhow::Context;

use clap::Parser;

use tokio::net::TcpListener;

use tower_lsp::{LspService, Server};

use tracing::{debug, info};

use cclua_language_server::catalog::ApiCatalog;
use cclua_language_server::logging::init_logger;
use cclua_language_server::lsp::backend::CcLuaBackend;

/// Language server for the Cocos Creator Lua scripting API.
#[derive(Parser, Debug)]
#[command(name = "cclua-language-server", version, about)]
struct Args {
    /// Serve a single client over stdin/stdout (the default transport)
    #[arg(long)]
    stdio: bool,

    /// Listen for a single client connection on a local TCP socket
    #[arg(long, conflicts_with = "stdio")]
    socket: bool,

    /// Port to listen on in --socket mode
    #[arg(long, default_value_t = 9257)]
    port: u16,

    /// Override the stderr log level (otherwise RUST_LOG or "info")
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in stderr output
    #[arg(long)]
    no_color: bool,

    /// Disable the DEBUG-level session log file
    #[arg(long)]
    no_file_logging: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _guard = init_logger(args.no_color, args.log_level.as_deref(), !args.no_file_logging)
        .context("failed to initialize logging")?;

    // The catalog is built once and shared read-only for the process lifetime.
    let catalog = Arc::new(ApiCatalog::new());
    info!(
        "Catalog loaded: {} namespaces",
        catalog.namespaces().len()
    );

    let (service, socket) = LspService::new(move |client| CcLuaBackend::new(client, catalog));

    if args.socket {
        let listener = TcpListener::bind(("127.0.0.1", args.port))
            .await
            .with_context(|| format!("failed to bind 127.0.0.1:{}", args.port))?;
        info!("Listening on {}", listener.local_addr()?);

        let (stream, peer) = listener
            .accept()
            .await
            .context("failed to accept client connection")?;
        info!("Client connected from {}", peer);

        let (read, write) = tokio::io::split(stream);
        Server::new(read, write, socket).serve(service).await;
    } else {
        if !args.stdio {
            debug!("No transport selected; defaulting to stdio");
        }
        Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
            .serve(service)
            .await;
    }

    Ok(())
}
