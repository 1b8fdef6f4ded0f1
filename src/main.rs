// Binary entry point: serve the todo engine over streamable HTTP

use std::path::PathBuf;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use todo_mcp::mcp::TodoServer;
use todo_mcp::storage::{FileStore, default_store_path, shared_store};

const BIND_ADDRESS: &str = "127.0.0.1:3001";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let path = std::env::var_os("TODO_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(default_store_path);
    info!("todo store: {}", path.display());

    let store = shared_store(FileStore::new(path));

    let ct = CancellationToken::new();

    // Create the MCP service; every session shares one store handle
    let service = StreamableHttpService::new(
        move || Ok(TodoServer::new(store.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            cancellation_token: ct.child_token(),
            ..Default::default()
        },
    );

    let router = axum::Router::new().fallback_service(service);

    let bind = std::env::var("TODO_MCP_BIND").unwrap_or_else(|_| BIND_ADDRESS.to_string());
    let tcp_listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(l) => l,
        Err(e) => {
            error!("failed to bind {bind}: {e}");
            std::process::exit(1);
        }
    };
    info!("MCP server listening on {bind}");

    let signal_ct = ct.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown requested");
        signal_ct.cancel();
    });

    if let Err(e) = axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async move {
            ct.cancelled().await;
        })
        .await
    {
        error!("server error: {e}");
    }
    info!("MCP server stopped");
}
