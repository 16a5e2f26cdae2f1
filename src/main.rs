use mcp_affine_server::bridge::Bridge;
use mcp_affine_server::config::ServerConfig;
use mcp_affine_server::handlers::workspaces;
use mcp_affine_server::server::McpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries JSON-RPC frames.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "mcp_affine_server=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let bridge = match Bridge::from_config(&config) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    if config.skip_startup_check {
        tracing::info!(endpoint = %config.graphql_endpoint(), "startup check skipped");
    } else {
        match workspaces::current_user(&bridge).await {
            Ok(user) => tracing::info!(
                endpoint = %config.graphql_endpoint(),
                user = %user.email,
                "connected to AFFiNE"
            ),
            Err(e) => {
                tracing::error!(endpoint = %config.graphql_endpoint(), "startup check failed: {e}");
                std::process::exit(1);
            }
        }
    }

    let mut server = McpServer::new(bridge);
    if let Err(e) = server.run().await {
        tracing::error!("fatal error: {e}");
        std::process::exit(1);
    }
}
