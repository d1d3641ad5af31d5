//cargo run --package jersey_swap --bin jersey_swap_mcp_server
use jersey_swap::{mcp::JerseySwapMcpServer, SwapConfig};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

/// Optional path to a TOML file overriding model, endpoint and status interval.
const CONFIG_PATH_VAR: &str = "JERSEY_SWAP_CONFIG";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Set up logging to stderr (MCP uses stdout for protocol communication)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Jersey Swap MCP server");

    let config = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => SwapConfig::from_toml_file(&path)?,
        Err(_) => SwapConfig::from_env()?,
    };
    tracing::info!("Using model {}", config.model);

    let server = JerseySwapMcpServer::from_config(&config)?;

    let service = match server.serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {:?}", e);
            return Err(e.into());
        }
    };

    tracing::info!("MCP server started, listening on stdio");

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => tracing::info!("MCP server completed successfully"),
                Err(e) => {
                    tracing::error!("MCP server error: {:?}", e);
                    return Err(e.into());
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        }
    }

    tracing::info!("MCP server shut down");
    Ok(())
}
