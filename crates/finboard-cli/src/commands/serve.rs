//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use finboard_core::{Config, SourceClient, TransactionSource};
use finboard_server::{AppState, ServerConfig};

pub async fn cmd_serve(
    config: Config,
    source: SourceClient,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Finboard web server...");
    println!("   Source: {}", source_label(&config, &source));
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", allowed_origins.join(", "));
    }
    if host != "127.0.0.1" && host != "localhost" {
        println!();
        println!("   ⚠️  Listening beyond localhost: the API has no authentication of its own");
    }
    println!();

    let static_dir = static_dir
        .map(|p| p.to_str().context("Static directory path is not valid UTF-8"))
        .transpose()?;

    let state = AppState::new(source, config);
    finboard_server::serve(state, host, port, static_dir, ServerConfig { allowed_origins }).await
}

fn source_label(config: &Config, source: &SourceClient) -> String {
    match config.backend.token {
        Some(_) => format!("{} (token configured)", source.name()),
        None => source.name(),
    }
}
