//! Server command implementation

use std::path::Path;

use anyhow::Result;

use evdash_server::ServerConfig;

pub async fn cmd_serve(
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    allowed_origins: Option<&str>,
) -> Result<()> {
    println!("🚀 Starting evdash web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let allowed_origins: Vec<String> = allowed_origins
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if allowed_origins.is_empty() {
        println!("   CORS: any origin");
    } else {
        println!("   CORS: {}", allowed_origins.join(", "));
    }

    let static_dir = static_dir.map(|p| p.to_string_lossy().into_owned());

    evdash_server::serve(
        host,
        port,
        static_dir.as_deref(),
        ServerConfig { allowed_origins },
    )
    .await
}
