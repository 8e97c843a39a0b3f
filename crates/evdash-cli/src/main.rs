//! evdash CLI - EV registration analytics
//!
//! Usage:
//!   evdash summary --file DATA           Dashboard summary in the terminal
//!   evdash compare --make-a A --make-b B Two-make adoption comparison
//!   evdash clusters                      Geographic concentration
//!   evdash insight --kind comprehensive  Natural-language insight
//!   evdash serve --port 5000             Start the web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Summary {
            make,
            ev_type,
            from,
            to,
            limit,
        } => commands::cmd_summary(
            &cli.file,
            make.as_deref(),
            ev_type.as_deref(),
            from,
            to,
            limit,
        ),
        Commands::Compare {
            make_a,
            make_b,
            from,
            to,
        } => commands::cmd_compare(&cli.file, &make_a, &make_b, from, to),
        Commands::Clusters { limit } => commands::cmd_clusters(&cli.file, limit),
        Commands::Insight {
            kind,
            make_a,
            make_b,
            from,
            to,
            context,
        } => {
            commands::cmd_insight(
                &cli.file,
                &kind,
                make_a.as_deref(),
                make_b.as_deref(),
                from,
                to,
                context,
            )
            .await
        }
        Commands::Serve {
            port,
            host,
            static_dir,
            allowed_origins,
        } => {
            commands::cmd_serve(
                &host,
                port,
                static_dir.as_deref(),
                allowed_origins.as_deref(),
            )
            .await
        }
    }
}
