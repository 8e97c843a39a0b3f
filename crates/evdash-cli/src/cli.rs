//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// evdash - Electric vehicle registration analytics
#[derive(Parser)]
#[command(name = "evdash")]
#[command(about = "EV registration analytics dashboard and insight proxy", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Dataset file (registration CSV export or its csvjson conversion)
    #[arg(short, long, default_value = "ev_population.csv", global = true)]
    pub file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard summary (counts, type mix, counties, trend)
    Summary {
        /// Restrict to one manufacturer
        #[arg(long)]
        make: Option<String>,

        /// Restrict to one vehicle type (BEV or PHEV)
        #[arg(long)]
        ev_type: Option<String>,

        /// Inclusive model-year lower bound
        #[arg(long)]
        from: Option<i32>,

        /// Inclusive model-year upper bound
        #[arg(long)]
        to: Option<i32>,

        /// Rows kept in each top list
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Compare adoption between two manufacturers on a shared year axis
    Compare {
        /// First manufacturer (case-sensitive, as spelled in the dataset)
        #[arg(long)]
        make_a: String,

        /// Second manufacturer
        #[arg(long)]
        make_b: String,

        /// Inclusive model-year lower bound
        #[arg(long, default_value = "2010")]
        from: i32,

        /// Inclusive model-year upper bound
        #[arg(long, default_value = "2025")]
        to: i32,
    },

    /// Show geographic concentration clusters
    Clusters {
        /// Clusters to display
        #[arg(long, default_value = "15")]
        limit: usize,
    },

    /// Generate a natural-language insight from current aggregates
    Insight {
        /// Insight kind: comprehensive, comparison, generic
        #[arg(long, default_value = "comprehensive")]
        kind: String,

        /// First manufacturer (comparison kind)
        #[arg(long)]
        make_a: Option<String>,

        /// Second manufacturer (comparison kind)
        #[arg(long)]
        make_b: Option<String>,

        /// Inclusive model-year lower bound
        #[arg(long, default_value = "2010")]
        from: i32,

        /// Inclusive model-year upper bound
        #[arg(long, default_value = "2025")]
        to: i32,

        /// Free-text context note (generic kind)
        #[arg(long)]
        context: Option<String>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing the dashboard frontend build
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origins, comma-separated (default: any origin)
        #[arg(long)]
        allowed_origins: Option<String>,
    },
}
