//! Command-line argument parsing for the Glade world generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Glade world generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "glade", about = "Glade world generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chunk extent along the x axis, in cells.
    #[arg(long)]
    pub chunk_width: Option<u32>,

    /// Chunk extent along the y axis, in cells.
    #[arg(long)]
    pub chunk_height: Option<u32>,

    /// Chunk extent along the z axis, in cells.
    #[arg(long)]
    pub chunk_depth: Option<u32>,

    /// Worker thread count for chunk decoration (0 = auto).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(w) = args.chunk_width {
            self.world.chunk_width = w;
        }
        if let Some(h) = args.chunk_height {
            self.world.chunk_height = h;
        }
        if let Some(d) = args.chunk_depth {
            self.world.chunk_depth = d;
        }
        if let Some(workers) = args.workers {
            self.generation.worker_threads = workers;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
