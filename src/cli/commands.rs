use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read the tile at x/y
    Read {
        x: u32,
        y: u32,

        /// Write the tile to this file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write a tile at x/y
    Write {
        x: u32,
        y: u32,

        /// File holding the tile body (optional; reads from stdin if not provided)
        file: Option<PathBuf>,
    },

    /// Get current state of the tile file
    Info,

    /// Create one tile file per zoom level in a directory
    Create {
        /// Zoom range, e.g. `0-12` or `5`
        zooms: String,
    },
}
