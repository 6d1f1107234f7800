use crate::cli::{Commands, HELP_TEMPLATE};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
   // Obtain during build time, not runtime
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
#[command(
    after_help = HELP_TEMPLATE.replace("%BINARY_NAME%", env!("CARGO_PKG_NAME"))
)]
pub struct Cli {
    /// The tile file for one zoom level (or a directory, for `create`).
    #[arg(
        value_name = "storage",
        help = "Path to a <zoom>.tiles file. Writable files are created automatically; `create` takes a directory."
    )]
    pub storage: PathBuf,

    /// Zoom level of the tile file. Defaults to the number in the file name.
    #[arg(short = 'z', long = "zoom", value_name = "ZOOM")]
    pub zoom: Option<u8>,

    #[command(subcommand)]
    pub command: Commands,
}
