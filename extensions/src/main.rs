use clap::Parser;
use std::path::PathBuf;
use tile_r_drive::utils::verify_dir_existence;
use tile_r_drive::TilePyramid;
use tile_r_drive_extensions::TilePyramidImportExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tile-import",
    version = env!("CARGO_PKG_VERSION"),
    about = "Import a <zoom>/<x>/<y>.png tile tree (tar archive or directory) into <zoom>.tiles files."
)]
struct Args {
    /// Tar archive or directory of tiles
    input: PathBuf,

    /// Directory receiving the <zoom>.tiles files
    output: PathBuf,

    /// Tiles above this zoom are skipped
    #[arg(long = "max-zoom", default_value_t = 10)]
    max_zoom: u8,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> tile_r_drive::Result<()> {
    verify_dir_existence(&args.output)?;
    let pyramid = TilePyramid::open_writable(&args.output)?;

    let imported = if args.input.is_dir() {
        pyramid.import_dir(&args.input, args.max_zoom)
    } else {
        pyramid.import_tar_file(&args.input, args.max_zoom)
    };

    // Close even when the import failed part-way.
    let closed = pyramid.close();
    let summary = imported?;
    closed?;

    info!(
        "Imported {} tiles into {} (skipped {} above zoom {}), zooms {:?}",
        summary.added,
        args.output.display(),
        summary.skipped,
        args.max_zoom,
        pyramid.zooms()?
    );
    Ok(())
}
