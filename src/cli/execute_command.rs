use crate::cli::{Cli, Commands};
use crate::storage_engine::{Result, TileMap, TilePyramid, TileStoreError};
use crate::utils::{
    format_bytes, parse_zoom_range, verify_dir_existence, verify_file_existence,
};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use tracing::info;

/// Executes commands from the CLI against a tile file or tile directory.
///
/// `read` and `info` open the tile file read-only. `write` opens it
/// read-write, creating it when missing. `create` treats the storage path as
/// a directory and prepares one `<zoom>.tiles` file per requested zoom.
///
/// # Returns:
/// - `Ok(())` on success.
/// - `Err(TileStoreError)` for any failure, including a tile that was never
///   written (`read`) or a missing tile body (`write`).
pub fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Read { x, y, output } => {
            verify_file_existence(&cli.storage)?;
            let map = TileMap::open(&cli.storage, resolve_zoom(cli)?, true)?;

            let Some(tile) = map.get_tile(*x, *y)? else {
                return Err(TileStoreError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("tile {}/{}/{} not found", map.zoom(), x, y),
                )));
            };

            match output {
                Some(path) => fs::write(path, &tile)?,
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(&tile)?;
                    stdout.flush()?;
                }
            }

            map.close()
        }

        Commands::Write { x, y, file } => {
            let body = match file {
                Some(path) => fs::read(path)?,
                None if !io::stdin().is_terminal() && std::env::var("FORCE_NO_TTY").is_err() => {
                    let mut body = Vec::new();
                    io::stdin().lock().read_to_end(&mut body)?;
                    body
                }
                None => {
                    return Err(TileStoreError::Io(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "No tile data provided and stdin is a terminal.",
                    )));
                }
            };
            if body.is_empty() {
                return Err(TileStoreError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "No tile data provided.",
                )));
            }

            let map = TileMap::open(&cli.storage, resolve_zoom(cli)?, false)?;
            map.add(*x, *y, &body)?;
            map.close()?;

            info!(
                "Stored {} at {}/{}/{}",
                format_bytes(body.len() as u64),
                map.zoom(),
                x,
                y
            );
            Ok(())
        }

        Commands::Info => {
            verify_file_existence(&cli.storage)?;
            let map = TileMap::open(&cli.storage, resolve_zoom(cli)?, true)?;
            let stats = map.stats()?;

            println!("\n{:=^50}", " TILE FILE INFO ");
            println!("{:<25} {:?}", "TILE FILE:", cli.storage);
            println!("{:-<50}", ""); // Separator

            println!("{:<25} {}", "ZOOM:", stats.zoom);
            println!(
                "{:<25} {} x {}",
                "GRID:", stats.dimension, stats.dimension
            );
            println!("{:<25} {}", "SLOTS:", stats.slots);
            println!("{:<25} {}", "WRITTEN SLOTS:", stats.written_slots);
            println!(
                "{:<25} {}",
                "INDEX REGION:",
                format_bytes(stats.index_region_len)
            );
            println!(
                "{:<25} {}",
                "DATA REGION:",
                format_bytes(stats.data_region_len)
            );
            println!("{:<25} {}", "TOTAL SIZE:", format_bytes(stats.file_len));

            println!("{:=<50}", ""); // Footer

            map.close()
        }

        Commands::Create { zooms } => {
            verify_dir_existence(&cli.storage)?;
            let zooms = parse_zoom_range(zooms)?;
            let pyramid = TilePyramid::create(&cli.storage, zooms.clone())?;
            pyramid.close()?;

            for zoom in zooms {
                println!(
                    "{}",
                    TilePyramid::tile_path(&cli.storage, zoom).display()
                );
            }
            Ok(())
        }
    }
}

fn resolve_zoom(cli: &Cli) -> Result<u8> {
    if let Some(zoom) = cli.zoom {
        return Ok(zoom);
    }

    TilePyramid::zoom_from_path(&cli.storage)?.ok_or_else(|| {
        TileStoreError::InvalidTilePath(format!(
            "{} (pass --zoom or name the file <zoom>.tiles)",
            cli.storage.display()
        ))
    })
}
