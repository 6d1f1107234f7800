use crate::storage_engine::{Result, TileStoreError, validate_coordinate, validate_zoom};

/// Parses a `<zoom>/<x>/<y>.png` tile name into its coordinates.
///
/// A leading `./` and surrounding slashes are ignored. The zoom must be at
/// most 16 and `x`, `y` must fall inside that zoom's grid.
///
/// # Examples
/// ```
/// use tile_r_drive::utils::parse_tile_path;
///
/// assert_eq!(parse_tile_path("3/5/2.png").unwrap(), (3, 5, 2));
/// assert_eq!(parse_tile_path("./0/0/0.png").unwrap(), (0, 0, 0));
/// assert!(parse_tile_path("3/5/2.jpg").is_err());
/// assert!(parse_tile_path("1/2/0.png").is_err());
/// ```
pub fn parse_tile_path(name: &str) -> Result<(u8, u32, u32)> {
    let invalid = || TileStoreError::InvalidTilePath(name.to_string());

    let trimmed = name.strip_prefix("./").unwrap_or(name).trim_matches('/');
    let mut parts = trimmed.split('/');

    let (Some(zoom), Some(x), Some(file), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let y = file.strip_suffix(".png").ok_or_else(invalid)?;

    let zoom: u8 = zoom.parse().map_err(|_| invalid())?;
    let x: u32 = x.parse().map_err(|_| invalid())?;
    let y: u32 = y.parse().map_err(|_| invalid())?;

    validate_zoom(zoom)?;
    validate_coordinate(zoom, x, y)?;

    Ok((zoom, x, y))
}
