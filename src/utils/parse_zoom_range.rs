use crate::storage_engine::{MAX_ZOOM, Result, TileStoreError};
use std::ops::RangeInclusive;

/// Parses a zoom range such as `"0-12"` or a single zoom such as `"5"`.
///
/// Both ends are inclusive and must be in `0..=16`, with the start not
/// greater than the end.
///
/// # Examples
/// ```
/// use tile_r_drive::utils::parse_zoom_range;
///
/// assert_eq!(parse_zoom_range("3-7").unwrap(), 3..=7);
/// assert_eq!(parse_zoom_range("4").unwrap(), 4..=4);
/// assert!(parse_zoom_range("7-3").is_err());
/// assert!(parse_zoom_range("0-17").is_err());
/// ```
pub fn parse_zoom_range(input: &str) -> Result<RangeInclusive<u8>> {
    let input = input.trim();
    let invalid = || TileStoreError::InvalidZoomRange(input.to_string());

    let (start, end) = match input.split_once('-') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (input, input),
    };

    let start: u8 = start.parse().map_err(|_| invalid())?;
    let end: u8 = end.parse().map_err(|_| invalid())?;

    if start > end || end > MAX_ZOOM {
        return Err(invalid());
    }

    Ok(start..=end)
}
