use std::path::Path;

/// Checks if the tile file exists and is a regular file before opening it read-only.
///
/// # Parameters:
/// - `path`: The path to the tile file.
///
/// # Returns:
/// - `Ok(())` if the file exists and is a regular file.
/// - `Err(std::io::Error)` if the file does not exist or is not a regular file.
pub fn verify_file_existence(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Tile file '{}' does not exist.", path.display()),
        ));
    }

    if !path.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{}' is not a valid file.", path.display()),
        ));
    }

    Ok(())
}

/// Checks that `path` exists and is a directory.
pub fn verify_dir_existence(path: &Path) -> std::io::Result<()> {
    if !path.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("'{}' is not an existing directory.", path.display()),
        ));
    }

    Ok(())
}
