#[cfg(test)]
mod tests {

    use tempfile::tempdir;
    use tile_r_drive::{MAX_TILE_SIZE, TileMap, TileStoreError};

    #[test]
    fn test_open_rejects_zoom_above_sixteen() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("17.tiles");

        let err = TileMap::open(&path, 17, false).expect_err("Zoom 17 should be rejected");
        assert!(matches!(err, TileStoreError::InvalidDimension { zoom: 17 }));
        assert!(!path.exists(), "No file should be created for an invalid zoom");
    }

    #[test]
    fn test_open_rejects_empty_path() {
        let err = TileMap::open("", 3, false).expect_err("Empty path should be rejected");
        assert!(matches!(err, TileStoreError::InvalidPath));
    }

    #[test]
    fn test_open_read_only_missing_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing.tiles");

        let err = TileMap::open(&path, 3, true).expect_err("Missing file should fail");
        assert!(matches!(err, TileStoreError::FileOpen { .. }), "{err:?}");
        assert!(!path.exists());
    }

    #[test]
    fn test_coordinates_outside_grid() {
        let dir = tempdir().expect("Failed to create temp dir");
        let map = TileMap::open(dir.path().join("2.tiles"), 2, false).unwrap();

        for (x, y) in [(4, 0), (0, 4), (4, 4), (u32::MAX, 1)] {
            let err = map.add(x, y, b"body").expect_err("Add outside grid should fail");
            assert!(
                matches!(err, TileStoreError::InvalidCoordinate { zoom: 2, .. }),
                "{err:?}"
            );

            let err = map.get_tile(x, y).expect_err("Read outside grid should fail");
            assert!(matches!(err, TileStoreError::InvalidCoordinate { .. }), "{err:?}");
        }
    }

    #[test]
    fn test_tile_buffer_size_limits() {
        let dir = tempdir().expect("Failed to create temp dir");
        let map = TileMap::open(dir.path().join("1.tiles"), 1, false).unwrap();

        let err = map.add(0, 0, &[]).expect_err("Empty body should fail");
        assert!(matches!(err, TileStoreError::InvalidTileBuffer { size: 0 }));

        let oversize = vec![1u8; MAX_TILE_SIZE + 1];
        let err = map.add(0, 0, &oversize).expect_err("Oversize body should fail");
        assert!(matches!(err, TileStoreError::InvalidTileBuffer { .. }));

        let max = vec![1u8; MAX_TILE_SIZE];
        map.add(0, 0, &max).expect("A 16 MiB body is allowed");
        assert_eq!(map.get_tile(0, 0).unwrap().map(|t| t.len()), Some(MAX_TILE_SIZE));
    }

    #[test]
    fn test_add_on_read_only_map() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("2.tiles");
        TileMap::open(&path, 2, false).unwrap().close().unwrap();

        let map = TileMap::open(&path, 2, true).unwrap();
        let err = map.add(1, 1, b"nope").expect_err("Read-only map must reject add");
        assert!(matches!(err, TileStoreError::ReadOnly));
    }

    #[test]
    fn test_operations_after_close() {
        let dir = tempdir().expect("Failed to create temp dir");
        let map = TileMap::open(dir.path().join("2.tiles"), 2, false).unwrap();
        map.add(0, 0, b"body").unwrap();

        map.close().expect("First close should succeed");
        assert!(map.is_closed());
        map.close().expect("Second close is a no-op");

        assert!(matches!(map.add(0, 0, b"x"), Err(TileStoreError::Closed)));
        assert!(matches!(map.get_tile(0, 0), Err(TileStoreError::Closed)));
        assert!(matches!(map.stats(), Err(TileStoreError::Closed)));
        assert!(matches!(map.write_cursor(), Err(TileStoreError::Closed)));
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = TileStoreError::InvalidDatapointer {
            start: 0x10,
            end: 0x20,
            data_start: 0x28,
            data_end: 0x100,
        };
        assert!(err.to_string().contains("datapointer invalid, file may be corrupt"));

        let err = TileStoreError::InvalidCoordinate { zoom: 3, x: 9, y: 1 };
        assert!(err.to_string().contains("9/1"));
    }
}
