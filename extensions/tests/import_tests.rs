#[cfg(test)]
mod tests {
    use rand::Rng;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;
    use tile_r_drive::{TilePyramid, TileStoreError};
    use tile_r_drive_extensions::{ImportSummary, TilePyramidImportExt};

    fn random_tile(len: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..len).map(|_| rng.random::<u8>()).collect()
    }

    fn build_tar(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, body) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(body.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, *body)
                .expect("Failed to append tar entry");
        }
        builder.into_inner().expect("Failed to finish tar archive")
    }

    fn write_tile(base: &Path, name: &str, body: &[u8]) {
        let path = base.join(name);
        fs::create_dir_all(path.parent().expect("Tile path has a parent"))
            .expect("Failed to create tile dir");
        fs::write(path, body).expect("Failed to write tile");
    }

    #[test]
    fn test_import_tar_into_pyramid() {
        let out = tempdir().expect("Failed to create temp dir");
        let pyramid = TilePyramid::open_writable(out.path()).expect("Failed to open pyramid");

        let root = random_tile(512);
        let a = random_tile(1024);
        let b = random_tile(2048);
        let deep = random_tile(64);
        let archive = build_tar(&[
            ("0/0/0.png", root.as_slice()),
            ("2/1/3.png", a.as_slice()),
            ("2/3/0.png", b.as_slice()),
            ("12/5/5.png", deep.as_slice()),
        ]);

        let summary = pyramid
            .import_tar(archive.as_slice(), 10)
            .expect("Tar import failed");
        assert_eq!(summary, ImportSummary { added: 3, skipped: 1 });

        assert_eq!(pyramid.zooms().unwrap(), vec![0, 2]);
        assert_eq!(pyramid.get_tile(0, 0, 0).unwrap(), Some(root));
        assert_eq!(pyramid.get_tile(2, 1, 3).unwrap(), Some(a));
        assert_eq!(pyramid.get_tile(2, 3, 0).unwrap(), Some(b));
        assert_eq!(pyramid.get_tile(12, 5, 5).unwrap(), None);

        pyramid.close().expect("Failed to close pyramid");

        assert!(out.path().join("0.tiles").is_file());
        assert!(out.path().join("2.tiles").is_file());
        assert!(!out.path().join("12.tiles").exists());
    }

    #[test]
    fn test_import_tar_file_from_disk() {
        let out = tempdir().expect("Failed to create temp dir");
        let src = tempdir().expect("Failed to create temp dir");

        // Large enough to span several reads of the 1 MiB buffer.
        let tiles: Vec<Vec<u8>> = (0..12).map(|_| random_tile(256 * 1024)).collect();
        let names: Vec<String> = (0..12).map(|i| format!("4/{}/{}.png", i, 15 - i)).collect();
        let entries: Vec<(&str, &[u8])> = names
            .iter()
            .zip(&tiles)
            .map(|(name, body)| (name.as_str(), body.as_slice()))
            .collect();

        let archive_path = src.path().join("tiles.tar");
        fs::write(&archive_path, build_tar(&entries)).expect("Failed to write archive");

        let pyramid = TilePyramid::open_writable(out.path()).expect("Failed to open pyramid");
        let summary = pyramid
            .import_tar_file(&archive_path, 10)
            .expect("Tar file import failed");
        assert_eq!(summary, ImportSummary { added: 12, skipped: 0 });

        for (i, body) in tiles.iter().enumerate() {
            let i = i as u32;
            assert_eq!(pyramid.get_tile(4, i, 15 - i).unwrap().as_ref(), Some(body));
        }

        assert!(pyramid.import_tar_file(src.path().join("missing.tar"), 10).is_err());
    }

    #[test]
    fn test_import_tar_rejects_bad_names() {
        let out = tempdir().expect("Failed to create temp dir");
        let pyramid = TilePyramid::open_writable(out.path()).expect("Failed to open pyramid");

        let archive = build_tar(&[
            ("1/0/0.png", &b"ok"[..]),
            ("1/0/readme.txt", &b"nope"[..]),
        ]);
        let err = pyramid
            .import_tar(archive.as_slice(), 10)
            .expect_err("Bad tile name should fail");
        assert!(matches!(err, TileStoreError::InvalidTilePath(_)), "{err:?}");

        // The tile before the bad entry was stored.
        assert_eq!(pyramid.get_tile(1, 0, 0).unwrap(), Some(b"ok".to_vec()));
    }

    #[test]
    fn test_import_dir_and_reopen_read_only() {
        let src = tempdir().expect("Failed to create temp dir");
        let out = tempdir().expect("Failed to create temp dir");

        let a = random_tile(300);
        let b = random_tile(400);
        write_tile(src.path(), "1/0/1.png", &a);
        write_tile(src.path(), "1/1/1.png", &b);
        write_tile(src.path(), "3/7/7.png", &a);

        let pyramid = TilePyramid::open_writable(out.path()).expect("Failed to open pyramid");
        let summary = pyramid.import_dir(src.path(), 2).expect("Dir import failed");
        assert_eq!(summary, ImportSummary { added: 2, skipped: 1 });
        pyramid.close().expect("Failed to close pyramid");

        let reader = TilePyramid::open_read_only(out.path()).expect("Failed to reopen");
        assert_eq!(reader.zooms().unwrap(), vec![1]);
        assert_eq!(reader.get_tile(1, 0, 1).unwrap(), Some(a));
        assert_eq!(reader.get_tile(1, 1, 1).unwrap(), Some(b));
        assert_eq!(reader.get_tile(1, 0, 0).unwrap(), None);
    }

    #[test]
    fn test_import_dir_missing_source() {
        let out = tempdir().expect("Failed to create temp dir");
        let pyramid = TilePyramid::open_writable(out.path()).expect("Failed to open pyramid");

        let missing = out.path().join("does-not-exist");
        assert!(pyramid.import_dir(&missing, 10).is_err());
    }
}
