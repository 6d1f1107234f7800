mod format_bytes;
pub use format_bytes::format_bytes;

mod parse_tile_path;
pub use parse_tile_path::parse_tile_path;

mod parse_zoom_range;
pub use parse_zoom_range::parse_zoom_range;

mod verify_file_existence;
pub use verify_file_existence::{verify_dir_existence, verify_file_existence};
