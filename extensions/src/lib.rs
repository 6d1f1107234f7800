mod tile_import_ext;
pub use tile_import_ext::*;
