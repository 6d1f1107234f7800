mod reader;
pub use reader::TileMapReader;

mod writer;
pub use writer::TileMapWriter;
