pub mod constants;

pub mod datapointer;
pub use datapointer::*;
