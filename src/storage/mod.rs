pub mod table_reader;
pub mod table_writer;

pub use table_reader::*;
pub use table_writer::*;
