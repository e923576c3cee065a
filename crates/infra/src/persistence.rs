// crates/infra/src/persistence.rs
mod file_reader;
mod file_writer;

pub use file_reader::FileReader;
pub use file_writer::FileWriter;
