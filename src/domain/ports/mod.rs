//! Domain ports (interfaces) for hexagonal architecture.

pub mod output_writer;

pub use output_writer::OutputWriter;
