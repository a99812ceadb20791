//! Dataset serialization: CSV writer, output layout, and export policy.

pub mod writer;

pub use writer::{
    dataset_row, should_export, write_release, CsvWriter, OutputDirectory, DATASET_FIELDS,
};
