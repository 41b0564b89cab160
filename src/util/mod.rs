//! Utility modules

pub mod file_validation;

pub use file_validation::{filename_for_display, has_table_extension, probe_file_size};
