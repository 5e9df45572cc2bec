//! File export adapters.

pub mod csv;

pub use csv::{dentist_production_csv, dentist_production_filename};
