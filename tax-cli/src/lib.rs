//! Command-line front end for the FY 2024-25 tax engine in `tax_core`.

pub mod app;
pub mod cli;
pub mod csv_loader;
pub mod logging;
pub mod report;
pub mod settings;
pub mod utils;
