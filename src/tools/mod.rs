//! Presentation tools
//!
//! Glue between the settings, the input files and the nutrition core.

pub mod summary;
