//! Configuration for bqschema-codegen

pub mod defaults;
mod settings;

pub use settings::*;
