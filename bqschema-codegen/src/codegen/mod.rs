//! Code generation module

mod document;
mod format;
mod imports;
mod naming;
mod struct_generator;
mod type_mapper;

pub use document::*;
pub use format::*;
pub use imports::*;
pub use naming::*;
pub use struct_generator::*;
pub use type_mapper::*;
