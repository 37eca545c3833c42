//! Context excerpts from the documents that sit next to a tasks file.

mod model;
mod reader;
pub mod section;

pub use model::{ContextField, SpecContext};
pub use reader::{discover_spec_files, read_spec_context, SPEC_FILES};
