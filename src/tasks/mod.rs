//! Tasks document model and parser.
//!
//! A tasks document is a markdown checklist: `## Phase <n>: ...` headers
//! group `### T<digits>: ...` task blocks, each carrying bold-labelled
//! fields and `- [ ]` acceptance criteria.

pub mod grammar;
mod model;
mod parser;

pub use model::{phase_number, Criterion, ParseResult, Priority, Task};
pub use parser::{parse_task_block, parse_tasks, parse_tasks_file, spec_name_from_path};
