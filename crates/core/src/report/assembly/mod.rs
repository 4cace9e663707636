//! Final report assembly: display rounding, sentinel fill, summary counts.

mod report_assembler;
mod table_model;

pub use report_assembler::*;
pub use table_model::*;
