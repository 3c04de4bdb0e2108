//! Core traits for SQL generation.

mod param;
mod selection;
mod table;
mod to_sql;

pub use param::*;
pub use selection::*;
pub use table::*;
pub use to_sql::*;
