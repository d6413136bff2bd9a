pub mod batch;
pub mod sql_value;

pub use batch::{Row, TableBatches};
pub use sql_value::SqlValue;
