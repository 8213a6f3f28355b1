//! The tabular data layer: typed cells, the immutable table, the CSV loader
//! and the typed record view the endpoints work with.

mod loader;
mod record;
mod table;
mod value;

pub use loader::DataSource;
pub use record::Record;
pub use table::{RowObject, Table};
pub use value::{Value, is_missing};
