//! Live-schema metadata reported by a statistics provider.

mod index;
pub use index::Index;

mod table_name;
pub use table_name::TableName;
