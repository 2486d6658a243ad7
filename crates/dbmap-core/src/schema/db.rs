mod column;
pub use column::Column;

mod database;
pub use database::Database;

mod index;
pub use index::{Index, IndexType};

mod relation;
pub use relation::{ForeignColumn, ForeignRelation, RelationType};

mod schema;
pub use schema::Schema;

mod table;
pub use table::Table;
