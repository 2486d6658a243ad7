//! Protocol buffer schema files generated from a [`Database`](dbmap_core::Database).
//!
//! Nothing in this crate knows which engine produced the database: the [`Generator`] reads
//! the schema model only.

mod field;
pub use field::{Field, FieldList, ResolvedRelation};

mod generator;
pub use generator::Generator;

mod ty;
pub use ty::ProtoType;
