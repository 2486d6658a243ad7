pub mod config;
pub use config::Config;

mod error;
pub use error::{Error, IntoError};

pub mod provider;
pub use provider::{Catalog, Provider};

pub mod schema;
pub use schema::db::Database;

/// A Result type alias that uses dbmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
