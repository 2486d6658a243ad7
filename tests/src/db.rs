#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "postgresql")]
pub mod postgresql;

#[cfg(feature = "sqlite")]
pub mod sqlite;
