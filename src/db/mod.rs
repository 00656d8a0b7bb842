//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `populate.rs`: seed data for the car catalog
//! - `sqlite.rs`: pool setup plus user and catalog storage

pub mod models;
pub mod populate;
pub mod schema;
pub mod sqlite;

pub use models::{CarMake, CarModel, CarModelWithMake, DbUser, NewUser};
pub use schema::SQLITE_INIT;
pub use sqlite::{CatalogStorage, SqlitePool, UserStorage, open};
