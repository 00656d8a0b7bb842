//! SQL DDL for the user and car catalog tables.

/// SQLite schema with:
/// - `users.username` UNIQUE; passwords stored as argon2 PHC strings
/// - `car_models.car_make_id` referencing `car_makes(id)`
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    date_joined TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS car_makes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS car_models (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    car_make_id INTEGER NOT NULL REFERENCES car_makes(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    car_type TEXT NOT NULL DEFAULT 'SUV',
    year INTEGER NOT NULL DEFAULT 2023,
    dealer_id INTEGER NULL
);

CREATE INDEX IF NOT EXISTS idx_car_models_make ON car_models(car_make_id);
"#;
