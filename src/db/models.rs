use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

/// Registration input, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct CarMake {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct CarModel {
    pub id: i64,
    pub car_make_id: i64,
    pub name: String,
    pub car_type: String,
    pub year: i64,
    pub dealer_id: Option<i64>,
}

/// One row of the model/make join.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CarModelWithMake {
    pub model_name: String,
    pub make_name: String,
}
