use crate::db::models::{CarMake, CarModel, CarModelWithMake, DbUser, NewUser};
use crate::db::populate::{SEED_CATALOG, SeedModel};
use crate::db::schema::SQLITE_INIT;
use crate::error::PortalError;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the database and apply the bundled schema.
pub async fn open(database_url: &str) -> Result<SqlitePool, PortalError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory database lives only as long as its connection.
    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new().connect_with(options).await?
    };

    init_schema(&pool).await?;
    Ok(pool)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), PortalError> {
    // sqlx::query runs one statement at a time
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<DbUser>, PortalError> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"SELECT id, username, password_hash, first_name, last_name, email, date_joined
               FROM users WHERE username = ?"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn exists(&self, username: &str) -> Result<bool, PortalError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0 > 0)
    }

    /// Insert a new user. `Ok(None)` when the username is already taken.
    pub async fn insert(&self, user: NewUser) -> Result<Option<DbUser>, PortalError> {
        let inserted = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (username, password_hash, first_name, last_name, email, date_joined)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, username, password_hash, first_name, last_name, email, date_joined
            "#,
        )
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(Some(row)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Clone)]
pub struct CatalogStorage {
    pool: SqlitePool,
    seed_lock: Arc<Mutex<()>>,
}

impl CatalogStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            seed_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn count_makes(&self) -> Result<i64, PortalError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM car_makes")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    /// Every model joined to its make, in insertion order.
    pub async fn list_models_with_make(&self) -> Result<Vec<CarModelWithMake>, PortalError> {
        let rows = sqlx::query_as::<_, CarModelWithMake>(
            r#"SELECT m.name AS model_name, k.name AS make_name
               FROM car_models m
               JOIN car_makes k ON k.id = m.car_make_id
               ORDER BY m.id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Seed the catalog when no make exists yet. Returns whether seeding ran.
    ///
    /// Concurrent callers are serialized so the seed is applied at most once.
    pub async fn populate_if_empty(&self) -> Result<bool, PortalError> {
        if self.count_makes().await? > 0 {
            return Ok(false);
        }

        let _guard = self.seed_lock.lock().await;
        if self.count_makes().await? > 0 {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;
        let mut models = 0usize;
        for make in SEED_CATALOG {
            let row = Self::insert_make(&mut tx, make.name, make.description).await?;
            for model in make.models {
                Self::insert_model(&mut tx, row.id, model).await?;
                models += 1;
            }
        }
        tx.commit().await?;

        info!(makes = SEED_CATALOG.len(), models, "car catalog populated");
        Ok(true)
    }

    pub async fn insert_make(
        conn: &mut SqliteConnection,
        name: &str,
        description: &str,
    ) -> Result<CarMake, PortalError> {
        let make = sqlx::query_as::<_, CarMake>(
            "INSERT INTO car_makes (name, description) VALUES (?, ?) RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(conn)
        .await?;
        Ok(make)
    }

    pub async fn insert_model(
        conn: &mut SqliteConnection,
        car_make_id: i64,
        model: &SeedModel,
    ) -> Result<CarModel, PortalError> {
        let row = sqlx::query_as::<_, CarModel>(
            r#"INSERT INTO car_models (car_make_id, name, car_type, year)
               VALUES (?, ?, ?, ?)
               RETURNING id, car_make_id, name, car_type, year, dealer_id"#,
        )
        .bind(car_make_id)
        .bind(model.name)
        .bind(model.car_type)
        .bind(model.year)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::populate::seed_model_count;

    async fn memory_pool() -> SqlitePool {
        open("sqlite::memory:").await.expect("open in-memory db")
    }

    #[tokio::test]
    async fn populate_runs_once() {
        let catalog = CatalogStorage::new(memory_pool().await);

        assert!(catalog.populate_if_empty().await.unwrap());
        assert!(!catalog.populate_if_empty().await.unwrap());

        assert_eq!(catalog.count_makes().await.unwrap(), SEED_CATALOG.len() as i64);
        let rows = catalog.list_models_with_make().await.unwrap();
        assert_eq!(rows.len(), seed_model_count());
        assert_eq!(rows[0].model_name, "Pathfinder");
        assert_eq!(rows[0].make_name, "NISSAN");
    }

    #[tokio::test]
    async fn concurrent_populate_seeds_once() {
        let catalog = CatalogStorage::new(memory_pool().await);
        let (a, b) = tokio::join!(catalog.populate_if_empty(), catalog.populate_if_empty());
        assert!(a.unwrap() ^ b.unwrap());
        assert_eq!(catalog.count_makes().await.unwrap(), SEED_CATALOG.len() as i64);
    }

    #[tokio::test]
    async fn inserted_rows_link_model_to_make() {
        let pool = memory_pool().await;
        let catalog = CatalogStorage::new(pool.clone());

        let mut tx = pool.begin().await.unwrap();
        let make = CatalogStorage::insert_make(&mut tx, "Volvo", "Swedish")
            .await
            .unwrap();
        let model = CatalogStorage::insert_model(
            &mut tx,
            make.id,
            &SeedModel {
                name: "XC90",
                car_type: "SUV",
                year: 2024,
            },
        )
        .await
        .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(make.name, "Volvo");
        assert_eq!(model.car_make_id, make.id);
        assert_eq!(model.year, 2024);
        assert_eq!(model.dealer_id, None);

        let rows = catalog.list_models_with_make().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].make_name, "Volvo");
        assert!(!catalog.populate_if_empty().await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let users = UserStorage::new(memory_pool().await);
        let new_user = || NewUser {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
        };

        let first = users.insert(new_user()).await.unwrap().expect("created");
        assert_eq!(first.username, "alice");
        assert!(users.insert(new_user()).await.unwrap().is_none());
        assert!(users.exists("alice").await.unwrap());
        assert!(users.find_by_username("bob").await.unwrap().is_none());
    }
}
