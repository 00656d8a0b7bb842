use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;

use crate::api::RestApi;
use crate::config::Config;
use crate::db::{CatalogStorage, SqlitePool, UserStorage};
use crate::error::PortalError;
use crate::handlers;
use crate::service::{AuthService, CatalogService, DealerService};

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct PortalState {
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub dealers: DealerService,
    pub cookie_key: Key,
    pub secure_cookie: bool,
}

impl PortalState {
    pub fn new(pool: SqlitePool, api: RestApi, cookie_key: Key, secure_cookie: bool) -> Self {
        Self {
            auth: AuthService::new(UserStorage::new(pool.clone())),
            catalog: CatalogService::new(CatalogStorage::new(pool)),
            dealers: DealerService::new(api),
            cookie_key,
            secure_cookie,
        }
    }

    /// Build the state from config; the gateway gets the upstream section.
    pub fn from_config(pool: SqlitePool, cfg: &Config) -> Result<Self, PortalError> {
        let api = RestApi::new(&cfg.upstream)?;
        let key = cookie_key(cfg.basic.cookie_secret.as_deref())?;
        Ok(Self::new(pool, api, key, !cfg.basic.insecure_cookie))
    }
}

impl FromRef<PortalState> for Key {
    fn from_ref(state: &PortalState) -> Self {
        state.cookie_key.clone()
    }
}

/// Key from the configured secret, or a random one when none is set.
pub fn cookie_key(secret: Option<&str>) -> Result<Key, PortalError> {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|e| PortalError::InvalidCookieKey(format!("{e:?}"))),
        None => {
            tracing::warn!("no cookie secret configured; sessions end on restart");
            Ok(Key::generate())
        }
    }
}

pub fn portal_router(state: PortalState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/djangoapp/login", post(handlers::auth::login_user))
        .route("/djangoapp/logout", get(handlers::auth::logout_request))
        .route("/djangoapp/register", post(handlers::auth::registration))
        .route("/djangoapp/get_cars", get(handlers::catalog::get_cars))
        .route(
            "/djangoapp/get_dealers",
            get(handlers::dealers::get_all_dealerships),
        )
        .route(
            "/djangoapp/get_dealers/{state}",
            get(handlers::dealers::get_dealerships),
        )
        .route(
            "/djangoapp/dealer/",
            get(handlers::dealers::missing_dealer_id),
        )
        .route(
            "/djangoapp/dealer/{dealer_id}",
            get(handlers::dealers::get_dealer_details),
        )
        .route(
            "/djangoapp/reviews/dealer/",
            get(handlers::dealers::missing_dealer_id),
        )
        .route(
            "/djangoapp/reviews/dealer/{dealer_id}",
            get(handlers::dealers::get_dealer_reviews),
        )
        .route("/djangoapp/add_review", post(handlers::dealers::add_review))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
