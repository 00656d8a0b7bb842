use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;
use tracing::debug;

use crate::router::PortalState;

pub const SESSION_COOKIE: &str = "sessionid";
const SESSION_MAX_AGE_DAYS: i64 = 14;

/// Attach a session for `username` to the jar.
pub fn login(jar: PrivateCookieJar, username: &str, secure: bool) -> PrivateCookieJar {
    let cookie = Cookie::build(Cookie::new(SESSION_COOKIE, username.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build();
    jar.add(cookie)
}

pub fn logout(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

/// The logged-in user, or `None` for anonymous callers.
///
/// A cookie naming a user that no longer exists counts as anonymous.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Option<String>);

impl SessionUser {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    PortalState: FromRef<S>,
    Key: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let Some(username) = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned()) else {
            return Ok(Self(None));
        };

        let portal = PortalState::from_ref(state);
        let exists = portal
            .auth
            .users()
            .exists(&username)
            .await
            .map_err(IntoResponse::into_response)?;
        if !exists {
            debug!(username = %username, "session names an unknown user");
            return Ok(Self(None));
        }
        Ok(Self(Some(username)))
    }
}
