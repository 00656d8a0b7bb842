use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::info;

use crate::middleware::session;
use crate::service::RegisterOutcome;
use crate::types::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::{PortalError, router::PortalState};

/// POST /djangoapp/login
pub async fn login_user(
    State(state): State<PortalState>,
    jar: PrivateCookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, PortalError> {
    match state.auth.authenticate(&req.user_name, &req.password).await? {
        Some(user) => {
            info!(username = %user.username, "user logged in");
            let jar = session::login(jar, &user.username, state.secure_cookie);
            Ok((jar, Json(AuthResponse::authenticated(req.user_name))))
        }
        None => Ok((jar, Json(AuthResponse::anonymous(req.user_name)))),
    }
}

/// GET /djangoapp/logout
pub async fn logout_request(jar: PrivateCookieJar) -> impl IntoResponse {
    (session::logout(jar), Json(AuthResponse::logged_out()))
}

/// POST /djangoapp/register
pub async fn registration(
    State(state): State<PortalState>,
    jar: PrivateCookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, PortalError> {
    let user_name = req.user_name.clone();
    match state.auth.register(req).await? {
        RegisterOutcome::Created(user) => {
            info!(username = %user.username, "user registered");
            let jar = session::login(jar, &user.username, state.secure_cookie);
            Ok((jar, Json(AuthResponse::authenticated(user_name))))
        }
        RegisterOutcome::AlreadyRegistered => {
            Ok((jar, Json(AuthResponse::already_registered(user_name))))
        }
    }
}
