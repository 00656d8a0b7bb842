use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};

use crate::middleware::SessionUser;
use crate::router::PortalState;
use crate::service::dealers::ALL_STATES;
use crate::types::dealers::DealerResponse;
use crate::PortalError;

pub async fn get_all_dealerships(State(state): State<PortalState>) -> Json<DealerResponse> {
    Json(state.dealers.list_dealerships(ALL_STATES).await)
}

pub async fn get_dealerships(
    State(state): State<PortalState>,
    Path(us_state): Path<String>,
) -> Json<DealerResponse> {
    Json(state.dealers.list_dealerships(&us_state).await)
}

pub async fn get_dealer_details(
    State(state): State<PortalState>,
    Path(dealer_id): Path<String>,
) -> Json<DealerResponse> {
    Json(state.dealers.dealer_details(Some(&dealer_id)).await)
}

pub async fn get_dealer_reviews(
    State(state): State<PortalState>,
    Path(dealer_id): Path<String>,
) -> Json<DealerResponse> {
    Json(state.dealers.dealer_reviews(Some(&dealer_id)).await)
}

/// Dealer routes hit without an id.
pub async fn missing_dealer_id() -> Json<DealerResponse> {
    Json(DealerResponse::bad_request())
}

/// Raw body: the session is checked before any JSON parsing.
pub async fn add_review(
    State(state): State<PortalState>,
    user: SessionUser,
    body: Bytes,
) -> Result<Json<DealerResponse>, PortalError> {
    let resp = state
        .dealers
        .add_review(user.is_authenticated(), &body)
        .await?;
    Ok(Json(resp))
}
