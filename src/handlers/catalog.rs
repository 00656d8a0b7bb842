use axum::{Json, extract::State};

use crate::types::catalog::CarsResponse;
use crate::{PortalError, router::PortalState};

/// GET /djangoapp/get_cars
pub async fn get_cars(State(state): State<PortalState>) -> Result<Json<CarsResponse>, PortalError> {
    Ok(Json(state.catalog.list_cars().await?))
}
