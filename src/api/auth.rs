use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;

use super::ApiError;
use crate::infrastructure::AppState;
use crate::models::CustomerOut;

#[derive(Deserialize)]
pub struct LoginRequest {
    user: String,
    password: String,
}

#[utoipa::path(
    post,
    path = "/login",
    responses(
        (status = 200, description = "Customer profile without password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Login attempt for user: {}", payload.user);

    match state
        .customer_repo
        .authenticate(&payload.user, &payload.password)
        .await?
    {
        Some(customer) => Ok(Json(CustomerOut::from(customer))),
        None => {
            tracing::warn!("Login failed for user: {}", payload.user);
            Err(ApiError::Unauthorized)
        }
    }
}
