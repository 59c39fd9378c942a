use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::{ApiError, PageParams, deleted};
use crate::domain::OrderInput;
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/orders",
    params(PageParams),
    responses((status = 200, description = "Orders ordered by id"))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state.order_repo.find_all(params.pagination()?).await?;
    Ok(Json(orders))
}

/// Create an order; `bookIDs` become its lines in the same transaction
#[utoipa::path(
    post,
    path = "/orders",
    responses(
        (status = 201, description = "Order and lines created"),
        (status = 400, description = "Unknown customer or book; nothing was written")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderInput>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.order_repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .order_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Order"))
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order updated"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<OrderInput>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .order_repo
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Order"))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order and its lines deleted"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if state.order_repo.delete(id).await? {
        Ok(deleted())
    } else {
        Err(ApiError::NotFound("Order"))
    }
}
