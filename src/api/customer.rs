use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::{ApiError, PageParams, deleted};
use crate::domain::CustomerInput;
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/customers",
    params(PageParams),
    responses((status = 200, description = "Customers ordered by id"))
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = state.customer_repo.find_all(params.pagination()?).await?;
    Ok(Json(customers))
}

#[utoipa::path(
    post,
    path = "/customers",
    responses((status = 201, description = "Customer created"))
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CustomerInput>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.customer_repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .customer_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Customer"))
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer updated"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CustomerInput>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .customer_repo
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Customer"))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if state.customer_repo.delete(id).await? {
        Ok(deleted())
    } else {
        Err(ApiError::NotFound("Customer"))
    }
}

/// Order history with line titles and prices
#[utoipa::path(
    get,
    path = "/customers/{id}/orders_info",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "One entry per order, possibly empty"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn customer_orders(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if state.customer_repo.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound("Customer"));
    }

    let orders = state.order_repo.customer_orders(id).await?;
    Ok(Json(orders))
}
