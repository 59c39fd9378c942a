use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::{ApiError, PageParams, deleted};
use crate::domain::OrderingInput;
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/orderings",
    params(PageParams),
    responses((status = 200, description = "Order lines"))
)]
pub async fn list_orderings(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let lines = state.ordering_repo.find_all(params.pagination()?).await?;
    Ok(Json(lines))
}

#[utoipa::path(
    post,
    path = "/orderings",
    responses(
        (status = 201, description = "Line added"),
        (status = 400, description = "Unknown reference or duplicate line")
    )
)]
pub async fn create_ordering(
    State(state): State<AppState>,
    Json(payload): Json<OrderingInput>,
) -> Result<impl IntoResponse, ApiError> {
    let line = state.ordering_repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

#[utoipa::path(
    delete,
    path = "/orderings/{book_id}/{order_id}/{customer_id}",
    params(
        ("book_id" = i32, Path, description = "Book id"),
        ("order_id" = i32, Path, description = "Order id"),
        ("customer_id" = i32, Path, description = "Customer id")
    ),
    responses(
        (status = 200, description = "Line deleted"),
        (status = 404, description = "Ordering not found")
    )
)]
pub async fn delete_ordering(
    State(state): State<AppState>,
    Path((book_id, order_id, customer_id)): Path<(i32, i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    let key = OrderingInput {
        book_id,
        order_id,
        customer_id,
    };

    if state.ordering_repo.delete(key).await? {
        Ok(deleted())
    } else {
        Err(ApiError::NotFound("Ordering"))
    }
}
