use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::{ApiError, PageParams, deleted};
use crate::domain::CategoryInput;
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/categories",
    params(PageParams),
    responses((status = 200, description = "Categories ordered by id"))
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.category_repo.find_all(params.pagination()?).await?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/categories",
    responses((status = 201, description = "Category created"))
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryInput>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state.category_repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .category_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Category"))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category updated"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryInput>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .category_repo
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Category"))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if state.category_repo.delete(id).await? {
        Ok(deleted())
    } else {
        Err(ApiError::NotFound("Category"))
    }
}
