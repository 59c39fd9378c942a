use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::{ApiError, PageParams, deleted};
use crate::domain::AuthorInput;
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/authors",
    params(PageParams),
    responses(
        (status = 200, description = "Authors ordered by id"),
        (status = 400, description = "Negative skip or limit")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let authors = state.author_repo.find_all(params.pagination()?).await?;
    Ok(Json(authors))
}

#[utoipa::path(
    post,
    path = "/authors",
    responses(
        (status = 201, description = "Author created"),
        (status = 400, description = "Invalid name")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<AuthorInput>,
) -> Result<impl IntoResponse, ApiError> {
    let author = state.author_repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author found"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    match state.author_repo.find_by_id(id).await? {
        Some(author) => Ok(Json(author)),
        None => Err(ApiError::NotFound("Author")),
    }
}

#[utoipa::path(
    put,
    path = "/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author updated"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AuthorInput>,
) -> Result<impl IntoResponse, ApiError> {
    match state.author_repo.update(id, payload).await? {
        Some(author) => Ok(Json(author)),
        None => Err(ApiError::NotFound("Author")),
    }
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if state.author_repo.delete(id).await? {
        Ok(deleted())
    } else {
        Err(ApiError::NotFound("Author"))
    }
}
