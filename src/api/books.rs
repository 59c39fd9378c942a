use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{ApiError, PageParams, deleted};
use crate::domain::{BookFilter, BookInput, BookPredicate};
use crate::infrastructure::AppState;

/// Search parameters for `GET /books`. Every filter is optional.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    /// Case-insensitive title fragment
    pub title: Option<String>,
    pub year: Option<i32>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

impl BookQuery {
    pub fn filter(&self) -> BookFilter {
        BookFilter::new()
            .with_opt(self.author_id, BookPredicate::Author)
            .with_opt(self.category_id, BookPredicate::Category)
            .with_opt(self.title.clone(), BookPredicate::TitleContains)
            .with_opt(self.year, BookPredicate::Year)
            .with_opt(self.min_price, BookPredicate::MinPrice)
            .with_opt(self.max_price, BookPredicate::MaxPrice)
    }

    fn page(&self) -> PageParams {
        PageParams {
            skip: self.skip,
            limit: self.limit,
        }
    }
}

#[utoipa::path(
    get,
    path = "/books",
    params(BookQuery),
    responses(
        (status = 200, description = "Books matching every supplied filter"),
        (status = 400, description = "Negative skip or limit")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query.page().pagination()?;
    let books = state.book_repo.find_books(query.filter(), page).await?;
    Ok(Json(books))
}

#[utoipa::path(
    post,
    path = "/books",
    responses(
        (status = 201, description = "Book created"),
        (status = 400, description = "Invalid fields or unknown category")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<BookInput>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.book_repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .book_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Book"))
}

#[utoipa::path(
    put,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Invalid fields or unknown category"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BookInput>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .book_repo
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Book"))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if state.book_repo.delete(id).await? {
        Ok(deleted())
    } else {
        Err(ApiError::NotFound("Book"))
    }
}
