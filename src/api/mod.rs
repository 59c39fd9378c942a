pub mod auth;
pub mod author;
pub mod books;
pub mod category;
pub mod customer;
pub mod health;
pub mod order;
pub mod ordering;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{DEFAULT_LIMIT, DEFAULT_SKIP, DomainError, Pagination};
use crate::infrastructure::AppState;

/// Handler-level failure, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    /// Absent row; carries the entity name for the message
    NotFound(&'static str),
    Unauthorized,
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Domain(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{} not found", entity)),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            ApiError::Domain(DomainError::NotFound) => {
                (StatusCode::NOT_FOUND, DomainError::NotFound.to_string())
            }
            ApiError::Domain(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Domain(e) => {
                tracing::error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// `skip`/`limit` query parameters shared by every list endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn pagination(&self) -> Result<Pagination, DomainError> {
        Pagination::new(
            self.skip.unwrap_or(DEFAULT_SKIP),
            self.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

pub(crate) fn deleted() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn docs_redirect() -> Redirect {
    Redirect::temporary("/docs")
}

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(docs_redirect))
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/login", post(auth::login))
        // Authors
        .route("/authors", get(author::list_authors).post(author::create_author))
        .route(
            "/authors/:id",
            get(author::get_author)
                .put(author::update_author)
                .delete(author::delete_author),
        )
        // Categories
        .route(
            "/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/categories/:id",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Customers
        .route(
            "/customers",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/customers/:id",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route("/customers/:id/orders_info", get(customer::customer_orders))
        // Orders
        .route("/orders", get(order::list_orders).post(order::create_order))
        .route(
            "/orders/:id",
            get(order::get_order)
                .put(order::update_order)
                .delete(order::delete_order),
        )
        // Order lines
        .route(
            "/orderings",
            get(ordering::list_orderings).post(ordering::create_ordering),
        )
        .route(
            "/orderings/:book_id/:order_id/:customer_id",
            delete(ordering::delete_ordering),
        )
        .with_state(state)
}
