//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DomainError;
use crate::models::Book;
use crate::models::{author, book_order, category, customer, ordering};

const NAME_MAX: usize = 45;
const BOOK_DESCRIPTION_MAX: usize = 500;

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;

/// Offset/limit window over a primary-key ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: u64,
}

impl Pagination {
    /// Build a window, rejecting negative bounds.
    pub fn new(skip: i64, limit: i64) -> Result<Self, DomainError> {
        if skip < 0 {
            return Err(DomainError::Validation(format!(
                "skip must not be negative (got {})",
                skip
            )));
        }
        if limit < 0 {
            return Err(DomainError::Validation(format!(
                "limit must not be negative (got {})",
                limit
            )));
        }
        Ok(Self {
            skip: skip as u64,
            limit: limit as u64,
        })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP as u64,
            limit: DEFAULT_LIMIT as u64,
        }
    }
}

/// One narrowing condition of a book search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookPredicate {
    /// Book is associated with this author id
    Author(i32),
    /// Book belongs to this category id
    Category(i32),
    /// Case-insensitive substring of the title
    TitleContains(String),
    Year(i32),
    /// Price at least this value
    MinPrice(i32),
    /// Price at most this value
    MaxPrice(i32),
}

/// Conjunction of book predicates. No predicates means every book.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookFilter {
    predicates: Vec<BookPredicate>,
}

impl BookFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate. Empty title fragments are dropped.
    pub fn with(mut self, predicate: BookPredicate) -> Self {
        if let BookPredicate::TitleContains(text) = &predicate
            && text.is_empty()
        {
            return self;
        }
        self.predicates.push(predicate);
        self
    }

    /// Add a predicate only when a value is present.
    pub fn with_opt<T>(self, value: Option<T>, make: impl FnOnce(T) -> BookPredicate) -> Self {
        match value {
            Some(v) => self.with(make(v)),
            None => self,
        }
    }

    pub fn predicates(&self) -> &[BookPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

fn require_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    check_len(field, value, max)
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInput {
    #[serde(rename = "authorName")]
    pub name: String,
}

impl AuthorInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("authorName", &self.name, NAME_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    #[serde(rename = "categoryDescription")]
    pub description: String,
}

impl CategoryInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("categoryDescription", &self.description, NAME_MAX)
    }
}

/// Book fields plus the author set to associate.
///
/// `author_ids: None` on update keeps the current associations; `Some`
/// replaces them, so `Some(vec![])` clears them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    #[serde(rename = "categoryID")]
    pub category_id: i32,
    pub title: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    pub price: i32,
    #[serde(rename = "noPages", default)]
    pub page_count: Option<i32>,
    #[serde(rename = "bookDescription", default)]
    pub description: Option<String>,
    #[serde(rename = "authorIDs", default)]
    pub author_ids: Option<Vec<i32>>,
}

impl BookInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title, NAME_MAX)?;
        if let Some(isbn) = &self.isbn {
            check_len("isbn", isbn, NAME_MAX)?;
        }
        if let Some(description) = &self.description {
            check_len("bookDescription", description, BOOK_DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "zipCode", default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CustomerInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("firstName", &self.first_name, NAME_MAX)?;
        require_text("lastName", &self.last_name, NAME_MAX)?;
        let optional = [
            ("zipCode", &self.zip_code, NAME_MAX),
            ("city", &self.city, NAME_MAX),
            ("state", &self.state, NAME_MAX),
            ("address", &self.address, 100),
            ("user", &self.user, NAME_MAX),
            ("password", &self.password, NAME_MAX),
        ];
        for (field, value, max) in optional {
            if let Some(v) = value {
                check_len(field, v, max)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInput {
    #[serde(rename = "customerID")]
    pub customer_id: i32,
    #[serde(rename = "orderDate", default)]
    pub order_date: Option<NaiveDate>,
    /// One order line is written per id on create; ignored on update
    #[serde(rename = "bookIDs", default)]
    pub book_ids: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingInput {
    #[serde(rename = "bookID")]
    pub book_id: i32,
    #[serde(rename = "orderID")]
    pub order_id: i32,
    #[serde(rename = "customerid")]
    pub customer_id: i32,
}

/// One line of a customer's order history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub title: String,
    pub price: i32,
}

/// An order with its resolved lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    #[serde(rename = "orderID")]
    pub order_id: i32,
    pub items: Vec<OrderItem>,
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// List authors by id
    async fn find_all(&self, page: Pagination) -> Result<Vec<author::Model>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<author::Model>, DomainError>;

    /// Create a new author
    async fn create(&self, input: AuthorInput) -> Result<author::Model, DomainError>;

    /// Rename an author
    async fn update(
        &self,
        id: i32,
        input: AuthorInput,
    ) -> Result<Option<author::Model>, DomainError>;

    /// Delete an author by ID, reporting whether it existed
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

/// Repository trait for Category entity
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self, page: Pagination) -> Result<Vec<category::Model>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>, DomainError>;

    async fn create(&self, input: CategoryInput) -> Result<category::Model, DomainError>;

    async fn update(
        &self,
        id: i32,
        input: CategoryInput,
    ) -> Result<Option<category::Model>, DomainError>;

    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

/// Repository trait for Book entity
///
/// Every read returns the flat [`Book`] projection.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books by id
    async fn find_all(&self, page: Pagination) -> Result<Vec<Book>, DomainError>;

    /// Books matching every predicate of the filter, paged after filtering
    async fn find_books(&self, filter: BookFilter, page: Pagination)
    -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Create a book and its author associations atomically
    async fn create(&self, input: BookInput) -> Result<Book, DomainError>;

    /// Replace a book's fields (and author set, if given) atomically
    async fn update(&self, id: i32, input: BookInput) -> Result<Option<Book>, DomainError>;

    /// Delete a book and its author associations
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

/// Repository trait for Customer entity
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self, page: Pagination) -> Result<Vec<customer::Model>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<customer::Model>, DomainError>;

    async fn create(&self, input: CustomerInput) -> Result<customer::Model, DomainError>;

    async fn update(
        &self,
        id: i32,
        input: CustomerInput,
    ) -> Result<Option<customer::Model>, DomainError>;

    async fn delete(&self, id: i32) -> Result<bool, DomainError>;

    /// Customer whose username and password both match exactly.
    ///
    /// Unknown user and wrong password are both `None`.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<customer::Model>, DomainError>;
}

/// Repository trait for BookOrder entity and its lines
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self, page: Pagination) -> Result<Vec<book_order::Model>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<book_order::Model>, DomainError>;

    /// Insert the order and one line per book id in a single transaction
    async fn create(&self, input: OrderInput) -> Result<book_order::Model, DomainError>;

    /// Replace customer and date; lines are left alone
    async fn update(
        &self,
        id: i32,
        input: OrderInput,
    ) -> Result<Option<book_order::Model>, DomainError>;

    /// Delete the order's lines, then the order, in a single transaction
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;

    /// Orders of a customer with each line's book title and price
    async fn customer_orders(&self, customer_id: i32) -> Result<Vec<CustomerOrder>, DomainError>;
}

/// Repository trait for Ordering (order line) rows
#[async_trait]
pub trait OrderingRepository: Send + Sync {
    async fn find_all(&self, page: Pagination) -> Result<Vec<ordering::Model>, DomainError>;

    async fn create(&self, input: OrderingInput) -> Result<ordering::Model, DomainError>;

    async fn delete(&self, key: OrderingInput) -> Result<bool, DomainError>;
}
