//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    AuthorRepository, BookRepository, CategoryRepository, CustomerRepository, OrderRepository,
    OrderingRepository,
};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookRepository, SeaOrmCategoryRepository,
    SeaOrmCustomerRepository, SeaOrmOrderRepository, SeaOrmOrderingRepository,
};

/// Application state shared across all handlers
///
/// Built once at startup from the connection pool and handed to the router;
/// there is no global connection.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub author_repo: Arc<dyn AuthorRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub book_repo: Arc<dyn BookRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub ordering_repo: Arc<dyn OrderingRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            author_repo: Arc::new(SeaOrmAuthorRepository::new(db.clone())),
            category_repo: Arc::new(SeaOrmCategoryRepository::new(db.clone())),
            book_repo: Arc::new(SeaOrmBookRepository::new(db.clone())),
            customer_repo: Arc::new(SeaOrmCustomerRepository::new(db.clone())),
            order_repo: Arc::new(SeaOrmOrderRepository::new(db.clone())),
            ordering_repo: Arc::new(SeaOrmOrderingRepository::new(db.clone())),
            db,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
