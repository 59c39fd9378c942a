//! Repository implementations using SeaORM

pub mod author_repository;
pub mod book_repository;
pub mod category_repository;
pub mod customer_repository;
pub mod order_repository;
pub mod ordering_repository;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_repository::SeaOrmBookRepository;
pub use category_repository::SeaOrmCategoryRepository;
pub use customer_repository::SeaOrmCustomerRepository;
pub use order_repository::SeaOrmOrderRepository;
pub use ordering_repository::SeaOrmOrderingRepository;
