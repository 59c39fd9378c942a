pub mod author;
pub mod author_book;
pub mod book;
pub mod book_order;
pub mod category;
pub mod customer;
pub mod ordering;

pub use book::Book;
pub use customer::CustomerOut;
