use sea_orm::{EntityTrait, PaginatorTrait};

use crate::domain::{AuthorInput, BookInput, CategoryInput, CustomerInput, DomainError, OrderInput};
use crate::infrastructure::AppState;
use crate::models::book;

/// Insert a small demo catalog. Returns `false` when books already exist.
pub async fn seed_demo_data(state: &AppState) -> Result<bool, DomainError> {
    if book::Entity::find().count(state.db()).await? > 0 {
        return Ok(false);
    }

    // 1. Categories
    let fantasy = state
        .category_repo
        .create(CategoryInput {
            description: "Fantasy".to_owned(),
        })
        .await?;
    let scifi = state
        .category_repo
        .create(CategoryInput {
            description: "Science Fiction".to_owned(),
        })
        .await?;

    // 2. Authors
    let mut author_ids = Vec::new();
    for name in ["J.R.R. Tolkien", "Isaac Asimov", "Frank Herbert"] {
        let author = state
            .author_repo
            .create(AuthorInput {
                name: name.to_owned(),
            })
            .await?;
        author_ids.push(author.id);
    }

    // 3. Books
    let books = [
        ("The Hobbit", "978-0547928227", 1937, 15, 310, fantasy.id, author_ids[0]),
        ("The Lord of the Rings", "978-0544003415", 1954, 30, 1178, fantasy.id, author_ids[0]),
        ("Foundation", "978-0553293357", 1951, 10, 255, scifi.id, author_ids[1]),
        ("Dune", "978-0441172719", 1965, 12, 412, scifi.id, author_ids[2]),
    ];

    let mut book_ids = Vec::new();
    for (title, isbn, year, price, pages, category_id, author_id) in books {
        let book = state
            .book_repo
            .create(BookInput {
                category_id,
                title: title.to_owned(),
                isbn: Some(isbn.to_owned()),
                year: Some(year),
                price,
                page_count: Some(pages),
                description: None,
                author_ids: Some(vec![author_id]),
            })
            .await?;
        book_ids.push(book.id);
    }

    // 4. A customer with one order
    let customer = state
        .customer_repo
        .create(CustomerInput {
            first_name: "Demo".to_owned(),
            last_name: "Reader".to_owned(),
            zip_code: None,
            city: Some("Springfield".to_owned()),
            state: None,
            address: None,
            user: Some("demo".to_owned()),
            password: Some("demo".to_owned()),
        })
        .await?;

    state
        .order_repo
        .create(OrderInput {
            customer_id: customer.id,
            order_date: Some(chrono::Utc::now().date_naive()),
            book_ids: vec![book_ids[0], book_ids[3]],
        })
        .await?;

    Ok(true)
}
