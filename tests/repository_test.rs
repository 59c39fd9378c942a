use bookstore::db;
use bookstore::domain::{
    AuthorInput, BookFilter, BookInput, BookPredicate, CategoryInput, CustomerInput, DomainError,
    OrderInput, OrderItem, OrderingInput, Pagination,
};
use bookstore::infrastructure::AppState;
use bookstore::models::{book_order, ordering};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

// Helper to create a test app state over an in-memory database
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

async fn create_test_category(state: &AppState, description: &str) -> i32 {
    state
        .category_repo
        .create(CategoryInput {
            description: description.to_string(),
        })
        .await
        .expect("Failed to create category")
        .id
}

async fn create_test_author(state: &AppState, name: &str) -> i32 {
    state
        .author_repo
        .create(AuthorInput {
            name: name.to_string(),
        })
        .await
        .expect("Failed to create author")
        .id
}

fn book_input(category_id: i32, title: &str, price: i32, author_ids: Vec<i32>) -> BookInput {
    BookInput {
        category_id,
        title: title.to_string(),
        isbn: None,
        year: Some(2000),
        price,
        page_count: None,
        description: None,
        author_ids: Some(author_ids),
    }
}

async fn create_test_book(state: &AppState, category_id: i32, title: &str, price: i32) -> i32 {
    state
        .book_repo
        .create(book_input(category_id, title, price, vec![]))
        .await
        .expect("Failed to create book")
        .id
}

fn customer_input(user: &str, password: &str) -> CustomerInput {
    CustomerInput {
        first_name: "Alice".to_string(),
        last_name: "Liddell".to_string(),
        zip_code: Some("OX1".to_string()),
        city: Some("Oxford".to_string()),
        state: None,
        address: None,
        user: Some(user.to_string()),
        password: Some(password.to_string()),
    }
}

async fn create_test_customer(state: &AppState, user: &str, password: &str) -> i32 {
    state
        .customer_repo
        .create(customer_input(user, password))
        .await
        .expect("Failed to create customer")
        .id
}

async fn count_lines_for_order(state: &AppState, order_id: i32) -> u64 {
    ordering::Entity::find()
        .filter(ordering::Column::OrderId.eq(order_id))
        .count(state.db())
        .await
        .expect("DB error")
}

#[tokio::test]
async fn test_created_book_is_readable_with_projection() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "Fantasy").await;
    let tolkien = create_test_author(&state, "J.R.R. Tolkien").await;
    let christopher = create_test_author(&state, "Christopher Tolkien").await;

    let first = create_test_book(&state, category_id, "The Hobbit", 15).await;
    let created = state
        .book_repo
        .create(book_input(
            category_id,
            "The Silmarillion",
            20,
            vec![tolkien, christopher],
        ))
        .await
        .expect("Failed to create book");

    assert_ne!(created.id, first);
    assert_eq!(
        created.author.as_deref(),
        Some("J.R.R. Tolkien, Christopher Tolkien")
    );
    assert_eq!(created.category.as_deref(), Some("Fantasy"));

    let fetched = state
        .book_repo
        .find_by_id(created.id)
        .await
        .expect("DB error")
        .expect("Book should exist");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_book_with_unknown_category_is_rejected() {
    let state = setup_test_state().await;

    let result = state
        .book_repo
        .create(book_input(42, "Orphan", 5, vec![]))
        .await;

    assert!(matches!(result, Err(DomainError::ConstraintViolation(_))));
    let all = state
        .book_repo
        .find_all(Pagination::default())
        .await
        .expect("DB error");
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let state = setup_test_state().await;
    let fantasy = create_test_category(&state, "Fantasy").await;
    let classics = create_test_category(&state, "Classics").await;
    let author = create_test_author(&state, "Someone").await;
    let other = create_test_author(&state, "Someone Else").await;

    let created = state
        .book_repo
        .create(BookInput {
            isbn: Some("111".to_string()),
            description: Some("old".to_string()),
            ..book_input(fantasy, "Draft", 10, vec![author])
        })
        .await
        .expect("Failed to create book");

    let input = BookInput {
        category_id: classics,
        title: "Final".to_string(),
        isbn: None,
        year: None,
        price: 12,
        page_count: Some(300),
        description: None,
        author_ids: Some(vec![other]),
    };
    let updated = state
        .book_repo
        .update(created.id, input.clone())
        .await
        .expect("DB error")
        .expect("Book should exist");

    let fetched = state
        .book_repo
        .find_by_id(created.id)
        .await
        .expect("DB error")
        .expect("Book should exist");
    assert_eq!(fetched, updated);
    assert_eq!(fetched.category_id, input.category_id);
    assert_eq!(fetched.title, input.title);
    assert_eq!(fetched.isbn, None);
    assert_eq!(fetched.year, None);
    assert_eq!(fetched.price, 12);
    assert_eq!(fetched.page_count, Some(300));
    assert_eq!(fetched.description, None);
    assert_eq!(fetched.author.as_deref(), Some("Someone Else"));
    assert_eq!(fetched.category.as_deref(), Some("Classics"));
}

#[tokio::test]
async fn test_update_without_author_list_keeps_authors() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "Poetry").await;
    let author = create_test_author(&state, "Keats").await;

    let created = state
        .book_repo
        .create(book_input(category_id, "Odes", 8, vec![author]))
        .await
        .expect("Failed to create book");

    let updated = state
        .book_repo
        .update(
            created.id,
            BookInput {
                author_ids: None,
                ..book_input(category_id, "Odes (revised)", 9, vec![])
            },
        )
        .await
        .expect("DB error")
        .expect("Book should exist");

    assert_eq!(updated.author.as_deref(), Some("Keats"));

    let cleared = state
        .book_repo
        .update(created.id, book_input(category_id, "Odes", 9, vec![]))
        .await
        .expect("DB error")
        .expect("Book should exist");
    assert_eq!(cleared.author, None);
}

#[tokio::test]
async fn test_update_and_delete_unknown_ids_signal_absence() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "Misc").await;
    let book_id = create_test_book(&state, category_id, "Only", 1).await;

    let updated = state
        .author_repo
        .update(
            999,
            AuthorInput {
                name: "Ghost".to_string(),
            },
        )
        .await
        .expect("DB error");
    assert!(updated.is_none());

    assert!(!state.book_repo.delete(999).await.expect("DB error"));
    assert!(!state.customer_repo.delete(999).await.expect("DB error"));
    assert!(state.book_repo.find_by_id(book_id).await.expect("DB error").is_some());

    assert!(state.book_repo.delete(book_id).await.expect("DB error"));
    assert!(state.book_repo.find_by_id(book_id).await.expect("DB error").is_none());
    assert!(!state.book_repo.delete(book_id).await.expect("DB error"));
}

#[tokio::test]
async fn test_category_in_use_cannot_be_deleted() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "Referenced").await;
    let book_id = create_test_book(&state, category_id, "Survivor", 3).await;

    let result = state.category_repo.delete(category_id).await;
    assert!(matches!(result, Err(DomainError::ConstraintViolation(_))));

    let book = state
        .book_repo
        .find_by_id(book_id)
        .await
        .expect("DB error")
        .expect("Book should still exist");
    assert_eq!(book.category.as_deref(), Some("Referenced"));

    assert!(state.book_repo.delete(book_id).await.expect("DB error"));
    assert!(state.category_repo.delete(category_id).await.expect("DB error"));
}

#[tokio::test]
async fn test_find_books_without_filters_matches_list() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "General").await;
    for i in 0..5 {
        create_test_book(&state, category_id, &format!("Book {}", i), 10 + i).await;
    }

    let page = Pagination::new(0, 100).unwrap();
    let listed = state.book_repo.find_all(page).await.expect("DB error");
    let found = state
        .book_repo
        .find_books(BookFilter::new(), page)
        .await
        .expect("DB error");

    assert_eq!(listed.len(), 5);
    assert_eq!(found, listed);

    let ids: Vec<i32> = listed.iter().map(|b| b.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn test_find_books_title_is_case_insensitive_substring() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "Fantasy").await;
    create_test_book(&state, category_id, "The Lord of the Rings", 30).await;
    create_test_book(&state, category_id, "warlord's Tale", 10).await;
    create_test_book(&state, category_id, "Fellowship", 12).await;

    let found = state
        .book_repo
        .find_books(
            BookFilter::new().with(BookPredicate::TitleContains("lord".to_string())),
            Pagination::default(),
        )
        .await
        .expect("DB error");

    let titles: Vec<&str> = found.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["The Lord of the Rings", "warlord's Tale"]);
}

#[tokio::test]
async fn test_find_books_combines_predicates_before_paging() {
    let state = setup_test_state().await;
    let fantasy = create_test_category(&state, "Fantasy").await;
    let scifi = create_test_category(&state, "Science Fiction").await;
    let herbert = create_test_author(&state, "Frank Herbert").await;
    let asimov = create_test_author(&state, "Isaac Asimov").await;

    let dune = state
        .book_repo
        .create(book_input(scifi, "Dune", 12, vec![herbert]))
        .await
        .expect("Failed to create book");
    let messiah = state
        .book_repo
        .create(book_input(scifi, "Dune Messiah", 25, vec![herbert]))
        .await
        .expect("Failed to create book");
    state
        .book_repo
        .create(book_input(scifi, "Foundation", 10, vec![asimov]))
        .await
        .expect("Failed to create book");
    create_test_book(&state, fantasy, "The Hobbit", 15).await;

    let by_author = state
        .book_repo
        .find_books(
            BookFilter::new().with(BookPredicate::Author(herbert)),
            Pagination::default(),
        )
        .await
        .expect("DB error");
    assert_eq!(
        by_author.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![dune.id, messiah.id]
    );

    let cheap_scifi = state
        .book_repo
        .find_books(
            BookFilter::new()
                .with(BookPredicate::Category(scifi))
                .with(BookPredicate::MinPrice(11))
                .with(BookPredicate::MaxPrice(20)),
            Pagination::default(),
        )
        .await
        .expect("DB error");
    assert_eq!(cheap_scifi.len(), 1);
    assert_eq!(cheap_scifi[0].title, "Dune");

    // Paging applies to the filtered set
    let second_page = state
        .book_repo
        .find_books(
            BookFilter::new().with(BookPredicate::Category(scifi)),
            Pagination::new(1, 1).unwrap(),
        )
        .await
        .expect("DB error");
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].id, messiah.id);

    let by_year = state
        .book_repo
        .find_books(
            BookFilter::new().with(BookPredicate::Year(1999)),
            Pagination::default(),
        )
        .await
        .expect("DB error");
    assert!(by_year.is_empty());
}

#[tokio::test]
async fn test_create_order_writes_one_line_per_book() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "General").await;
    let customer_id = create_test_customer(&state, "alice", "correct").await;
    let mut book_ids = Vec::new();
    for title in ["A", "B", "C"] {
        book_ids.push(create_test_book(&state, category_id, title, 5).await);
    }

    let order = state
        .order_repo
        .create(OrderInput {
            customer_id,
            order_date: None,
            book_ids: book_ids.clone(),
        })
        .await
        .expect("Failed to create order");

    let lines = ordering::Entity::find()
        .filter(ordering::Column::OrderId.eq(order.id))
        .all(state.db())
        .await
        .expect("DB error");
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.customer_id == customer_id));
}

#[tokio::test]
async fn test_create_order_with_invalid_book_writes_nothing() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "General").await;
    let customer_id = create_test_customer(&state, "alice", "correct").await;
    let first = create_test_book(&state, category_id, "Real", 5).await;
    let third = create_test_book(&state, category_id, "Also real", 6).await;

    let result = state
        .order_repo
        .create(OrderInput {
            customer_id,
            order_date: None,
            book_ids: vec![first, 9999, third],
        })
        .await;

    assert!(matches!(result, Err(DomainError::ConstraintViolation(_))));
    let orders = book_order::Entity::find()
        .count(state.db())
        .await
        .expect("DB error");
    let lines = ordering::Entity::find()
        .count(state.db())
        .await
        .expect("DB error");
    assert_eq!(orders, 0);
    assert_eq!(lines, 0);
}

#[tokio::test]
async fn test_create_order_for_unknown_customer_is_rejected() {
    let state = setup_test_state().await;

    let result = state
        .order_repo
        .create(OrderInput {
            customer_id: 77,
            order_date: None,
            book_ids: vec![],
        })
        .await;

    assert!(matches!(result, Err(DomainError::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_delete_order_removes_its_lines() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "General").await;
    let customer_id = create_test_customer(&state, "alice", "correct").await;
    let a = create_test_book(&state, category_id, "A", 5).await;
    let b = create_test_book(&state, category_id, "B", 6).await;

    let doomed = state
        .order_repo
        .create(OrderInput {
            customer_id,
            order_date: None,
            book_ids: vec![a, b],
        })
        .await
        .expect("Failed to create order");
    let kept = state
        .order_repo
        .create(OrderInput {
            customer_id,
            order_date: None,
            book_ids: vec![a],
        })
        .await
        .expect("Failed to create order");
    assert_eq!(count_lines_for_order(&state, doomed.id).await, 2);

    assert!(state.order_repo.delete(doomed.id).await.expect("DB error"));

    assert_eq!(count_lines_for_order(&state, doomed.id).await, 0);
    assert_eq!(count_lines_for_order(&state, kept.id).await, 1);
    assert!(
        state
            .order_repo
            .find_by_id(doomed.id)
            .await
            .expect("DB error")
            .is_none()
    );
    assert!(!state.order_repo.delete(doomed.id).await.expect("DB error"));
}

#[tokio::test]
async fn test_customer_orders_lists_titles_and_prices() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "General").await;
    let customer_id = create_test_customer(&state, "alice", "correct").await;
    let other_customer = create_test_customer(&state, "bob", "secret").await;
    let dune = create_test_book(&state, category_id, "Dune", 12).await;
    let emma = create_test_book(&state, category_id, "Emma", 8).await;

    let first = state
        .order_repo
        .create(OrderInput {
            customer_id,
            order_date: None,
            book_ids: vec![dune],
        })
        .await
        .expect("Failed to create order");
    let second = state
        .order_repo
        .create(OrderInput {
            customer_id,
            order_date: None,
            book_ids: vec![emma],
        })
        .await
        .expect("Failed to create order");
    state
        .order_repo
        .create(OrderInput {
            customer_id: other_customer,
            order_date: None,
            book_ids: vec![dune, emma],
        })
        .await
        .expect("Failed to create order");

    let history = state
        .order_repo
        .customer_orders(customer_id)
        .await
        .expect("DB error");

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].order_id, first.id);
    assert_eq!(
        history[0].items,
        vec![OrderItem {
            title: "Dune".to_string(),
            price: 12
        }]
    );
    assert_eq!(history[1].order_id, second.id);
    assert_eq!(
        history[1].items,
        vec![OrderItem {
            title: "Emma".to_string(),
            price: 8
        }]
    );

    let lonely = create_test_customer(&state, "carol", "pw").await;
    let none = state
        .order_repo
        .customer_orders(lonely)
        .await
        .expect("DB error");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_authenticate_does_not_distinguish_failures() {
    let state = setup_test_state().await;
    let alice = create_test_customer(&state, "alice", "correct").await;

    let ok = state
        .customer_repo
        .authenticate("alice", "correct")
        .await
        .expect("DB error");
    assert_eq!(ok.map(|c| c.id), Some(alice));

    let wrong_password = state
        .customer_repo
        .authenticate("alice", "wrong")
        .await
        .expect("DB error");
    let unknown_user = state
        .customer_repo
        .authenticate("bob", "anything")
        .await
        .expect("DB error");
    assert!(wrong_password.is_none());
    assert!(unknown_user.is_none());
}

#[tokio::test]
async fn test_ordering_rejects_duplicates_and_unknown_references() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "General").await;
    let customer_id = create_test_customer(&state, "alice", "correct").await;
    let book_id = create_test_book(&state, category_id, "A", 5).await;
    let order = state
        .order_repo
        .create(OrderInput {
            customer_id,
            order_date: None,
            book_ids: vec![],
        })
        .await
        .expect("Failed to create order");

    let line = OrderingInput {
        book_id,
        order_id: order.id,
        customer_id,
    };
    state
        .ordering_repo
        .create(line)
        .await
        .expect("Failed to create ordering");

    let duplicate = state.ordering_repo.create(line).await;
    assert!(matches!(duplicate, Err(DomainError::ConstraintViolation(_))));

    let dangling = state
        .ordering_repo
        .create(OrderingInput {
            order_id: 555,
            ..line
        })
        .await;
    assert!(matches!(dangling, Err(DomainError::ConstraintViolation(_))));

    let listed = state
        .ordering_repo
        .find_all(Pagination::default())
        .await
        .expect("DB error");
    assert_eq!(listed.len(), 1);

    assert!(state.ordering_repo.delete(line).await.expect("DB error"));
    assert!(!state.ordering_repo.delete(line).await.expect("DB error"));
}

#[tokio::test]
async fn test_list_pages_in_id_order() {
    let state = setup_test_state().await;
    for name in ["Austen", "Borges", "Calvino", "Dickens"] {
        create_test_author(&state, name).await;
    }

    let page = state
        .author_repo
        .find_all(Pagination::new(1, 2).unwrap())
        .await
        .expect("DB error");

    let names: Vec<&str> = page.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Borges", "Calvino"]);
}

#[tokio::test]
async fn test_seed_runs_once() {
    let state = setup_test_state().await;

    assert!(bookstore::seed::seed_demo_data(&state).await.expect("Seed failed"));
    assert!(!bookstore::seed::seed_demo_data(&state).await.expect("Seed failed"));

    let books = state
        .book_repo
        .find_all(Pagination::default())
        .await
        .expect("DB error");
    assert_eq!(books.len(), 4);
    assert!(books.iter().all(|b| b.author.is_some() && b.category.is_some()));
}

#[tokio::test]
async fn test_find_books_title_folds_non_ascii_case() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "Théâtre").await;
    let ecole = create_test_book(&state, category_id, "École des femmes", 9).await;
    create_test_book(&state, category_id, "Le Misanthrope", 7).await;
    let buissonniere = create_test_book(&state, category_id, "L'école buissonnière", 5).await;

    for needle in ["École", "école", "ÉCOLE", "cole"] {
        let found = state
            .book_repo
            .find_books(
                BookFilter::new().with(BookPredicate::TitleContains(needle.to_string())),
                Pagination::default(),
            )
            .await
            .expect("DB error");
        let ids: Vec<i32> = found.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![ecole, buissonniere], "needle {:?}", needle);
    }

    // Paging counts matching books only
    let second = state
        .book_repo
        .find_books(
            BookFilter::new()
                .with(BookPredicate::TitleContains("école".to_string()))
                .with(BookPredicate::MaxPrice(9)),
            Pagination::new(1, 1).unwrap(),
        )
        .await
        .expect("DB error");
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, buissonniere);
}

#[tokio::test]
async fn test_deleting_author_unlinks_books() {
    let state = setup_test_state().await;
    let category_id = create_test_category(&state, "Fantasy").await;
    let tolkien = create_test_author(&state, "J.R.R. Tolkien").await;

    let hobbit = state
        .book_repo
        .create(book_input(category_id, "The Hobbit", 15, vec![tolkien]))
        .await
        .expect("Failed to create book");
    assert_eq!(hobbit.author.as_deref(), Some("J.R.R. Tolkien"));

    assert!(state.author_repo.delete(tolkien).await.expect("DB error"));
    assert!(
        state
            .author_repo
            .find_by_id(tolkien)
            .await
            .expect("DB error")
            .is_none()
    );

    let book = state
        .book_repo
        .find_by_id(hobbit.id)
        .await
        .expect("DB error")
        .expect("Book should survive its author");
    assert_eq!(book.author, None);

    let by_author = state
        .book_repo
        .find_books(
            BookFilter::new().with(BookPredicate::Author(tolkien)),
            Pagination::default(),
        )
        .await
        .expect("DB error");
    assert!(by_author.is_empty());
    assert!(!state.author_repo.delete(tolkien).await.expect("DB error"));
}
