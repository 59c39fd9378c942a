//! SeaORM implementation of BookRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::{
    BookFilter, BookInput, BookPredicate, BookRepository, DomainError, Pagination,
};
use crate::infrastructure::unit_of_work::{atomically, require_category};
use crate::models::Book;
use crate::models::author::{self, Entity as AuthorEntity};
use crate::models::author_book::{self, Entity as AuthorBookEntity};
use crate::models::book::{self, ActiveModel, Column, Entity as BookEntity};
use crate::models::category::{self, Entity as CategoryEntity};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Narrow a book query by one predicate.
fn apply_predicate(query: Select<BookEntity>, predicate: &BookPredicate) -> Select<BookEntity> {
    match predicate {
        BookPredicate::Author(author_id) => query.filter(
            Column::Id.in_subquery(
                Query::select()
                    .column(author_book::Column::BookId)
                    .from(AuthorBookEntity)
                    .and_where(author_book::Column::AuthorId.eq(*author_id))
                    .to_owned(),
            ),
        ),
        BookPredicate::Category(category_id) => query.filter(Column::CategoryId.eq(*category_id)),
        // SQLite only folds ASCII case; titles are matched in `title_matches`
        BookPredicate::TitleContains(_) => query,
        BookPredicate::Year(year) => query.filter(Column::Year.eq(*year)),
        BookPredicate::MinPrice(price) => query.filter(Column::Price.gte(*price)),
        BookPredicate::MaxPrice(price) => query.filter(Column::Price.lte(*price)),
    }
}

/// Lowercased title fragments of a filter.
fn title_needles(filter: &BookFilter) -> Vec<String> {
    filter
        .predicates()
        .iter()
        .filter_map(|p| match p {
            BookPredicate::TitleContains(text) => Some(text.to_lowercase()),
            _ => None,
        })
        .collect()
}

/// Unicode case-insensitive containment of every needle.
fn title_matches(title: &str, needles: &[String]) -> bool {
    let folded = title.to_lowercase();
    needles.iter().all(|n| folded.contains(n.as_str()))
}

/// Resolve authors and categories for a page of books and project them.
///
/// Two flat queries regardless of page size: association rows joined to
/// authors, then the referenced categories.
async fn project_books<C: ConnectionTrait>(
    conn: &C,
    models: Vec<book::Model>,
) -> Result<Vec<Book>, DomainError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let book_ids: Vec<i32> = models.iter().map(|b| b.id).collect();
    let mut category_ids: Vec<i32> = models.iter().map(|b| b.category_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let author_rows = AuthorBookEntity::find()
        .filter(author_book::Column::BookId.is_in(book_ids))
        .find_also_related(AuthorEntity)
        .order_by_asc(author_book::Column::BookId)
        .order_by_asc(author_book::Column::AuthorId)
        .all(conn)
        .await?;

    let mut authors_by_book: HashMap<i32, Vec<String>> = HashMap::new();
    for (link, author) in author_rows {
        // Dangling association rows are skipped
        if let Some(author) = author {
            authors_by_book
                .entry(link.book_id)
                .or_default()
                .push(author.name);
        }
    }

    let categories: HashMap<i32, category::Model> = CategoryEntity::find()
        .filter(category::Column::Id.is_in(category_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(models
        .into_iter()
        .map(|model| {
            let authors = authors_by_book
                .get(&model.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let category = categories.get(&model.category_id);
            Book::project(model, authors, category)
        })
        .collect())
}

/// Associate the existing authors among `author_ids` with a book.
///
/// Unknown ids are ignored, duplicates collapse.
async fn link_authors<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
    author_ids: &[i32],
) -> Result<(), DomainError> {
    if author_ids.is_empty() {
        return Ok(());
    }

    let authors = AuthorEntity::find()
        .filter(author::Column::Id.is_in(author_ids.to_vec()))
        .order_by_asc(author::Column::Id)
        .all(conn)
        .await?;

    if authors.len() < author_ids.len() {
        tracing::debug!(
            "Book #{}: {} of {} author ids resolved",
            book_id,
            authors.len(),
            author_ids.len()
        );
    }

    for author in authors {
        let link = author_book::ActiveModel {
            author_id: Set(author.id),
            book_id: Set(book_id),
        };
        link.insert(conn).await?;
    }

    Ok(())
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, page: Pagination) -> Result<Vec<Book>, DomainError> {
        self.find_books(BookFilter::new(), page).await
    }

    async fn find_books(
        &self,
        filter: BookFilter,
        page: Pagination,
    ) -> Result<Vec<Book>, DomainError> {
        tracing::debug!("Find books - predicates: {:?}", filter.predicates());

        let query = filter
            .predicates()
            .iter()
            .fold(BookEntity::find(), apply_predicate)
            .order_by_asc(Column::Id);

        let needles = title_needles(&filter);
        let books = if needles.is_empty() {
            query
                .offset(page.skip)
                .limit(page.limit)
                .all(&self.db)
                .await?
        } else {
            // Page after the title match so skip/limit count matching books only
            query
                .all(&self.db)
                .await?
                .into_iter()
                .filter(|b| title_matches(&b.title, &needles))
                .skip(usize::try_from(page.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
                .collect()
        };

        project_books(&self.db, books).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let Some(model) = BookEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(project_books(&self.db, vec![model]).await?.pop())
    }

    async fn create(&self, input: BookInput) -> Result<Book, DomainError> {
        input.validate()?;

        let book = atomically(&self.db, "create_book", move |txn| {
            Box::pin(async move {
                require_category(txn, input.category_id).await?;

                let new_book = ActiveModel {
                    category_id: Set(input.category_id),
                    title: Set(input.title),
                    isbn: Set(input.isbn),
                    year: Set(input.year),
                    price: Set(input.price),
                    page_count: Set(input.page_count),
                    description: Set(input.description),
                    ..Default::default()
                };
                let model = new_book.insert(txn).await?;

                if let Some(author_ids) = &input.author_ids {
                    link_authors(txn, model.id, author_ids).await?;
                }

                project_books(txn, vec![model])
                    .await?
                    .pop()
                    .ok_or(DomainError::NotFound)
            })
        })
        .await?;

        tracing::info!("Created book #{} '{}'", book.id, book.title);
        Ok(book)
    }

    async fn update(&self, id: i32, input: BookInput) -> Result<Option<Book>, DomainError> {
        input.validate()?;

        let updated = atomically(&self.db, "update_book", move |txn| {
            Box::pin(async move {
                let Some(existing) = BookEntity::find_by_id(id).one(txn).await? else {
                    return Ok(None);
                };
                require_category(txn, input.category_id).await?;

                let mut active: ActiveModel = existing.into();
                active.category_id = Set(input.category_id);
                active.title = Set(input.title);
                active.isbn = Set(input.isbn);
                active.year = Set(input.year);
                active.price = Set(input.price);
                active.page_count = Set(input.page_count);
                active.description = Set(input.description);
                let model = active.update(txn).await?;

                if let Some(author_ids) = &input.author_ids {
                    AuthorBookEntity::delete_many()
                        .filter(author_book::Column::BookId.eq(id))
                        .exec(txn)
                        .await?;
                    link_authors(txn, id, author_ids).await?;
                }

                Ok(project_books(txn, vec![model]).await?.pop())
            })
        })
        .await?;

        if updated.is_some() {
            tracing::info!("Updated book #{}", id);
        }
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let deleted = atomically(&self.db, "delete_book", move |txn| {
            Box::pin(async move {
                if BookEntity::find_by_id(id).one(txn).await?.is_none() {
                    return Ok(false);
                }

                AuthorBookEntity::delete_many()
                    .filter(author_book::Column::BookId.eq(id))
                    .exec(txn)
                    .await?;
                BookEntity::delete_by_id(id).exec(txn).await?;

                Ok(true)
            })
        })
        .await?;

        if deleted {
            tracing::info!("Deleted book #{}", id);
        }
        Ok(deleted)
    }
}
