use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Open the connection pool and bring the schema up to date.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);

    // Every pooled connection to `:memory:` would get its own empty database
    if database_url.contains(":memory:") {
        options.max_connections(1);
    }

    let db = Database::connect(options).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let tables = [
        r#"
        CREATE TABLE IF NOT EXISTS author (
            authorid INTEGER PRIMARY KEY AUTOINCREMENT,
            authorname VARCHAR(45) NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS category (
            categoryid INTEGER PRIMARY KEY AUTOINCREMENT,
            categorydescription VARCHAR(45) NOT NULL
        )
        "#,
        // `image` is a legacy column kept for existing data; nothing reads it
        r#"
        CREATE TABLE IF NOT EXISTS book (
            bookid INTEGER PRIMARY KEY AUTOINCREMENT,
            categoryid INTEGER NOT NULL,
            title VARCHAR(45) NOT NULL,
            isbn VARCHAR(45),
            year INTEGER,
            price INTEGER NOT NULL,
            nopages INTEGER,
            bookdescription VARCHAR(500),
            image BLOB,
            FOREIGN KEY (categoryid) REFERENCES category(categoryid)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS author_book (
            authorid INTEGER NOT NULL,
            bookid INTEGER NOT NULL,
            PRIMARY KEY (authorid, bookid),
            FOREIGN KEY (authorid) REFERENCES author(authorid),
            FOREIGN KEY (bookid) REFERENCES book(bookid)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS customer (
            customerid INTEGER PRIMARY KEY AUTOINCREMENT,
            firstname VARCHAR(45) NOT NULL,
            lastname VARCHAR(45) NOT NULL,
            zipcode VARCHAR(45),
            city VARCHAR(45),
            state VARCHAR(45),
            address VARCHAR(100),
            "user" VARCHAR(45),
            password VARCHAR(45)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS book_order (
            orderid INTEGER PRIMARY KEY AUTOINCREMENT,
            customerid INTEGER NOT NULL,
            orderdate DATE,
            FOREIGN KEY (customerid) REFERENCES customer(customerid)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS ordering (
            bookid INTEGER NOT NULL,
            orderid INTEGER NOT NULL,
            customerid INTEGER NOT NULL,
            PRIMARY KEY (bookid, orderid, customerid),
            FOREIGN KEY (bookid) REFERENCES book(bookid),
            FOREIGN KEY (orderid) REFERENCES book_order(orderid)
        )
        "#,
    ];

    for ddl in tables {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            ddl.to_owned(),
        ))
        .await?;
    }

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_author_book_bookid ON author_book(bookid)",
        "CREATE INDEX IF NOT EXISTS idx_book_categoryid ON book(categoryid)",
        "CREATE INDEX IF NOT EXISTS idx_book_order_customerid ON book_order(customerid)",
        "CREATE INDEX IF NOT EXISTS idx_ordering_orderid ON ordering(orderid)",
    ];

    for ddl in indexes {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            ddl.to_owned(),
        ))
        .await?;
    }

    tracing::debug!("Schema migrations applied");
    Ok(())
}
