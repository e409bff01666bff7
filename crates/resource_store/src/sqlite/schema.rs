//! Table layout and row mappings for the SQLite backend.

use entities::{Product, ProductBase, Task, TaskBase, User, UserBase};
use sqlx::FromRow;

use super::{SqlTable, SqliteQuery};

/// SQL schema definition
pub(crate) const SCHEMA_SQL: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL
);

-- Products table
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    description TEXT
);

-- Tasks table
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    completed INTEGER NOT NULL DEFAULT 0
);
"#;

/// Database row for User
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

impl SqlTable for User {
    type Row = UserRow;

    const COLUMNS: &'static [&'static str] = &["name", "email"];

    fn bind_base<'q>(base: &'q UserBase, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(&base.name).bind(&base.email)
    }

    fn bind_fields<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(&self.name).bind(&self.email)
    }
}

/// Database row for Product
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
        }
    }
}

impl SqlTable for Product {
    type Row = ProductRow;

    const COLUMNS: &'static [&'static str] = &["name", "price", "description"];

    fn bind_base<'q>(base: &'q ProductBase, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&base.name)
            .bind(base.price)
            .bind(&base.description)
    }

    fn bind_fields<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&self.name)
            .bind(self.price)
            .bind(&self.description)
    }
}

/// Database row for Task
#[derive(Debug, FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
        }
    }
}

impl SqlTable for Task {
    type Row = TaskRow;

    const COLUMNS: &'static [&'static str] = &["title", "description", "completed"];

    fn bind_base<'q>(base: &'q TaskBase, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&base.title)
            .bind(&base.description)
            .bind(base.completed)
    }

    fn bind_fields<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(&self.title)
            .bind(&self.description)
            .bind(self.completed)
    }
}
