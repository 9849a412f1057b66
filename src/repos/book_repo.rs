/*
 * Responsibility
 * - book テーブル向け SQLx 操作 (PgBookRepo)
 * - 検索条件は BookSearch に正規化済みのものを受け取る
 * - 見つからない行は None / false で返す (エラーにしない)
 */
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Book {
    pub id: Uuid,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Isbn,
    Title,
    Author,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "isbn" => Some(Self::Isbn),
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Isbn => "isbn",
            Self::Title => "title",
            Self::Author => "author",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A normalized search: only whitelisted sort columns, only positive paging values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearch {
    /// exact match
    pub isbn: Option<String>,
    /// case-insensitive substring
    pub title: Option<String>,
    /// case-insensitive substring
    pub author: Option<String>,
    /// exact match
    pub category: Option<String>,
    pub sort: Option<(SortField, SortOrder)>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[async_trait]
pub trait BookRepo: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<Book>>;
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Book>>;
    async fn search(&self, search: &BookSearch) -> RepoResult<Vec<Book>>;
    async fn create(&self, book: &Book) -> RepoResult<()>;
    async fn update(&self, book: &Book) -> RepoResult<()>;
    /// `false` when no row was deleted.
    async fn destroy(&self, id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct PgBookRepo {
    db: PgPool,
}

impl PgBookRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn search_query(search: &BookSearch) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("SELECT id, isbn, title, author, category FROM book");
    let mut sep = " WHERE ";

    if let Some(isbn) = &search.isbn {
        qb.push(sep).push("isbn = ").push_bind(isbn);
        sep = " AND ";
    }
    if let Some(title) = &search.title {
        qb.push(sep)
            .push("title ILIKE ")
            .push_bind(format!("%{title}%"));
        sep = " AND ";
    }
    if let Some(author) = &search.author {
        qb.push(sep)
            .push("author ILIKE ")
            .push_bind(format!("%{author}%"));
        sep = " AND ";
    }
    if let Some(category) = &search.category {
        qb.push(sep).push("category = ").push_bind(category);
    }

    // column and direction come from closed enums, never from input
    if let Some((field, order)) = search.sort {
        qb.push(" ORDER BY ")
            .push(field.column())
            .push(" ")
            .push(order.keyword());
    }
    if let Some(limit) = search.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }
    if let Some(offset) = search.offset {
        qb.push(" OFFSET ").push_bind(offset);
    }

    qb
}

#[async_trait]
impl BookRepo for PgBookRepo {
    async fn list(&self) -> RepoResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, isbn, title, author, category
            FROM book
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, isbn, title, author, category
            FROM book
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn search(&self, search: &BookSearch) -> RepoResult<Vec<Book>> {
        let mut qb = search_query(search);
        let rows = qb
            .build_query_as::<Book>()
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn create(&self, book: &Book) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO book (id, isbn, title, author, category)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book.id)
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn update(&self, book: &Book) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE book
            SET isbn = $2, title = $3, author = $4, category = $5
            WHERE id = $1
            "#,
        )
        .bind(book.id)
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn destroy(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM book
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
