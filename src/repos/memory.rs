//! In-memory repositories for service and router tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::book_repo::{Book, BookRepo, BookSearch, SortField, SortOrder};
use crate::repos::error::RepoResult;
use crate::repos::user_repo::{User, UserRepo};
use crate::services::auth::password::hash_password;
use crate::services::auth::{ROLE_ADMIN, ROLE_AUTHOR};

pub const ADMIN_ID: &str = "a72bec75-0a5f-49af-a844-5763d188788e";
pub const ADMIN_PASSWORD: &str = "Admin#1";
pub const AUTHOR_ID: &str = "c86057bd-f135-4f50-a233-41dc3963093b";
pub const AUTHOR_PASSWORD: &str = "Author#1";

pub const CASTLE_ID: &str = "f4ac7e14-fc8e-4096-b956-34e5a33040f2";
pub const PIECES_ID: &str = "562e1fe0-0dde-4717-a008-cd2a699301d2";
pub const DUNE_ID: &str = "71432eb9-58da-4eae-aa20-ccc49064246f";

fn id(value: &str) -> Uuid {
    Uuid::parse_str(value).unwrap()
}

#[derive(Default)]
pub struct MemoryUserRepo {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepo {
    /// `admin` (ADMIN) and `author` (AUTHOR) with their known passwords.
    pub fn seeded() -> Self {
        let users = [
            User {
                id: id(ADMIN_ID),
                username: "admin".into(),
                email: "admin@example.com".into(),
                roles: vec![ROLE_ADMIN.into()],
                password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            },
            User {
                id: id(AUTHOR_ID),
                username: "author".into(),
                email: "author@example.com".into(),
                roles: vec![ROLE_AUTHOR.into()],
                password_hash: hash_password(AUTHOR_PASSWORD).unwrap(),
            },
        ];

        Self {
            rows: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let rows = self.rows.read().await;
        Ok(rows.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.rows.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        if let Some(row) = self.rows.write().await.get_mut(&user.id) {
            *row = user.clone();
        }
        Ok(())
    }

    async fn destroy(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn username_available(
        &self,
        username: &str,
        current_id: Option<Uuid>,
    ) -> RepoResult<bool> {
        let rows = self.rows.read().await;
        let holder = rows.values().find(|u| u.username == username).map(|u| u.id);
        Ok(holder.is_none() || holder == current_id)
    }

    async fn email_available(&self, email: &str, current_id: Option<Uuid>) -> RepoResult<bool> {
        let rows = self.rows.read().await;
        let holder = rows.values().find(|u| u.email == email).map(|u| u.id);
        Ok(holder.is_none() || holder == current_id)
    }
}

#[derive(Default)]
pub struct MemoryBookRepo {
    rows: RwLock<Vec<Book>>,
}

impl MemoryBookRepo {
    pub fn seeded() -> Self {
        let book = |book_id: &str, isbn: &str, title: &str, author: &str, category: &str| Book {
            id: id(book_id),
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            category: category.into(),
        };

        Self {
            rows: RwLock::new(vec![
                book(
                    CASTLE_ID,
                    "978-0241372579",
                    "The Castle",
                    "Franz Kafka",
                    "Fiction",
                ),
                book(
                    PIECES_ID,
                    "978-0465023929",
                    "Six Easy Pieces",
                    "Richard Feynman",
                    "Science",
                ),
                book(
                    DUNE_ID,
                    "978-0340960196",
                    "Dune",
                    "Frank Herbert",
                    "Fiction",
                ),
            ]),
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn sort_key(book: &Book, field: SortField) -> String {
    match field {
        SortField::Id => book.id.to_string(),
        SortField::Isbn => book.isbn.clone(),
        SortField::Title => book.title.clone(),
        SortField::Author => book.author.clone(),
    }
}

#[async_trait]
impl BookRepo for MemoryBookRepo {
    async fn list(&self) -> RepoResult<Vec<Book>> {
        Ok(self.rows.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Book>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|b| b.id == id).cloned())
    }

    async fn search(&self, search: &BookSearch) -> RepoResult<Vec<Book>> {
        let mut found: Vec<Book> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|b| search.isbn.as_deref().is_none_or(|v| b.isbn == v))
            .filter(|b| search.title.as_deref().is_none_or(|v| contains_ci(&b.title, v)))
            .filter(|b| search.author.as_deref().is_none_or(|v| contains_ci(&b.author, v)))
            .filter(|b| search.category.as_deref().is_none_or(|v| b.category == v))
            .cloned()
            .collect();

        if let Some((field, order)) = search.sort {
            found.sort_by_key(|b| sort_key(b, field));
            if order == SortOrder::Desc {
                found.reverse();
            }
        }

        let offset = search.offset.unwrap_or(0) as usize;
        let limit = search.limit.map_or(usize::MAX, |l| l as usize);
        Ok(found.into_iter().skip(offset).take(limit).collect())
    }

    async fn create(&self, book: &Book) -> RepoResult<()> {
        self.rows.write().await.push(book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> RepoResult<()> {
        if let Some(row) = self.rows.write().await.iter_mut().find(|b| b.id == book.id) {
            *row = book.clone();
        }
        Ok(())
    }

    async fn destroy(&self, id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|b| b.id != id);
        Ok(rows.len() < before)
    }
}
