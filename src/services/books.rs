/*
 * Responsibility
 * - Book の業務ルール (ID 形式 / 検索条件の正規化 / 部分更新)
 */
use std::sync::Arc;

use uuid::Uuid;

use crate::api::v1::dto::books::{NewBook, UpdateBook};
use crate::error::AppError;
use crate::repos::{Book, BookRepo, BookSearch, SortField, SortOrder};
use crate::services::parse_id;

/// Raw search input as it arrives in the query string.
#[derive(Debug, Default, Clone)]
pub struct SearchParams {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub sort: String,
    pub order: String,
    pub limit: String,
    pub offset: String,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// Unparsable or non-positive means "not set".
fn positive(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|n| *n > 0)
}

impl SearchParams {
    /// Sorting applies only when both the column and the direction are recognised.
    pub fn normalize(&self) -> BookSearch {
        let sort = SortField::parse(self.sort.trim()).zip(SortOrder::parse(self.order.trim()));

        BookSearch {
            isbn: non_empty(&self.isbn),
            title: non_empty(&self.title),
            author: non_empty(&self.author),
            category: non_empty(&self.category),
            sort,
            limit: positive(&self.limit),
            offset: positive(&self.offset),
        }
    }
}

#[derive(Clone)]
pub struct BookService {
    repo: Arc<dyn BookRepo>,
}

impl BookService {
    pub fn new(repo: Arc<dyn BookRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Book>, AppError> {
        let id = parse_id(id)?;
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Book>, AppError> {
        Ok(self.repo.search(&params.normalize()).await?)
    }

    pub async fn create(&self, cmd: NewBook) -> Result<Book, AppError> {
        let book = Book {
            id: Uuid::new_v4(),
            isbn: cmd.isbn.trim().to_string(),
            title: cmd.title.trim().to_string(),
            author: cmd.author.trim().to_string(),
            category: cmd.category.trim().to_string(),
        };
        self.repo.create(&book).await?;

        Ok(book)
    }

    pub async fn update(&self, id: &str, cmd: UpdateBook) -> Result<(), AppError> {
        let id = parse_id(id)?;
        let mut book = self.repo.get_by_id(id).await?.ok_or(AppError::NoAffect)?;

        if !cmd.isbn.is_empty() {
            book.isbn = cmd.isbn.trim().to_string();
        }
        if !cmd.title.is_empty() {
            book.title = cmd.title.trim().to_string();
        }
        if !cmd.author.is_empty() {
            book.author = cmd.author.trim().to_string();
        }
        if let Some(category) = cmd.category {
            book.category = category.trim().to_string();
        }

        Ok(self.repo.update(&book).await?)
    }

    pub async fn destroy(&self, id: &str) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if !self.repo.destroy(id).await? {
            return Err(AppError::NoAffect);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory::{CASTLE_ID, DUNE_ID, MemoryBookRepo, PIECES_ID};

    fn service() -> BookService {
        BookService::new(Arc::new(MemoryBookRepo::seeded()))
    }

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn normalize_drops_unknown_sort_and_bad_paging() {
        let search = SearchParams {
            title: "  castle ".into(),
            sort: "category".into(),
            order: "asc".into(),
            limit: "ten".into(),
            offset: "-3".into(),
            ..Default::default()
        }
        .normalize();

        assert_eq!(search.title.as_deref(), Some("castle"));
        assert_eq!(search.isbn, None);
        assert_eq!(search.sort, None);
        assert_eq!(search.limit, None);
        assert_eq!(search.offset, None);
    }

    #[test]
    fn normalize_needs_both_sort_and_order() {
        let only_sort = SearchParams {
            sort: "title".into(),
            ..Default::default()
        };
        assert_eq!(only_sort.normalize().sort, None);

        let both = SearchParams {
            sort: "Title".into(),
            order: "DESC".into(),
            limit: "2".into(),
            ..Default::default()
        }
        .normalize();
        assert_eq!(both.sort, Some((SortField::Title, SortOrder::Desc)));
        assert_eq!(both.limit, Some(2));
    }

    #[tokio::test]
    async fn get_by_id_checks_id_shape() {
        let svc = service();
        assert!(matches!(
            svc.get_by_id("42").await.unwrap_err(),
            AppError::InvalidId
        ));
        assert_eq!(
            svc.get_by_id(CASTLE_ID).await.unwrap().unwrap().author,
            "Franz Kafka"
        );
    }

    #[tokio::test]
    async fn search_filters_sorts_and_pages() {
        let svc = service();

        let fiction = svc
            .search(&SearchParams {
                category: "Fiction".into(),
                sort: "title".into(),
                order: "asc".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&fiction), vec!["Dune", "The Castle"]);

        let by_author = svc
            .search(&SearchParams {
                author: "FEYN".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&by_author), vec!["Six Easy Pieces"]);

        let paged = svc
            .search(&SearchParams {
                sort: "author".into(),
                order: "desc".into(),
                limit: "1".into(),
                offset: "1".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(titles(&paged), vec!["The Castle"]);
    }

    #[tokio::test]
    async fn create_trims_fields() {
        let svc = service();
        let book = svc
            .create(NewBook {
                isbn: " 978-0099448792 ".into(),
                title: "The Wind-Up Bird Chronicle".into(),
                author: "Haruki Murakami ".into(),
                category: "Fiction".into(),
            })
            .await
            .unwrap();

        let stored = svc.get_by_id(&book.id.to_string()).await.unwrap().unwrap();
        assert_eq!(stored.isbn, "978-0099448792");
        assert_eq!(stored.author, "Haruki Murakami");
    }

    #[tokio::test]
    async fn update_is_partial() {
        let svc = service();
        svc.update(
            PIECES_ID,
            UpdateBook {
                isbn: "978-0465025268".into(),
                title: "Six Not-So-Easy Pieces".into(),
                category: Some("Physics".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let book = svc.get_by_id(PIECES_ID).await.unwrap().unwrap();
        assert_eq!(book.title, "Six Not-So-Easy Pieces");
        assert_eq!(book.author, "Richard Feynman");
        assert_eq!(book.category, "Physics");
    }

    #[tokio::test]
    async fn destroy_twice_is_gone() {
        let svc = service();
        svc.destroy(DUNE_ID).await.unwrap();
        assert!(matches!(
            svc.destroy(DUNE_ID).await.unwrap_err(),
            AppError::NoAffect
        ));
        assert!(svc.get_by_id(DUNE_ID).await.unwrap().is_none());
    }
}
