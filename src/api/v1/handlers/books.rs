/*
 * Responsibility
 * - /books 系 handler
 * - 読み取りは認証済みなら誰でも、書き込みは AUTHOR (routes 側で gate)
 */
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    api::v1::{
        dto::books::{NewBook, UpdateBook},
        extractors::{AuthCtxExtractor, ValidatedJson},
    },
    error::AppError,
    response::{self, IdResponse},
    services::books::SearchParams,
    state::AppState,
};

// First value wins when a key repeats.
fn search_params(pairs: Vec<(String, String)>) -> SearchParams {
    let mut params = SearchParams::default();

    for (key, value) in pairs.into_iter().rev() {
        let slot = match key.as_str() {
            "isbn" => &mut params.isbn,
            "title" => &mut params.title,
            "author" => &mut params.author,
            "category" => &mut params.category,
            "sort" => &mut params.sort,
            "order" => &mut params.order,
            "limit" => &mut params.limit,
            "offset" => &mut params.offset,
            _ => continue,
        };
        *slot = value;
    }

    params
}

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let books = state.books.list().await?;
    response::respond(&books, StatusCode::OK)
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let book = state.books.get_by_id(&id).await?;
    response::respond(&book, StatusCode::OK)
}

pub async fn search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let books = state.books.search(&search_params(pairs)).await?;
    response::respond(&books, StatusCode::OK)
}

pub async fn add(
    State(state): State<AppState>,
    AuthCtxExtractor(caller): AuthCtxExtractor,
    ValidatedJson(cmd): ValidatedJson<NewBook>,
) -> Result<Response, AppError> {
    let book = state.books.create(cmd).await?;
    tracing::info!(book_id = %book.id, created_by = %caller.user_id(), "book created");

    response::respond(
        &IdResponse {
            id: book.id.to_string(),
        },
        StatusCode::CREATED,
    )
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(cmd): ValidatedJson<UpdateBook>,
) -> Result<Response, AppError> {
    state.books.update(&id, cmd).await?;
    response::ok()
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    state.books.destroy(&id).await?;
    response::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn query_pairs_fill_known_keys_only() {
        let params = search_params(pairs(&[
            ("title", "castle"),
            ("sort", "title"),
            ("order", "asc"),
            ("page", "3"),
        ]));

        assert_eq!(params.title, "castle");
        assert_eq!(params.sort, "title");
        assert_eq!(params.order, "asc");
        assert!(params.limit.is_empty());
    }

    #[test]
    fn repeated_key_keeps_first_value() {
        let params = search_params(pairs(&[("isbn", "first"), ("isbn", "second")]));
        assert_eq!(params.isbn, "first");
    }
}
