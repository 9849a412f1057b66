/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - role が必要な method は require_role で個別に gate
 * - 認証 (Bearer) は v1 全体に layer、ただし /users/token は除外
 */
use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::api::v1::handlers::{books, users};
use crate::middleware::{auth::access, http};
use crate::services::auth::{ROLE_ADMIN, ROLE_AUTHOR};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/users/token", post(users::token))
        .route("/users", access::require_role(post(users::add), ROLE_ADMIN))
        .route(
            "/users/{id}",
            access::require_role(
                get(users::get).patch(users::edit).delete(users::delete),
                ROLE_ADMIN,
            ),
        )
        .route(
            "/books",
            get(books::list).merge(access::require_role(post(books::add), ROLE_AUTHOR)),
        )
        .route("/books/search", get(books::search))
        .route(
            "/books/{id}",
            get(books::get).merge(access::require_role(
                patch(books::edit).delete(books::delete),
                ROLE_AUTHOR,
            )),
        );

    // 外側から: authenticate → request log → role gate → handler
    let router = http::request_log(router);
    access::apply(router, state)
}
