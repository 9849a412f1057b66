/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - tokens: 署名鍵を注入済みの TokenCodec (読み取り専用)
 *   - users / books: repo trait を抱えた service
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{BookService, UserService, auth::TokenCodec};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenCodec>,
    pub users: UserService,
    pub books: BookService,
}

impl AppState {
    pub fn new(tokens: Arc<TokenCodec>, users: UserService, books: BookService) -> Self {
        Self {
            tokens,
            users,
            books,
        }
    }
}
