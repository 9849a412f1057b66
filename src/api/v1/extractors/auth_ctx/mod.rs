/*!
 * Authentication context
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（AuthCtx）を gate / handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 * - attach / current / caller_id / roles
 */

mod core;
mod types;

pub use core::{AuthCtxExtractor, attach, caller_id, current, roles};
pub use types::AuthCtx;
