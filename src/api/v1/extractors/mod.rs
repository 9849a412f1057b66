/*
 * Responsibility
 * - handler が受け取る型付き入力 (identity / validated body)
 */
pub mod auth_ctx;
pub mod validated_json;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use validated_json::ValidatedJson;
