/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: access pipeline (authenticate + role gates)
 * - http: request id / limits / timeout / access log
 */
pub mod auth;
pub mod http;
