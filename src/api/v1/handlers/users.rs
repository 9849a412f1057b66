/*
 * Responsibility
 * - /users 系 handler (token / add / get / edit / delete)
 * - body は ValidatedJson で受け、業務ルールは UserService に任せる
 * - token だけは Bearer ではなく Basic 認証で受ける
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{
    api::v1::{
        dto::users::{NewUser, UpdateUser},
        extractors::{AuthCtxExtractor, ValidatedJson},
    },
    error::AppError,
    response::{self, IdResponse, TokenResponse},
    state::AppState,
};

/// `Authorization: Basic base64(username:password)`; scheme is case-insensitive.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

pub async fn token(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let (username, password) = basic_credentials(&headers).ok_or(AppError::BasicAuth)?;

    let claims = state.users.authenticate(&username, &password).await?;
    let token = state.tokens.sign(&claims)?;

    response::respond(&TokenResponse { token }, StatusCode::OK)
}

pub async fn add(
    State(state): State<AppState>,
    AuthCtxExtractor(caller): AuthCtxExtractor,
    ValidatedJson(cmd): ValidatedJson<NewUser>,
) -> Result<Response, AppError> {
    let user = state.users.create(cmd).await?;
    tracing::info!(user_id = %user.id, created_by = %caller.user_id(), "user created");

    response::respond(
        &IdResponse {
            id: user.id.to_string(),
        },
        StatusCode::CREATED,
    )
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let user = state.users.get_by_id(&id).await?;
    response::respond(&user, StatusCode::OK)
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(cmd): ValidatedJson<UpdateUser>,
) -> Result<Response, AppError> {
    state.users.update(&id, cmd).await?;
    response::ok()
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    state.users.destroy(&id).await?;
    response::ok()
}
