use super::{created, ok, ok_empty, ApiError, ApiResult, AppState};
use crate::auth::{AuthService, NewAuthentication};
use axum::extract::{FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Caller identity proven by the Bearer access token. Adding this extractor
/// to a handler makes the route require authentication.
#[derive(Debug, Clone)]
pub(crate) struct AuthUser {
    pub id: String,
    pub username: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::Fail(StatusCode::UNAUTHORIZED, "missing authentication".into())
            })?;
        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Fail(StatusCode::UNAUTHORIZED, "invalid authentication".into())
        })?;
        let claims = state.token_manager.verify_access_token(token)?;
        Ok(AuthUser {
            id: claims.id,
            username: claims.username,
        })
    }
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        state.database.clone(),
        state.password_hash.clone(),
        state.token_manager.clone(),
    )
}

pub(crate) async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<NewAuthentication> {
    let service = auth_service(&state);
    let tokens = service.login(&payload)?;
    Ok(created(tokens))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshedTokenData {
    access_token: String,
}

pub(crate) async fn refresh_authentication(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<RefreshedTokenData> {
    let service = auth_service(&state);
    let access_token = service.refresh(&payload)?;
    Ok(ok(RefreshedTokenData { access_token }))
}

pub(crate) async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<()> {
    let service = auth_service(&state);
    service.logout(&payload)?;
    Ok(ok_empty())
}
