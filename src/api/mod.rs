mod auth;
mod comments;
mod replies;
mod threads;
mod users;

use crate::auth::{Argon2PasswordHash, JwtTokenManager, PasswordHash, TokenManager};
use crate::config::ColloquyConfig;
use crate::database::Database;
use crate::domain::DomainError;
use anyhow::Result;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: ColloquyConfig,
    pub database: Database,
    pub password_hash: Arc<dyn PasswordHash>,
    pub token_manager: Arc<dyn TokenManager>,
}

pub(crate) type ApiResult<T> = Result<(StatusCode, Json<SuccessBody<T>>), ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// Client fault, rendered as `{"status":"fail","message":...}`.
    Fail(StatusCode, String),
    /// Unexpected fault, logged here and rendered with a fixed message.
    Internal(anyhow::Error),
}

impl ApiError {
    fn into_response_parts(self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Fail(status, message) => (
                status,
                ErrorResponse {
                    status: "fail",
                    message,
                },
            ),
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        status: "error",
                        message: "terjadi kegagalan pada server kami".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_response_parts();
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(inner) => {
                ApiError::Fail(StatusCode::BAD_REQUEST, inner.to_string())
            }
            DomainError::Invariant(message) => ApiError::Fail(StatusCode::BAD_REQUEST, message),
            DomainError::Unauthenticated(message) => {
                ApiError::Fail(StatusCode::UNAUTHORIZED, message)
            }
            DomainError::Forbidden(message) => ApiError::Fail(StatusCode::FORBIDDEN, message),
            DomainError::NotFound(message) => ApiError::Fail(StatusCode::NOT_FOUND, message),
            DomainError::Storage(inner) => ApiError::Internal(inner.into()),
            DomainError::Internal(inner) => ApiError::Internal(inner),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
}

/// Success envelope shared by every endpoint: `data` is omitted entirely for
/// bodyless confirmations.
#[derive(Debug, Serialize)]
pub(crate) struct SuccessBody<T> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

pub(crate) fn created<T>(data: T) -> (StatusCode, Json<SuccessBody<T>>) {
    (
        StatusCode::CREATED,
        Json(SuccessBody {
            status: "success",
            data: Some(data),
        }),
    )
}

pub(crate) fn ok<T>(data: T) -> (StatusCode, Json<SuccessBody<T>>) {
    (
        StatusCode::OK,
        Json(SuccessBody {
            status: "success",
            data: Some(data),
        }),
    )
}

pub(crate) fn ok_empty() -> (StatusCode, Json<SuccessBody<()>>) {
    (
        StatusCode::OK,
        Json(SuccessBody {
            status: "success",
            data: None,
        }),
    )
}

async fn route_not_found() -> ApiError {
    ApiError::Fail(StatusCode::NOT_FOUND, "Route not found".into())
}

/// Tries to bind to the given port, or finds the next available port
async fn find_available_port(start_port: u16) -> Result<(TcpListener, u16)> {
    const MAX_PORT_ATTEMPTS: u16 = 100;

    for offset in 0..MAX_PORT_ATTEMPTS {
        let port = start_port + offset;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok((listener, port)),
            Err(e) => {
                if offset == 0 {
                    tracing::debug!(port, error = %e, "Port in use, trying next port");
                }
                continue;
            }
        }
    }

    anyhow::bail!(
        "Could not find available port in range {}-{}",
        start_port,
        start_port + MAX_PORT_ATTEMPTS - 1
    )
}

pub async fn serve_http(config: ColloquyConfig, database: Database) -> Result<()> {
    let password_hash: Arc<dyn PasswordHash> = Arc::new(Argon2PasswordHash::new());
    let token_manager: Arc<dyn TokenManager> = Arc::new(JwtTokenManager::new(&config.auth));
    let state = AppState {
        config: config.clone(),
        database,
        password_hash,
        token_manager,
    };

    let router = Router::new()
        .route("/health", get(threads::health_handler))
        .route("/users", post(users::register_user))
        .route(
            "/authentications",
            post(auth::login)
                .put(auth::refresh_authentication)
                .delete(auth::logout),
        )
        .route("/threads", post(threads::add_thread))
        .route("/threads/:thread_id", get(threads::get_thread))
        .route("/threads/:thread_id/comments", post(comments::add_comment))
        .route(
            "/threads/:thread_id/comments/:comment_id",
            delete(comments::delete_comment),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id/replies",
            post(replies::add_reply),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id/replies/:reply_id",
            delete(replies::delete_reply),
        )
        .route(
            "/threads/:thread_id/comments/:comment_id/likes",
            put(comments::toggle_comment_like),
        )
        .fallback(route_not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let (listener, actual_port) = find_available_port(config.api_port).await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], actual_port));

    if actual_port != config.api_port {
        tracing::warn!(
            requested_port = config.api_port,
            actual_port = actual_port,
            "Configured port was in use, bound to next available port"
        );
    }

    tracing::info!(?addr, "HTTP server listening");
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
