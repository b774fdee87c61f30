use super::auth::AuthUser;
use super::{created, ok, ApiResult, AppState};
use crate::domain::threads::{AddedThread, ThreadDetail};
use crate::threads::ThreadService;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    api_port: u16,
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        api_port: state.config.api_port,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddedThreadData {
    added_thread: AddedThread,
}

#[derive(Debug, Serialize)]
pub(crate) struct ThreadDetailData {
    thread: ThreadDetail,
}

pub(crate) async fn add_thread(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut payload): Json<Value>,
) -> ApiResult<AddedThreadData> {
    if let Some(fields) = payload.as_object_mut() {
        fields.insert("owner".into(), Value::String(user.id.clone()));
    }
    let service = ThreadService::new(state.database.clone());
    let added_thread = service.add_thread(&payload)?;
    tracing::debug!(username = %user.username, thread_id = %added_thread.id, "thread created");
    Ok(created(AddedThreadData { added_thread }))
}

pub(crate) async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> ApiResult<ThreadDetailData> {
    let service = ThreadService::new(state.database.clone());
    let thread = service.get_thread(&thread_id)?;
    Ok(ok(ThreadDetailData { thread }))
}
