use super::auth::AuthUser;
use super::{created, ok_empty, ApiResult, AppState};
use crate::comments::CommentService;
use crate::domain::comments::AddedComment;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddedCommentData {
    added_comment: AddedComment,
}

pub(crate) async fn add_comment(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
    user: AuthUser,
    Json(mut payload): Json<Value>,
) -> ApiResult<AddedCommentData> {
    if let Some(fields) = payload.as_object_mut() {
        fields.insert("threadId".into(), Value::String(thread_id));
        fields.insert("owner".into(), Value::String(user.id));
    }
    let service = CommentService::new(state.database.clone());
    let added_comment = service.add_comment(&payload)?;
    Ok(created(AddedCommentData { added_comment }))
}

pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    user: AuthUser,
) -> ApiResult<()> {
    let service = CommentService::new(state.database.clone());
    service.delete_comment(&thread_id, &comment_id, &user.id)?;
    Ok(ok_empty())
}

pub(crate) async fn toggle_comment_like(
    State(state): State<AppState>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    user: AuthUser,
) -> ApiResult<()> {
    let payload = json!({
        "commentId": comment_id,
        "userId": user.id,
    });
    let service = CommentService::new(state.database.clone());
    service.toggle_comment_like(&thread_id, &payload)?;
    Ok(ok_empty())
}
