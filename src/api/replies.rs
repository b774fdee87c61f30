use super::auth::AuthUser;
use super::{created, ok_empty, ApiResult, AppState};
use crate::domain::replies::AddedReply;
use crate::replies::ReplyService;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddedReplyData {
    added_reply: AddedReply,
}

pub(crate) async fn add_reply(
    State(state): State<AppState>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    user: AuthUser,
    Json(mut payload): Json<Value>,
) -> ApiResult<AddedReplyData> {
    if let Some(fields) = payload.as_object_mut() {
        fields.insert("threadId".into(), Value::String(thread_id));
        fields.insert("commentId".into(), Value::String(comment_id));
        fields.insert("owner".into(), Value::String(user.id));
    }
    let service = ReplyService::new(state.database.clone());
    let added_reply = service.add_reply(&payload)?;
    Ok(created(AddedReplyData { added_reply }))
}

pub(crate) async fn delete_reply(
    State(state): State<AppState>,
    Path((thread_id, comment_id, reply_id)): Path<(String, String, String)>,
    user: AuthUser,
) -> ApiResult<()> {
    let service = ReplyService::new(state.database.clone());
    service.delete_reply(&thread_id, &comment_id, &reply_id, &user.id)?;
    Ok(ok_empty())
}
