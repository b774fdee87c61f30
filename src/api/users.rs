use super::{created, ApiResult, AppState};
use crate::domain::users::RegisteredUser;
use crate::users::UserService;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddedUserData {
    added_user: RegisteredUser,
}

pub(crate) async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<AddedUserData> {
    let service = UserService::new(state.database.clone(), state.password_hash.clone());
    let added_user = service.add_user(&payload)?;
    Ok(created(AddedUserData { added_user }))
}
