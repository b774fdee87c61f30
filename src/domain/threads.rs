use crate::database::models::ThreadRow;
use crate::domain::comments::CommentDetail;
use crate::domain::{Payload, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validated payload for creating a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    pub owner: String,
}

impl NewThread {
    pub fn parse(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Payload::new("NEW_THREAD", payload);
        fields.require(&["title", "body", "owner"])?;
        Ok(Self {
            title: fields.string("title")?,
            body: fields.string("body")?,
            owner: fields.string("owner")?,
        })
    }
}

/// Echo of a freshly persisted thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddedThread {
    pub id: String,
    pub title: String,
    pub owner: String,
}

/// Aggregated read model for one thread, comments and replies included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreadDetail {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: String,
    pub username: String,
    pub comments: Vec<CommentDetail>,
}

impl ThreadDetail {
    pub fn from_row(row: ThreadRow, comments: Vec<CommentDetail>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            date: row.created_at,
            username: row.username,
            comments,
        }
    }
}
