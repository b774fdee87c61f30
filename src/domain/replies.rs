use crate::database::models::ReplyRow;
use crate::domain::{Payload, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder shown in place of a soft-deleted reply's content.
pub const DELETED_REPLY_MASK: &str = "**balasan telah dihapus**";

/// Validated payload for replying to a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    pub content: String,
    pub thread_id: String,
    pub comment_id: String,
    pub owner: String,
}

impl NewReply {
    pub fn parse(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Payload::new("NEW_REPLY", payload);
        fields.require(&["content", "threadId", "commentId", "owner"])?;
        Ok(Self {
            content: fields.string("content")?,
            thread_id: fields.string("threadId")?,
            comment_id: fields.string("commentId")?,
            owner: fields.string("owner")?,
        })
    }
}

/// Echo of a freshly persisted reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddedReply {
    pub id: String,
    pub content: String,
    pub owner: String,
}

/// Read model for one reply inside a comment. Deleted content is masked at
/// construction, mirroring `CommentDetail`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyDetail {
    pub id: String,
    pub content: String,
    pub date: String,
    pub username: String,
}

impl ReplyDetail {
    pub fn from_row(row: ReplyRow) -> Self {
        let content = if row.is_deleted {
            DELETED_REPLY_MASK.to_string()
        } else {
            row.content
        };
        Self {
            id: row.id,
            content,
            date: row.created_at,
            username: row.username,
        }
    }
}
