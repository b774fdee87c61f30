use crate::database::models::CommentRow;
use crate::domain::replies::ReplyDetail;
use crate::domain::{Payload, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder shown in place of a soft-deleted comment's content.
pub const DELETED_COMMENT_MASK: &str = "**komentar telah dihapus**";

/// Validated payload for commenting on a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub thread_id: String,
    pub owner: String,
}

impl NewComment {
    pub fn parse(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Payload::new("NEW_COMMENT", payload);
        fields.require(&["content", "threadId", "owner"])?;
        Ok(Self {
            content: fields.string("content")?,
            thread_id: fields.string("threadId")?,
            owner: fields.string("owner")?,
        })
    }
}

/// Echo of a freshly persisted comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddedComment {
    pub id: String,
    pub content: String,
    pub owner: String,
}

/// Validated payload for toggling one user's like on a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentLike {
    pub comment_id: String,
    pub user_id: String,
}

impl AddCommentLike {
    pub fn parse(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Payload::new("ADD_COMMENT_LIKE", payload);
        fields.require(&["commentId", "userId"])?;
        Ok(Self {
            comment_id: fields.string("commentId")?,
            user_id: fields.string("userId")?,
        })
    }
}

/// Read model for one comment inside a thread detail. Deleted content is
/// masked here and nowhere else; rows keep the original text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetail {
    pub id: String,
    pub username: String,
    pub date: String,
    pub content: String,
    pub like_count: i64,
    pub replies: Vec<ReplyDetail>,
}

impl CommentDetail {
    pub fn from_row(row: CommentRow, replies: Vec<ReplyDetail>) -> Self {
        let content = if row.is_deleted {
            DELETED_COMMENT_MASK.to_string()
        } else {
            row.content
        };
        Self {
            id: row.id,
            username: row.username,
            date: row.created_at,
            content,
            like_count: row.like_count,
            replies,
        }
    }
}
