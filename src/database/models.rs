use serde::{Deserialize, Serialize};

/// Thread row with the author's username joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRow {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub username: String,
}

/// Comment row as read for thread aggregation. `content` is the stored text
/// even for deleted rows; masking happens in the read models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRow {
    pub id: String,
    pub username: String,
    pub created_at: String,
    pub content: String,
    pub is_deleted: bool,
    pub like_count: i64,
}

/// Reply row keyed by its owning comment so one batched query can cover a
/// whole thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRow {
    pub id: String,
    pub comment_id: String,
    pub username: String,
    pub created_at: String,
    pub content: String,
    pub is_deleted: bool,
}
