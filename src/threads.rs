use crate::database::repositories::{CommentRepository, ReplyRepository, ThreadRepository};
use crate::database::Database;
use crate::domain::comments::CommentDetail;
use crate::domain::replies::ReplyDetail;
use crate::domain::threads::{AddedThread, NewThread, ThreadDetail};
use crate::domain::DomainResult;
use serde_json::Value;
use std::collections::HashMap;

/// Thread creation and the aggregated thread-detail read.
#[derive(Clone)]
pub struct ThreadService {
    database: Database,
}

impl ThreadService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn add_thread(&self, payload: &Value) -> DomainResult<AddedThread> {
        let new_thread = NewThread::parse(payload)?;
        self.database
            .with_repositories(|repos| repos.threads().add_thread(&new_thread))
    }

    /// Builds the thread view from three flat reads: the thread row, its
    /// comments oldest-first, and one batched reply query across every
    /// comment id.
    pub fn get_thread(&self, thread_id: &str) -> DomainResult<ThreadDetail> {
        self.database.with_repositories(|repos| {
            let thread = repos.threads().get_thread_by_id(thread_id)?;
            let comments = repos.comments().get_comments_by_thread_id(thread_id)?;

            let comment_ids: Vec<String> = comments.iter().map(|row| row.id.clone()).collect();
            let reply_rows = repos.replies().get_replies_by_comment_ids(&comment_ids)?;

            let mut replies_by_comment: HashMap<String, Vec<ReplyDetail>> = HashMap::new();
            for row in reply_rows {
                let comment_id = row.comment_id.clone();
                replies_by_comment
                    .entry(comment_id)
                    .or_default()
                    .push(ReplyDetail::from_row(row));
            }

            let details = comments
                .into_iter()
                .map(|row| {
                    let replies = replies_by_comment.remove(&row.id).unwrap_or_default();
                    CommentDetail::from_row(row, replies)
                })
                .collect();

            Ok(ThreadDetail::from_row(thread, details))
        })
    }
}
