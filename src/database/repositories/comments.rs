use super::CommentRepository;
use crate::database::models::CommentRow;
use crate::domain::comments::{AddedComment, NewComment};
use crate::domain::{DomainError, DomainResult};
use crate::utils::{Clock, IdSource};
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteCommentRepository<'conn> {
    pub(super) conn: &'conn Connection,
    pub(super) ids: &'conn IdSource,
    pub(super) clock: &'conn Clock,
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn add_comment(&self, new_comment: &NewComment) -> DomainResult<AddedComment> {
        let id = format!("comment-{}", self.ids.next());
        let created_at = self.clock.now();
        self.conn.execute(
            r#"
            INSERT INTO comments (id, thread_id, content, created_at, owner)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                id,
                new_comment.thread_id,
                new_comment.content,
                created_at,
                new_comment.owner
            ],
        )?;
        Ok(AddedComment {
            id,
            content: new_comment.content.clone(),
            owner: new_comment.owner.clone(),
        })
    }

    fn verify_comment_exists(&self, comment_id: &str, thread_id: &str) -> DomainResult<()> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM comments WHERE id = ?1 AND thread_id = ?2",
                params![comment_id, thread_id],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(DomainError::NotFound("comment tidak ditemukan".into()));
        }
        Ok(())
    }

    fn verify_comment_owner(&self, comment_id: &str, owner: &str) -> DomainResult<()> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT owner FROM comments WHERE id = ?1",
                params![comment_id],
                |row| row.get(0),
            )
            .optional()?;
        match stored {
            Some(stored) if stored == owner => Ok(()),
            _ => Err(DomainError::Forbidden(
                "anda tidak berhak mengakses komentar ini".into(),
            )),
        }
    }

    fn delete_comment_by_id(&self, comment_id: &str) -> DomainResult<()> {
        self.conn.execute(
            "UPDATE comments SET is_deleted = 1 WHERE id = ?1",
            params![comment_id],
        )?;
        Ok(())
    }

    fn get_comments_by_thread_id(&self, thread_id: &str) -> DomainResult<Vec<CommentRow>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT comments.id, users.username, comments.created_at, comments.content,
                   comments.is_deleted, comments.like_count
            FROM comments
            INNER JOIN users ON comments.owner = users.id
            WHERE comments.thread_id = ?1
            ORDER BY datetime(comments.created_at) ASC
            "#,
        )?;
        let rows = stmt.query_map(params![thread_id], |row| {
            Ok(CommentRow {
                id: row.get(0)?,
                username: row.get(1)?,
                created_at: row.get(2)?,
                content: row.get(3)?,
                is_deleted: row.get(4)?,
                like_count: row.get(5)?,
            })
        })?;
        let mut comments = Vec::new();
        for row in rows {
            comments.push(row?);
        }
        Ok(comments)
    }

    fn has_comment_like(&self, comment_id: &str, user_id: &str) -> DomainResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM comment_likes WHERE comment_id = ?1 AND user_id = ?2",
                params![comment_id, user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // The counter only moves when the like row actually changed, so replayed
    // toggles cannot skew it.
    fn add_comment_like(&self, comment_id: &str, user_id: &str) -> DomainResult<bool> {
        let id = format!("like-{}", self.ids.next());
        let created_at = self.clock.now();
        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            r#"
            INSERT OR IGNORE INTO comment_likes (id, comment_id, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![id, comment_id, user_id, created_at],
        )?;
        if inserted == 1 {
            tx.execute(
                "UPDATE comments SET like_count = like_count + 1 WHERE id = ?1",
                params![comment_id],
            )?;
        }
        tx.commit()?;
        Ok(inserted == 1)
    }

    fn remove_comment_like(&self, comment_id: &str, user_id: &str) -> DomainResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute(
            "DELETE FROM comment_likes WHERE comment_id = ?1 AND user_id = ?2",
            params![comment_id, user_id],
        )?;
        if removed == 1 {
            tx.execute(
                "UPDATE comments SET like_count = MAX(like_count - 1, 0) WHERE id = ?1",
                params![comment_id],
            )?;
        }
        tx.commit()?;
        Ok(removed == 1)
    }
}
