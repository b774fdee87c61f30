use super::ReplyRepository;
use crate::database::models::ReplyRow;
use crate::domain::replies::{AddedReply, NewReply};
use crate::domain::{DomainError, DomainResult};
use crate::utils::{Clock, IdSource};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

pub(super) struct SqliteReplyRepository<'conn> {
    pub(super) conn: &'conn Connection,
    pub(super) ids: &'conn IdSource,
    pub(super) clock: &'conn Clock,
}

impl ReplyRepository for SqliteReplyRepository<'_> {
    fn add_reply(&self, new_reply: &NewReply) -> DomainResult<AddedReply> {
        let id = format!("reply-{}", self.ids.next());
        let created_at = self.clock.now();
        self.conn.execute(
            r#"
            INSERT INTO replies (id, comment_id, content, created_at, owner)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                id,
                new_reply.comment_id,
                new_reply.content,
                created_at,
                new_reply.owner
            ],
        )?;
        Ok(AddedReply {
            id,
            content: new_reply.content.clone(),
            owner: new_reply.owner.clone(),
        })
    }

    fn verify_reply_exists(&self, reply_id: &str, comment_id: &str) -> DomainResult<()> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM replies WHERE id = ?1 AND comment_id = ?2",
                params![reply_id, comment_id],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(DomainError::NotFound("balasan tidak ditemukan".into()));
        }
        Ok(())
    }

    fn verify_reply_owner(&self, reply_id: &str, owner: &str) -> DomainResult<()> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT owner FROM replies WHERE id = ?1",
                params![reply_id],
                |row| row.get(0),
            )
            .optional()?;
        match stored {
            Some(stored) if stored == owner => Ok(()),
            _ => Err(DomainError::Forbidden(
                "anda tidak berhak mengakses balasan ini".into(),
            )),
        }
    }

    fn delete_reply_by_id(&self, reply_id: &str) -> DomainResult<()> {
        self.conn.execute(
            "UPDATE replies SET is_deleted = 1 WHERE id = ?1",
            params![reply_id],
        )?;
        Ok(())
    }

    fn get_replies_by_comment_ids(&self, comment_ids: &[String]) -> DomainResult<Vec<ReplyRow>> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; comment_ids.len()].join(", ");
        let sql = format!(
            r#"
            SELECT replies.id, replies.comment_id, users.username, replies.created_at,
                   replies.content, replies.is_deleted
            FROM replies
            INNER JOIN users ON replies.owner = users.id
            WHERE replies.comment_id IN ({placeholders})
            ORDER BY datetime(replies.created_at) ASC
            "#
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(comment_ids), |row| {
            Ok(ReplyRow {
                id: row.get(0)?,
                comment_id: row.get(1)?,
                username: row.get(2)?,
                created_at: row.get(3)?,
                content: row.get(4)?,
                is_deleted: row.get(5)?,
            })
        })?;
        let mut replies = Vec::new();
        for row in rows {
            replies.push(row?);
        }
        Ok(replies)
    }
}
