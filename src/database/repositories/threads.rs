use super::ThreadRepository;
use crate::database::models::ThreadRow;
use crate::domain::threads::{AddedThread, NewThread};
use crate::domain::{DomainError, DomainResult};
use crate::utils::{Clock, IdSource};
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteThreadRepository<'conn> {
    pub(super) conn: &'conn Connection,
    pub(super) ids: &'conn IdSource,
    pub(super) clock: &'conn Clock,
}

impl ThreadRepository for SqliteThreadRepository<'_> {
    fn add_thread(&self, new_thread: &NewThread) -> DomainResult<AddedThread> {
        let id = format!("thread-{}", self.ids.next());
        let created_at = self.clock.now();
        self.conn.execute(
            r#"
            INSERT INTO threads (id, title, body, created_at, owner)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                id,
                new_thread.title,
                new_thread.body,
                created_at,
                new_thread.owner
            ],
        )?;
        Ok(AddedThread {
            id,
            title: new_thread.title.clone(),
            owner: new_thread.owner.clone(),
        })
    }

    fn verify_thread_exists(&self, thread_id: &str) -> DomainResult<()> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM threads WHERE id = ?1",
                params![thread_id],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(DomainError::NotFound("thread tidak ditemukan".into()));
        }
        Ok(())
    }

    fn get_thread_by_id(&self, thread_id: &str) -> DomainResult<ThreadRow> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT threads.id, threads.title, threads.body, threads.created_at, users.username
                FROM threads
                INNER JOIN users ON threads.owner = users.id
                WHERE threads.id = ?1
                "#,
                params![thread_id],
                |row| {
                    Ok(ThreadRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        body: row.get(2)?,
                        created_at: row.get(3)?,
                        username: row.get(4)?,
                    })
                },
            )
            .optional()?;
        row.ok_or_else(|| DomainError::NotFound("thread tidak ditemukan".into()))
    }
}
