use super::UserRepository;
use crate::domain::users::{RegisterUser, RegisteredUser};
use crate::domain::{DomainError, DomainResult};
use crate::utils::{Clock, IdSource};
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteUserRepository<'conn> {
    pub(super) conn: &'conn Connection,
    pub(super) ids: &'conn IdSource,
    pub(super) clock: &'conn Clock,
}

impl UserRepository for SqliteUserRepository<'_> {
    fn add_user(&self, register_user: &RegisterUser) -> DomainResult<RegisteredUser> {
        let id = format!("user-{}", self.ids.next());
        let created_at = self.clock.now();
        self.conn.execute(
            r#"
            INSERT INTO users (id, username, password, fullname, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                id,
                register_user.username,
                register_user.password,
                register_user.fullname,
                created_at
            ],
        )?;
        Ok(RegisteredUser {
            id,
            username: register_user.username.clone(),
            fullname: register_user.fullname.clone(),
        })
    }

    fn verify_available_username(&self, username: &str) -> DomainResult<()> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_some() {
            return Err(DomainError::Invariant("username tidak tersedia".into()));
        }
        Ok(())
    }

    fn get_password_by_username(&self, username: &str) -> DomainResult<String> {
        let password: Option<String> = self
            .conn
            .query_row(
                "SELECT password FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()?;
        password.ok_or_else(|| DomainError::NotFound("username tidak ditemukan".into()))
    }

    fn get_id_by_username(&self, username: &str) -> DomainResult<String> {
        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM users WHERE username = ?1",
                params![username],
                |row| row.get(0),
            )
            .optional()?;
        id.ok_or_else(|| DomainError::NotFound("username tidak ditemukan".into()))
    }
}
