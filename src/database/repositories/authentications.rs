use super::AuthenticationRepository;
use crate::domain::{DomainError, DomainResult};
use rusqlite::{params, Connection, OptionalExtension};

pub(super) struct SqliteAuthenticationRepository<'conn> {
    pub(super) conn: &'conn Connection,
}

impl AuthenticationRepository for SqliteAuthenticationRepository<'_> {
    fn add_token(&self, token: &str) -> DomainResult<()> {
        self.conn.execute(
            "INSERT INTO authentications (token) VALUES (?1)",
            params![token],
        )?;
        Ok(())
    }

    fn check_token_availability(&self, token: &str) -> DomainResult<()> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT token FROM authentications WHERE token = ?1",
                params![token],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(DomainError::Invariant(
                "refresh token tidak ditemukan di database".into(),
            ));
        }
        Ok(())
    }

    fn delete_token(&self, token: &str) -> DomainResult<()> {
        self.conn.execute(
            "DELETE FROM authentications WHERE token = ?1",
            params![token],
        )?;
        Ok(())
    }
}
