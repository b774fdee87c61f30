use crate::auth::PasswordHash;
use crate::database::repositories::UserRepository;
use crate::database::Database;
use crate::domain::users::{RegisterUser, RegisteredUser};
use crate::domain::DomainResult;
use serde_json::Value;
use std::sync::Arc;

/// User registration: payload validation, username availability, password
/// hashing, persistence.
#[derive(Clone)]
pub struct UserService {
    database: Database,
    password_hash: Arc<dyn PasswordHash>,
}

impl UserService {
    pub fn new(database: Database, password_hash: Arc<dyn PasswordHash>) -> Self {
        Self {
            database,
            password_hash,
        }
    }

    pub fn add_user(&self, payload: &Value) -> DomainResult<RegisteredUser> {
        let mut register_user = RegisterUser::parse(payload)?;
        // Hash outside the connection lock; the availability check and insert
        // then share one lock scope.
        register_user.password = self.password_hash.hash(&register_user.password)?;
        self.database.with_repositories(|repos| {
            let users = repos.users();
            users.verify_available_username(&register_user.username)?;
            users.add_user(&register_user)
        })
    }
}
