use crate::domain::{Payload, ValidationError, ValidationKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

const USERNAME_MAX_CHARS: usize = 50;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\w+$").expect("username pattern is valid"))
}

/// Validated registration payload. The password is still plaintext here; the
/// user service swaps it for a hash before the row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub fullname: String,
}

impl RegisterUser {
    pub fn parse(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Payload::new("REGISTER_USER", payload);
        fields.require(&["username", "password", "fullname"])?;
        let username = fields.string("username")?;
        let password = fields.string("password")?;
        let fullname = fields.string("fullname")?;
        if username.chars().count() > USERNAME_MAX_CHARS {
            return Err(fields.error(ValidationKind::UsernameTooLong));
        }
        if !username_pattern().is_match(&username) {
            return Err(fields.error(ValidationKind::UsernameRestrictedCharacter));
        }
        Ok(Self {
            username,
            password,
            fullname,
        })
    }
}

/// Echo of a freshly registered user. Never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredUser {
    pub id: String,
    pub username: String,
    pub fullname: String,
}

/// Validated login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

impl UserLogin {
    pub fn parse(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Payload::new("USER_LOGIN", payload);
        fields.require(&["username", "password"])?;
        Ok(Self {
            username: fields.string("username")?,
            password: fields.string("password")?,
        })
    }
}
