mod authentications;
mod comments;
mod replies;
mod threads;
mod users;

use super::models::{CommentRow, ReplyRow, ThreadRow};
use crate::domain::comments::{AddedComment, NewComment};
use crate::domain::replies::{AddedReply, NewReply};
use crate::domain::threads::{AddedThread, NewThread};
use crate::domain::users::{RegisterUser, RegisteredUser};
use crate::domain::DomainResult;
use crate::utils::{Clock, IdSource};
use rusqlite::Connection;

pub trait ThreadRepository {
    fn add_thread(&self, new_thread: &NewThread) -> DomainResult<AddedThread>;
    fn verify_thread_exists(&self, thread_id: &str) -> DomainResult<()>;
    fn get_thread_by_id(&self, thread_id: &str) -> DomainResult<ThreadRow>;
}

pub trait CommentRepository {
    fn add_comment(&self, new_comment: &NewComment) -> DomainResult<AddedComment>;
    /// Scoped to the thread; soft-deleted comments still count as existing.
    fn verify_comment_exists(&self, comment_id: &str, thread_id: &str) -> DomainResult<()>;
    fn verify_comment_owner(&self, comment_id: &str, owner: &str) -> DomainResult<()>;
    fn delete_comment_by_id(&self, comment_id: &str) -> DomainResult<()>;
    fn get_comments_by_thread_id(&self, thread_id: &str) -> DomainResult<Vec<CommentRow>>;
    fn has_comment_like(&self, comment_id: &str, user_id: &str) -> DomainResult<bool>;
    /// True when the like was newly recorded; the stored counter moves only
    /// then.
    fn add_comment_like(&self, comment_id: &str, user_id: &str) -> DomainResult<bool>;
    /// True when a like row was removed; the decrement is floored at zero.
    fn remove_comment_like(&self, comment_id: &str, user_id: &str) -> DomainResult<bool>;
}

pub trait ReplyRepository {
    fn add_reply(&self, new_reply: &NewReply) -> DomainResult<AddedReply>;
    /// Scoped to the comment; callers gate the thread separately.
    fn verify_reply_exists(&self, reply_id: &str, comment_id: &str) -> DomainResult<()>;
    fn verify_reply_owner(&self, reply_id: &str, owner: &str) -> DomainResult<()>;
    fn delete_reply_by_id(&self, reply_id: &str) -> DomainResult<()>;
    /// Replies for every listed comment in one query, oldest first. An empty
    /// id list short-circuits to an empty result.
    fn get_replies_by_comment_ids(&self, comment_ids: &[String]) -> DomainResult<Vec<ReplyRow>>;
}

pub trait UserRepository {
    /// Expects `register_user.password` to already be a hash.
    fn add_user(&self, register_user: &RegisterUser) -> DomainResult<RegisteredUser>;
    fn verify_available_username(&self, username: &str) -> DomainResult<()>;
    fn get_password_by_username(&self, username: &str) -> DomainResult<String>;
    fn get_id_by_username(&self, username: &str) -> DomainResult<String>;
}

pub trait AuthenticationRepository {
    fn add_token(&self, token: &str) -> DomainResult<()>;
    fn check_token_availability(&self, token: &str) -> DomainResult<()>;
    fn delete_token(&self, token: &str) -> DomainResult<()>;
}

/// Borrowed bundle of rusqlite-backed repositories, created under the
/// connection lock via `Database::with_repositories`.
pub struct SqliteRepositories<'conn> {
    conn: &'conn Connection,
    ids: &'conn IdSource,
    clock: &'conn Clock,
}

impl<'conn> SqliteRepositories<'conn> {
    pub fn new(conn: &'conn Connection, ids: &'conn IdSource, clock: &'conn Clock) -> Self {
        Self { conn, ids, clock }
    }

    pub fn threads(&self) -> impl ThreadRepository + '_ {
        threads::SqliteThreadRepository {
            conn: self.conn,
            ids: self.ids,
            clock: self.clock,
        }
    }

    pub fn comments(&self) -> impl CommentRepository + '_ {
        comments::SqliteCommentRepository {
            conn: self.conn,
            ids: self.ids,
            clock: self.clock,
        }
    }

    pub fn replies(&self) -> impl ReplyRepository + '_ {
        replies::SqliteReplyRepository {
            conn: self.conn,
            ids: self.ids,
            clock: self.clock,
        }
    }

    pub fn users(&self) -> impl UserRepository + '_ {
        users::SqliteUserRepository {
            conn: self.conn,
            ids: self.ids,
            clock: self.clock,
        }
    }

    pub fn authentications(&self) -> impl AuthenticationRepository + '_ {
        authentications::SqliteAuthenticationRepository { conn: self.conn }
    }
}
