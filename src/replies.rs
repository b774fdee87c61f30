use crate::database::repositories::{CommentRepository, ReplyRepository, ThreadRepository};
use crate::database::Database;
use crate::domain::replies::{AddedReply, NewReply};
use crate::domain::DomainResult;
use serde_json::Value;

/// Reply creation and soft deletion beneath a thread's comments.
#[derive(Clone)]
pub struct ReplyService {
    database: Database,
}

impl ReplyService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn add_reply(&self, payload: &Value) -> DomainResult<AddedReply> {
        let new_reply = NewReply::parse(payload)?;
        self.database.with_repositories(|repos| {
            repos.threads().verify_thread_exists(&new_reply.thread_id)?;
            repos
                .comments()
                .verify_comment_exists(&new_reply.comment_id, &new_reply.thread_id)?;
            repos.replies().add_reply(&new_reply)
        })
    }

    pub fn delete_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
        owner: &str,
    ) -> DomainResult<()> {
        self.database.with_repositories(|repos| {
            repos.threads().verify_thread_exists(thread_id)?;
            repos.comments().verify_comment_exists(comment_id, thread_id)?;
            let replies = repos.replies();
            replies.verify_reply_exists(reply_id, comment_id)?;
            replies.verify_reply_owner(reply_id, owner)?;
            replies.delete_reply_by_id(reply_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repositories::UserRepository;
    use crate::domain::users::RegisterUser;
    use crate::domain::DomainError;
    use crate::threads::ThreadService;
    use rusqlite::Connection;
    use serde_json::json;

    fn setup_database() -> Database {
        let conn = Connection::open_in_memory().expect("in-memory db");
        let database = Database::from_connection(conn, true);
        database.ensure_migrations().expect("migrations");
        database
    }

    fn register_user(database: &Database, username: &str) -> String {
        let register_user = RegisterUser {
            username: username.into(),
            password: "encrypted_password".into(),
            fullname: format!("{username} fullname"),
        };
        database
            .with_repositories(|repos| repos.users().add_user(&register_user))
            .expect("register user")
            .id
    }

    fn seed_thread_with_comment(database: &Database, owner: &str) -> (String, String) {
        let thread_id = ThreadService::new(database.clone())
            .add_thread(&json!({
                "title": "thread title",
                "body": "thread body",
                "owner": owner,
            }))
            .expect("seed thread")
            .id;
        let comment_id = crate::comments::CommentService::new(database.clone())
            .add_comment(&json!({
                "content": "comment content",
                "threadId": thread_id,
                "owner": owner,
            }))
            .expect("seed comment")
            .id;
        (thread_id, comment_id)
    }

    #[test]
    fn add_reply_walks_the_thread_and_comment_chain() {
        let database = setup_database();
        let service = ReplyService::new(database.clone());
        let owner = register_user(&database, "dicoding");
        let (thread_id, comment_id) = seed_thread_with_comment(&database, &owner);

        let err = service
            .add_reply(&json!({
                "content": "reply content",
                "threadId": "thread-999",
                "commentId": comment_id,
                "owner": owner,
            }))
            .unwrap_err();
        assert_eq!(err.to_string(), "thread tidak ditemukan");

        let err = service
            .add_reply(&json!({
                "content": "reply content",
                "threadId": thread_id,
                "commentId": "comment-999",
                "owner": owner,
            }))
            .unwrap_err();
        assert_eq!(err.to_string(), "comment tidak ditemukan");

        let added = service
            .add_reply(&json!({
                "content": "reply content",
                "threadId": thread_id,
                "commentId": comment_id,
                "owner": owner,
            }))
            .expect("add reply");
        assert!(added.id.starts_with("reply-"));
        assert_eq!(added.content, "reply content");
        assert_eq!(added.owner, owner);
    }

    #[test]
    fn delete_reply_requires_ownership() {
        let database = setup_database();
        let service = ReplyService::new(database.clone());
        let owner = register_user(&database, "dicoding");
        let intruder = register_user(&database, "johndoe");
        let (thread_id, comment_id) = seed_thread_with_comment(&database, &owner);

        let reply = service
            .add_reply(&json!({
                "content": "reply content",
                "threadId": thread_id,
                "commentId": comment_id,
                "owner": owner,
            }))
            .expect("add reply");

        let err = service
            .delete_reply(&thread_id, &comment_id, &reply.id, &intruder)
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(err.to_string(), "anda tidak berhak mengakses balasan ini");

        service
            .delete_reply(&thread_id, &comment_id, &reply.id, &owner)
            .expect("owner delete");
    }

    #[test]
    fn delete_reply_reports_each_missing_link() {
        let database = setup_database();
        let service = ReplyService::new(database.clone());
        let owner = register_user(&database, "dicoding");
        let (thread_id, comment_id) = seed_thread_with_comment(&database, &owner);

        let err = service
            .delete_reply("thread-999", &comment_id, "reply-123", &owner)
            .unwrap_err();
        assert_eq!(err.to_string(), "thread tidak ditemukan");

        let err = service
            .delete_reply(&thread_id, "comment-999", "reply-123", &owner)
            .unwrap_err();
        assert_eq!(err.to_string(), "comment tidak ditemukan");

        let err = service
            .delete_reply(&thread_id, &comment_id, "reply-999", &owner)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "balasan tidak ditemukan");
    }

    #[test]
    fn deleted_replies_stay_listed_with_the_flag_set() {
        let database = setup_database();
        let service = ReplyService::new(database.clone());
        let owner = register_user(&database, "dicoding");
        let (thread_id, comment_id) = seed_thread_with_comment(&database, &owner);

        let reply = service
            .add_reply(&json!({
                "content": "reply content",
                "threadId": thread_id,
                "commentId": comment_id,
                "owner": owner,
            }))
            .expect("add reply");
        service
            .delete_reply(&thread_id, &comment_id, &reply.id, &owner)
            .expect("delete reply");

        let rows = database
            .with_repositories(|repos| {
                repos.replies().get_replies_by_comment_ids(&[comment_id.clone()])
            })
            .expect("list replies");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_deleted);
    }
}
