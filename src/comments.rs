use crate::database::repositories::{CommentRepository, ThreadRepository};
use crate::database::Database;
use crate::domain::comments::{AddCommentLike, AddedComment, NewComment};
use crate::domain::DomainResult;
use serde_json::Value;

/// Comment creation, soft deletion, and per-user like toggling.
#[derive(Clone)]
pub struct CommentService {
    database: Database,
}

impl CommentService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn add_comment(&self, payload: &Value) -> DomainResult<AddedComment> {
        let new_comment = NewComment::parse(payload)?;
        self.database.with_repositories(|repos| {
            repos.threads().verify_thread_exists(&new_comment.thread_id)?;
            repos.comments().add_comment(&new_comment)
        })
    }

    /// Existence is checked before ownership, so a caller can never learn who
    /// owns a comment that is not there.
    pub fn delete_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
        owner: &str,
    ) -> DomainResult<()> {
        self.database.with_repositories(|repos| {
            repos.threads().verify_thread_exists(thread_id)?;
            let comments = repos.comments();
            comments.verify_comment_exists(comment_id, thread_id)?;
            comments.verify_comment_owner(comment_id, owner)?;
            comments.delete_comment_by_id(comment_id)
        })
    }

    /// Returns true when the toggle landed in the liked state.
    pub fn toggle_comment_like(&self, thread_id: &str, payload: &Value) -> DomainResult<bool> {
        let like = AddCommentLike::parse(payload)?;
        self.database.with_repositories(|repos| {
            let comments = repos.comments();
            comments.verify_comment_exists(&like.comment_id, thread_id)?;
            if comments.has_comment_like(&like.comment_id, &like.user_id)? {
                comments.remove_comment_like(&like.comment_id, &like.user_id)?;
                Ok(false)
            } else {
                comments.add_comment_like(&like.comment_id, &like.user_id)?;
                Ok(true)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repositories::UserRepository;
    use crate::database::Database;
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

    fn seed_thread(database: &Database, owner: &str) -> String {
        ThreadService::new(database.clone())
            .add_thread(&json!({
                "title": "thread title",
                "body": "thread body",
                "owner": owner,
            }))
            .expect("seed thread")
            .id
    }

    fn comment_like_count(database: &Database, thread_id: &str, comment_id: &str) -> i64 {
        database
            .with_repositories(|repos| repos.comments().get_comments_by_thread_id(thread_id))
            .expect("list comments")
            .into_iter()
            .find(|row| row.id == comment_id)
            .expect("comment present")
            .like_count
    }

    #[test]
    fn add_comment_requires_an_existing_thread() {
        let database = setup_database();
        let service = CommentService::new(database.clone());
        let owner = register_user(&database, "dicoding");

        let err = service
            .add_comment(&json!({
                "content": "comment content",
                "threadId": "thread-999",
                "owner": owner,
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(err.to_string(), "thread tidak ditemukan");
    }

    #[test]
    fn add_comment_persists_and_echoes_the_content() {
        let database = setup_database();
        let service = CommentService::new(database.clone());
        let owner = register_user(&database, "dicoding");
        let thread_id = seed_thread(&database, &owner);

        let added = service
            .add_comment(&json!({
                "content": "comment content",
                "threadId": thread_id,
                "owner": owner,
            }))
            .expect("add comment");
        assert!(added.id.starts_with("comment-"));
        assert_eq!(added.content, "comment content");
        assert_eq!(added.owner, owner);
    }

    #[test]
    fn delete_comment_checks_thread_comment_then_owner() {
        let database = setup_database();
        let service = CommentService::new(database.clone());
        let owner = register_user(&database, "dicoding");
        let intruder = register_user(&database, "johndoe");
        let thread_id = seed_thread(&database, &owner);
        let other_thread_id = seed_thread(&database, &owner);

        let comment = service
            .add_comment(&json!({
                "content": "comment content",
                "threadId": thread_id,
                "owner": owner,
            }))
            .expect("add comment");

        let err = service
            .delete_comment("thread-999", &comment.id, &owner)
            .unwrap_err();
        assert_eq!(err.to_string(), "thread tidak ditemukan");

        let err = service
            .delete_comment(&other_thread_id, &comment.id, &owner)
            .unwrap_err();
        assert_eq!(err.to_string(), "comment tidak ditemukan");

        let err = service
            .delete_comment(&thread_id, &comment.id, &intruder)
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // The failed attempts left the comment untouched.
        let rows = database
            .with_repositories(|repos| repos.comments().get_comments_by_thread_id(&thread_id))
            .expect("list comments");
        assert!(!rows[0].is_deleted);

        service
            .delete_comment(&thread_id, &comment.id, &owner)
            .expect("owner delete");
        let rows = database
            .with_repositories(|repos| repos.comments().get_comments_by_thread_id(&thread_id))
            .expect("list comments");
        assert!(rows[0].is_deleted);
    }

    #[test]
    fn toggle_comment_like_rejects_invalid_payloads_first() {
        let database = setup_database();
        let service = CommentService::new(database);

        let err = service
            .toggle_comment_like("thread-123", &json!({ "commentId": "comment-123" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "ADD_COMMENT_LIKE.NOT_CONTAIN_NEEDED_PROPERTY");
    }

    #[test]
    fn toggle_comment_like_requires_the_comment_in_that_thread() {
        let database = setup_database();
        let service = CommentService::new(database.clone());
        let owner = register_user(&database, "dicoding");
        let thread_id = seed_thread(&database, &owner);
        let other_thread_id = seed_thread(&database, &owner);

        let comment = service
            .add_comment(&json!({
                "content": "comment content",
                "threadId": thread_id,
                "owner": owner,
            }))
            .expect("add comment");

        let err = service
            .toggle_comment_like(
                &other_thread_id,
                &json!({ "commentId": comment.id, "userId": owner }),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "comment tidak ditemukan");
    }

    #[test]
    fn toggling_twice_returns_to_the_unliked_state() {
        let database = setup_database();
        let service = CommentService::new(database.clone());
        let owner = register_user(&database, "dicoding");
        let thread_id = seed_thread(&database, &owner);

        let comment = service
            .add_comment(&json!({
                "content": "comment content",
                "threadId": thread_id,
                "owner": owner,
            }))
            .expect("add comment");
        let payload = json!({ "commentId": comment.id, "userId": owner });

        let liked = service
            .toggle_comment_like(&thread_id, &payload)
            .expect("first toggle");
        assert!(liked);
        assert_eq!(comment_like_count(&database, &thread_id, &comment.id), 1);

        let liked = service
            .toggle_comment_like(&thread_id, &payload)
            .expect("second toggle");
        assert!(!liked);
        assert_eq!(comment_like_count(&database, &thread_id, &comment.id), 0);
    }

    #[test]
    fn likes_from_different_users_accumulate() {
        let database = setup_database();
        let service = CommentService::new(database.clone());
        let first = register_user(&database, "dicoding");
        let second = register_user(&database, "johndoe");
        let thread_id = seed_thread(&database, &first);

        let comment = service
            .add_comment(&json!({
                "content": "comment content",
                "threadId": thread_id,
                "owner": first,
            }))
            .expect("add comment");

        service
            .toggle_comment_like(&thread_id, &json!({ "commentId": comment.id, "userId": first }))
            .expect("first user likes");
        service
            .toggle_comment_like(&thread_id, &json!({ "commentId": comment.id, "userId": second }))
            .expect("second user likes");
        assert_eq!(comment_like_count(&database, &thread_id, &comment.id), 2);

        service
            .toggle_comment_like(&thread_id, &json!({ "commentId": comment.id, "userId": first }))
            .expect("first user unlikes");
        assert_eq!(comment_like_count(&database, &thread_id, &comment.id), 1);
    }
}
