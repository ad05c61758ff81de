//! In-memory repository doubles for HTTP and service tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use posts_service::domain::{
    DocumentId, NewPost, NewUser, Post, PostPatch, SearchPredicate, User, WriteOutcome,
};
use posts_service::error::{AppError, Result};
use posts_service::repository::{PostRepository, UserRepository};
use posts_service::security::TokenKeys;
use posts_service::services::{PostService, UserService};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Vec-backed post store.
///
/// Counts every call so tests can assert the store was never reached, can fail
/// inserts on demand, and can simulate competing writers on engagement writes.
#[derive(Default)]
pub struct MemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    calls: AtomicUsize,
    fail_inserts: AtomicBool,
    fail_ping: AtomicBool,
    stale_engagement_writes: AtomicUsize,
    engagement_attempts: AtomicUsize,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn engagement_attempts(&self) -> usize {
        self.engagement_attempts.load(Ordering::SeqCst)
    }

    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn fail_ping(&self) {
        self.fail_ping.store(true, Ordering::SeqCst);
    }

    /// The next `n` engagement writes lose the race against another writer
    pub fn lose_next_engagement_writes(&self, n: usize) {
        self.stale_engagement_writes.store(n, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn stored(&self, id: &DocumentId) -> Option<Post> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list_page(&self, skip: i64, limit: i64) -> Result<Vec<Post>> {
        self.touch();
        let posts = Self::newest_first(self.posts.lock().unwrap().clone());
        Ok(posts
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_all(&self) -> Result<i64> {
        self.touch();
        Ok(self.posts.lock().unwrap().len() as i64)
    }

    async fn find_by_predicate(&self, predicate: &SearchPredicate) -> Result<Vec<Post>> {
        self.touch();
        let matched = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| predicate.matches(p))
            .cloned()
            .collect();
        Ok(Self::newest_first(matched))
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Post>> {
        self.touch();
        Ok(self.stored(id))
    }

    async fn insert(&self, post: NewPost) -> Result<Post> {
        self.touch();
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "insert rejected".into(),
            )));
        }

        let post = post.into_post(DocumentId::generate(), Utc::now());
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn replace_by_id(
        &self,
        id: &DocumentId,
        patch: &PostPatch,
        expected_version: Option<i64>,
    ) -> Result<WriteOutcome> {
        self.touch();
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| &p.id == id) else {
            return Ok(WriteOutcome::Missing);
        };

        if expected_version.is_some_and(|v| v != post.version) {
            return Ok(WriteOutcome::Stale);
        }

        patch.apply_to(post);
        post.version += 1;
        Ok(WriteOutcome::Applied(post.clone()))
    }

    async fn write_engagement(
        &self,
        id: &DocumentId,
        expected_version: i64,
        likes: &[String],
        comments: &[String],
    ) -> Result<WriteOutcome> {
        self.touch();
        self.engagement_attempts.fetch_add(1, Ordering::SeqCst);

        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| &p.id == id) else {
            return Ok(WriteOutcome::Missing);
        };

        let pending = self.stale_engagement_writes.load(Ordering::SeqCst);
        if pending > 0 {
            self.stale_engagement_writes
                .store(pending - 1, Ordering::SeqCst);
            // someone else committed first
            post.version += 1;
            return Ok(WriteOutcome::Stale);
        }

        if post.version != expected_version {
            return Ok(WriteOutcome::Stale);
        }

        post.likes = likes.to_vec();
        post.comments = comments.to_vec();
        post.version += 1;
        Ok(WriteOutcome::Applied(post.clone()))
    }

    async fn delete_by_id(&self, id: &DocumentId) -> Result<bool> {
        self.touch();
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| &p.id != id);
        Ok(posts.len() != before)
    }

    async fn ping(&self) -> Result<()> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Vec-backed user store; inserts can be made to fail like a unique violation
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    fail_inserts: AtomicBool,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "duplicate key value violates unique constraint \"users_email_key\"".into(),
            )));
        }

        let user = User {
            id: DocumentId::generate(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

/// Services wired to in-memory stores, with handles kept for assertions
pub struct TestContext {
    pub posts: Arc<MemoryPostRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub keys: Arc<TokenKeys>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(MemoryPostRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            keys: Arc::new(TokenKeys::new(TEST_SECRET, 3600)),
        }
    }

    pub fn post_service(&self) -> PostService {
        PostService::new(self.posts.clone())
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.users.clone(), self.keys.clone())
    }

    pub fn bearer(&self, user_id: &str) -> String {
        let token = self
            .keys
            .issue(user_id, &format!("{user_id}@example.com"))
            .expect("issue token");
        format!("Bearer {token}")
    }
}

pub fn new_post(title: &str, tags: &[&str]) -> NewPost {
    NewPost {
        title: title.to_string(),
        message: format!("{title} message"),
        creator: "creator-1".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        selected_file: String::new(),
    }
}
