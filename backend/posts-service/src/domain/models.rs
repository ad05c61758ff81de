use super::document_id::DocumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a memory shared by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub title: String,
    pub message: String,
    pub creator: String,
    pub tags: Vec<String>,
    /// Base64 image data, empty when no file was attached
    pub selected_file: String,
    pub likes: Vec<String>,
    pub comments: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Incremented on every applied write
    pub version: i64,
}

/// Values for a post that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub message: String,
    pub creator: String,
    pub tags: Vec<String>,
    pub selected_file: String,
}

impl NewPost {
    /// Materialize the stored form: fresh identifier, creation time, empty engagement.
    pub fn into_post(self, id: DocumentId, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            message: self.message,
            creator: self.creator,
            tags: self.tags,
            selected_file: self.selected_file,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at,
            version: 0,
        }
    }
}

/// Field replacement for an update; `None` keeps the stored value.
///
/// Likes, comments and the creation time are never patched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub creator: Option<String>,
    pub tags: Option<Vec<String>>,
    pub selected_file: Option<String>,
}

impl PostPatch {
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(message) = &self.message {
            post.message = message.clone();
        }
        if let Some(creator) = &self.creator {
            post.creator = creator.clone();
        }
        if let Some(tags) = &self.tags {
            post.tags = tags.clone();
        }
        if let Some(selected_file) = &self.selected_file {
            post.selected_file = selected_file.clone();
        }
    }
}

/// Result of a version-checked write
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Applied(Post),
    /// No document with that identifier
    Missing,
    /// Document exists but its version moved on
    Stale,
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
