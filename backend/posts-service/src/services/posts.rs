/// Post service - listing, search, CRUD, likes and comments
use crate::domain::{
    append_comment, engagement, number_of_pages, toggle_like, DocumentId, NewPost, PageWindow,
    Post, PostPatch, SearchPredicate, WriteOutcome,
};
use crate::error::{AppError, Result};
use crate::repository::PostRepository;
use serde::Serialize;
use std::sync::Arc;

/// Read-modify-write attempts before a like/comment gives up with 409
pub const MAX_WRITE_ATTEMPTS: usize = 5;

/// One page of the listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub data: Vec<Post>,
    pub current_page: i64,
    pub number_of_page: i64,
}

#[derive(Debug)]
pub enum LikeOutcome {
    Updated(Post),
    /// No acting user; reported with a 200 and a message, not an error status
    Unauthenticated,
}

pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn ping(&self) -> Result<()> {
        self.repo.ping().await
    }

    /// Newest-first page plus total page count
    pub async fn list_posts(&self, page: Option<&str>) -> Result<PostPage> {
        let window = PageWindow::parse(page)?;

        let total = self.repo.count_all().await?;
        let data = self.repo.list_page(window.skip, window.limit).await?;

        Ok(PostPage {
            data,
            current_page: window.page,
            number_of_page: number_of_pages(total),
        })
    }

    pub async fn search_posts(&self, search_query: &str, tags: &str) -> Result<Vec<Post>> {
        let predicate = SearchPredicate::build(search_query, tags)?;
        let posts = self.repo.find_by_predicate(&predicate).await?;

        tracing::debug!(
            query = search_query,
            tags = predicate.tags().len(),
            found = posts.len(),
            "post search"
        );

        Ok(posts)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let post_id = DocumentId::parse(id)?;
        self.repo
            .find_by_id(&post_id)
            .await?
            .ok_or_else(|| AppError::post_not_found(id))
    }

    /// Store failures surface as conflicts on create
    pub async fn create_post(&self, post: NewPost) -> Result<Post> {
        let post = self.repo.insert(post).await.map_err(|err| match err {
            AppError::Database(e) => AppError::Conflict(e.to_string()),
            other => other,
        })?;

        tracing::info!(post_id = %post.id, creator = %post.creator, "post created");
        Ok(post)
    }

    /// Patch the given fields. A supplied `expected_version` makes the write conditional.
    pub async fn update_post(
        &self,
        id: &str,
        patch: PostPatch,
        expected_version: Option<i64>,
    ) -> Result<Post> {
        let post_id = DocumentId::parse(id)?;

        match self
            .repo
            .replace_by_id(&post_id, &patch, expected_version)
            .await?
        {
            WriteOutcome::Applied(post) => Ok(post),
            WriteOutcome::Missing => Err(AppError::post_not_found(id)),
            WriteOutcome::Stale => Err(AppError::Conflict(format!(
                "Post {} was modified concurrently (expected version {})",
                id,
                expected_version.unwrap_or_default()
            ))),
        }
    }

    pub async fn delete_post(&self, id: &str) -> Result<()> {
        let post_id = DocumentId::parse(id)?;

        if !self.repo.delete_by_id(&post_id).await? {
            return Err(AppError::post_not_found(id));
        }

        tracing::info!(%post_id, "post deleted");
        Ok(())
    }

    /// Toggle the acting user's like.
    ///
    /// The user check runs before identifier validation: an anonymous caller gets
    /// `Unauthenticated` even for a malformed id.
    pub async fn like_post(&self, id: &str, user: Option<&str>) -> Result<LikeOutcome> {
        let Some(user) = user else {
            return Ok(LikeOutcome::Unauthenticated);
        };
        let post_id = DocumentId::parse(id)?;

        let post = self
            .rewrite_engagement(&post_id, |post| {
                (toggle_like(&post.likes, user), post.comments.clone())
            })
            .await?;

        tracing::debug!(
            %post_id,
            user,
            liked = engagement::has_liked(&post.likes, user),
            "like toggled"
        );
        Ok(LikeOutcome::Updated(post))
    }

    pub async fn comment_post(&self, id: &str, value: &str) -> Result<Post> {
        let post_id = DocumentId::parse(id)?;

        self.rewrite_engagement(&post_id, |post| {
            (post.likes.clone(), append_comment(&post.comments, value))
        })
        .await
    }

    /// Read the post, compute new (likes, comments), write back only if nobody
    /// else wrote in between; otherwise re-read and try again.
    async fn rewrite_engagement<F>(&self, post_id: &DocumentId, next: F) -> Result<Post>
    where
        F: Fn(&Post) -> (Vec<String>, Vec<String>) + Send + Sync,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let post = self
                .repo
                .find_by_id(post_id)
                .await?
                .ok_or_else(|| AppError::post_not_found(post_id.as_str()))?;

            let (likes, comments) = next(&post);

            match self
                .repo
                .write_engagement(post_id, post.version, &likes, &comments)
                .await?
            {
                WriteOutcome::Applied(updated) => return Ok(updated),
                WriteOutcome::Missing => return Err(AppError::post_not_found(post_id.as_str())),
                WriteOutcome::Stale => {
                    tracing::debug!(%post_id, attempt, "stale engagement write, retrying");
                }
            }
        }

        tracing::warn!(%post_id, "engagement write kept losing the version race");
        Err(AppError::Conflict(format!(
            "Post {} is being modified too frequently, try again",
            post_id
        )))
    }
}
