//! Post service - blog post lifecycle with author ownership checks.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{Post, PostForm, PostPatch, PostWithAuthor, MAX_PAGE_SIZE};

use crate::repository::PostRepository;

/// Post service trait for dependency injection.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Prepare, validate and insert a new post
    async fn create_post(&self, form: PostForm) -> AppResult<Post>;

    /// List up to `MAX_PAGE_SIZE` posts with their authors
    async fn list_posts(&self) -> AppResult<Vec<PostWithAuthor>>;

    /// List up to `MAX_PAGE_SIZE` posts written by one author
    async fn list_author_posts(&self, author_id: i32) -> AppResult<Vec<Post>>;

    /// Get post with its author
    async fn get_post(&self, id: i32) -> AppResult<PostWithAuthor>;

    /// Apply a partial update on behalf of `author_id`
    async fn update_post(&self, id: i32, author_id: i32, patch: PostPatch) -> AppResult<Post>;

    /// Delete a post on behalf of `author_id`, returning the number of rows removed
    async fn delete_post(&self, id: i32, author_id: i32) -> AppResult<u64>;
}

/// Concrete implementation of PostService using repository.
pub struct PostManager {
    repo: Arc<dyn PostRepository>,
}

impl PostManager {
    /// Create new post service instance with repository
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Load a post and make sure `author_id` owns it.
    async fn owned_post(&self, id: i32, author_id: i32) -> AppResult<Post> {
        let post = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        if !post.is_owned_by(author_id) {
            return Err(AppError::Forbidden);
        }
        Ok(post)
    }
}

#[async_trait]
impl PostService for PostManager {
    async fn create_post(&self, mut form: PostForm) -> AppResult<Post> {
        form.prepare();
        form.validate()?;

        let post = self.repo.create(form).await?;
        info!(post_id = post.id, author_id = post.author_id, "Post created");
        Ok(post)
    }

    async fn list_posts(&self) -> AppResult<Vec<PostWithAuthor>> {
        self.repo.list_with_authors(MAX_PAGE_SIZE).await
    }

    async fn list_author_posts(&self, author_id: i32) -> AppResult<Vec<Post>> {
        self.repo.list_by_author(author_id, MAX_PAGE_SIZE).await
    }

    async fn get_post(&self, id: i32) -> AppResult<PostWithAuthor> {
        self.repo.find_with_author(id).await?.ok_or_not_found()
    }

    async fn update_post(&self, id: i32, author_id: i32, mut patch: PostPatch) -> AppResult<Post> {
        patch.prepare();
        patch.validate()?;
        self.owned_post(id, author_id).await?;

        let post = self.repo.update(id, patch).await?.ok_or_not_found()?;
        info!(post_id = id, "Post updated");
        Ok(post)
    }

    async fn delete_post(&self, id: i32, author_id: i32) -> AppResult<u64> {
        self.owned_post(id, author_id).await?;

        let removed = self.repo.delete(id).await?;
        info!(post_id = id, removed, "Post deleted");
        Ok(removed)
    }
}
