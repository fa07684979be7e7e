//! Post repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::post::{self, ActiveModel, Entity as PostEntity};
use super::entities::user::{self, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{Post, PostForm, PostPatch, PostWithAuthor, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>>;

    /// Find post by ID together with its author
    async fn find_with_author(&self, id: i32) -> AppResult<Option<PostWithAuthor>>;

    /// Insert a prepared post and return it with its assigned ID
    async fn create(&self, form: PostForm) -> AppResult<Post>;

    /// Overwrite the present fields and return the refreshed row
    async fn update(&self, id: i32, patch: PostPatch) -> AppResult<Option<Post>>;

    /// Delete post by ID, returning the number of rows removed
    async fn delete(&self, id: i32) -> AppResult<u64>;

    /// List at most `limit` posts ordered by ID, each with its author
    async fn list_with_authors(&self, limit: u64) -> AppResult<Vec<PostWithAuthor>>;

    /// List at most `limit` posts written by one author
    async fn list_by_author(&self, author_id: i32, limit: u64) -> AppResult<Vec<Post>>;
}

/// Concrete implementation of PostRepository
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn with_author((post, author): (post::Model, Option<user::Model>)) -> PostWithAuthor {
    PostWithAuthor {
        post: Post::from(post),
        author: author.map(User::from),
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Post::from))
    }

    async fn find_with_author(&self, id: i32) -> AppResult<Option<PostWithAuthor>> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(with_author))
    }

    async fn create(&self, form: PostForm) -> AppResult<Post> {
        let active_model = ActiveModel {
            id: NotSet,
            title: Set(form.title),
            content: Set(form.content),
            author_id: Set(form.author_id),
            created_at: Set(form.created_at),
            updated_at: Set(form.updated_at),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn update(&self, id: i32, patch: PostPatch) -> AppResult<Option<Post>> {
        let mut query = PostEntity::update_many()
            .col_expr(post::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(post::Column::Id.eq(id));

        if let Some(title) = patch.title {
            query = query.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(content) = patch.content {
            query = query.col_expr(post::Column::Content, Expr::value(content));
        }

        let result = query.exec(&self.db).await.map_err(AppError::from)?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn list_with_authors(&self, limit: u64) -> AppResult<Vec<PostWithAuthor>> {
        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(with_author).collect())
    }

    async fn list_by_author(&self, author_id: i32, limit: u64) -> AppResult<Vec<Post>> {
        let models = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Post::from).collect())
    }
}
