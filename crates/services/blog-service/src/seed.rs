//! Development seed data.
//!
//! Fixtures are generated on demand from a count and a seed so repeated runs
//! with the same arguments produce the same rows.

use std::sync::Arc;

use tracing::info;

use common::AppResult;
use domain::{PostForm, UserForm, UNSET_ID};

use crate::infra::Database;
use crate::repository::{PostStore, UserStore};
use crate::service::{PostManager, PostService, UserManager, UserService};

/// One account and the post it authors.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub user: UserForm,
    pub post: PostForm,
}

/// Generated seed rows.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    items: Vec<Fixture>,
}

impl Fixtures {
    /// Generate `count` fixtures whose names and emails are derived from `seed`.
    pub fn generate(count: usize, seed: u64) -> Self {
        let items = (1..=count)
            .map(|i| Fixture {
                user: UserForm::new(
                    format!("Author {seed}-{i}"),
                    format!("author{seed}.{i}@example.com"),
                    format!("password-{seed}-{i}"),
                ),
                // Author is filled in once the user row exists
                post: PostForm::new(
                    format!("Post {seed}-{i}"),
                    format!("Hello from author {seed}-{i}"),
                    UNSET_ID,
                ),
            })
            .collect();

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fixture> {
        self.items.iter()
    }
}

impl IntoIterator for Fixtures {
    type Item = Fixture;
    type IntoIter = std::vec::IntoIter<Fixture>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Rows written by a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub posts: usize,
}

/// Recreate the schema, then insert every fixture through the services.
pub async fn load(db: &Database, fixtures: Fixtures) -> AppResult<SeedSummary> {
    db.reset_schema().await?;
    info!("Schema recreated");

    let users = UserManager::new(Arc::new(UserStore::new(db.get_connection())));
    let posts = PostManager::new(Arc::new(PostStore::new(db.get_connection())));

    let mut summary = SeedSummary { users: 0, posts: 0 };
    for fixture in fixtures {
        let user = users.create_user(fixture.user).await?;
        summary.users += 1;

        let mut post = fixture.post;
        post.author_id = user.id;
        posts.create_post(post).await?;
        summary.posts += 1;
    }

    info!(users = summary.users, posts = summary.posts, "Seed data loaded");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Action;

    #[test]
    fn test_generate_count() {
        assert_eq!(Fixtures::generate(3, 1).len(), 3);
        assert!(Fixtures::generate(0, 1).is_empty());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = Fixtures::generate(2, 7);
        let b = Fixtures::generate(2, 7);
        let emails = |f: &Fixtures| f.iter().map(|x| x.user.email.clone()).collect::<Vec<_>>();

        assert_eq!(emails(&a), emails(&b));
        assert_ne!(emails(&a), emails(&Fixtures::generate(2, 8)));
    }

    #[test]
    fn test_generated_users_are_valid_and_distinct() {
        let fixtures = Fixtures::generate(5, 42);
        let mut nicknames: Vec<_> = fixtures.iter().map(|f| f.user.nickname.clone()).collect();
        nicknames.dedup();
        assert_eq!(nicknames.len(), 5);

        for fixture in fixtures.iter() {
            assert!(fixture.user.validate(Action::Create).is_ok());
        }
    }
}
