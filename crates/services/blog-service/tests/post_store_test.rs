//! Post store tests against a migrated in-memory SQLite database.

mod support;

use blog_service_lib::Services;
use common::AppError;
use domain::{PostForm, PostPatch, User, UserForm};

async fn author(services: &Services, name: &str) -> User {
    services
        .users
        .create_user(UserForm::new(
            name,
            format!("{}@example.com", name.to_lowercase()),
            "password",
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_and_get_post_with_author() {
    let (_db, services) = support::setup().await;
    let jane = author(&services, "Jane").await;

    let post = services
        .posts
        .create_post(PostForm::new(" Hello <World> ", "First post", jane.id))
        .await
        .unwrap();
    assert!(post.id > 0);
    assert_eq!(post.title, "Hello &lt;World&gt;");

    let found = services.posts.get_post(post.id).await.unwrap();
    assert_eq!(found.post.id, post.id);
    assert_eq!(found.author.map(|a| a.id), Some(jane.id));
}

#[tokio::test]
async fn test_post_for_missing_author_is_persistence_error() {
    let (_db, services) = support::setup().await;

    let err = services
        .posts
        .create_post(PostForm::new("Orphan", "No author", 77))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Persistence(_)));
    assert!(err.is_foreign_key_violation());
    assert!(!err.is_unique_violation());
    assert!(services.posts.list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_missing_post_is_not_found() {
    let (_db, services) = support::setup().await;

    assert!(matches!(
        services.posts.get_post(1).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_only_author_can_update() {
    let (_db, services) = support::setup().await;
    let jane = author(&services, "Jane").await;
    let john = author(&services, "John").await;
    let post = services
        .posts
        .create_post(PostForm::new("Title", "Body", jane.id))
        .await
        .unwrap();

    let err = services
        .posts
        .update_post(post.id, john.id, PostPatch::default().title("Hijacked"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let updated = services
        .posts
        .update_post(post.id, jane.id, PostPatch::default().content("Edited"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Title");
    assert_eq!(updated.content, "Edited");
}

#[tokio::test]
async fn test_only_author_can_delete() {
    let (_db, services) = support::setup().await;
    let jane = author(&services, "Jane").await;
    let john = author(&services, "John").await;
    let post = services
        .posts
        .create_post(PostForm::new("Title", "Body", jane.id))
        .await
        .unwrap();

    assert!(matches!(
        services.posts.delete_post(post.id, john.id).await,
        Err(AppError::Forbidden)
    ));
    assert_eq!(services.posts.delete_post(post.id, jane.id).await.unwrap(), 1);
    assert!(matches!(
        services.posts.delete_post(post.id, jane.id).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_deleting_author_cascades_to_posts() {
    let (_db, services) = support::setup().await;
    let jane = author(&services, "Jane").await;
    let post = services
        .posts
        .create_post(PostForm::new("Title", "Body", jane.id))
        .await
        .unwrap();

    services.users.delete_user(jane.id).await.unwrap();

    assert!(matches!(
        services.posts.get_post(post.id).await,
        Err(AppError::NotFound)
    ));
    assert!(services.posts.list_author_posts(jane.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_posts_includes_authors() {
    let (_db, services) = support::setup().await;
    let jane = author(&services, "Jane").await;
    let john = author(&services, "John").await;
    for (title, owner) in [("One", &jane), ("Two", &john), ("Three", &jane)] {
        services
            .posts
            .create_post(PostForm::new(title, "Body", owner.id))
            .await
            .unwrap();
    }

    let posts = services.posts.list_posts().await.unwrap();
    assert_eq!(posts.len(), 3);
    assert!(posts.iter().all(|p| p.author.is_some()));
    assert_eq!(
        posts[1].author.as_ref().map(|a| a.nickname.as_str()),
        Some("John")
    );

    assert_eq!(services.posts.list_author_posts(jane.id).await.unwrap().len(), 2);
}
