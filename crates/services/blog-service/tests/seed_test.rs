//! Seeding tests against a migrated in-memory SQLite database.

mod support;

use blog_service_lib::seed::{self, Fixtures, SeedSummary};
use domain::UserForm;

#[tokio::test]
async fn test_seed_loads_users_and_posts() {
    let (db, services) = support::setup().await;

    let summary = seed::load(&db, Fixtures::generate(2, 1)).await.unwrap();
    assert_eq!(summary, SeedSummary { users: 2, posts: 2 });

    let users = services.users.list_users().await.unwrap();
    assert_eq!(users.len(), 2);

    let posts = services.posts.list_posts().await.unwrap();
    assert_eq!(posts.len(), 2);
    for entry in &posts {
        assert!(entry.author.is_some());
    }

    // Seeded passwords go through the normal hashing path
    let user = services
        .users
        .authenticate(UserForm::new("", "author1.1@example.com", "password-1-1"))
        .await
        .unwrap();
    assert_eq!(user.nickname, "Author 1-1");
}

#[tokio::test]
async fn test_seed_replaces_existing_rows() {
    let (db, services) = support::setup().await;

    seed::load(&db, Fixtures::generate(3, 1)).await.unwrap();
    seed::load(&db, Fixtures::generate(1, 2)).await.unwrap();

    let users = services.users.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "author2.1@example.com");
}

#[tokio::test]
async fn test_migration_status_after_setup() {
    let (db, _services) = support::setup().await;

    let status = db.migration_status().await.unwrap();
    assert_eq!(status.len(), 2);
    assert!(status.iter().all(|state| state.applied));
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_migration_status_after_rollback() {
    let (db, _services) = support::setup().await;

    db.rollback_migration().await.unwrap();
    let status = db.migration_status().await.unwrap();
    assert_eq!(
        status.iter().map(|state| state.applied).collect::<Vec<_>>(),
        vec![true, false]
    );
    assert!(status[1].name.contains("create_posts_table"));

    db.run_migrations().await.unwrap();
    assert!(db
        .migration_status()
        .await
        .unwrap()
        .iter()
        .all(|state| state.applied));
}
