//! Blog Service Library
//!
//! User accounts and blog posts persisted through SeaORM, with password
//! hashing, input sanitization and validation in front of every write.

pub mod config;
pub mod infra;
pub mod repository;
pub mod seed;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::info;

use crate::config::BlogServiceConfig;
use crate::infra::Database;
use crate::repository::{PostStore, UserStore};
use crate::seed::{Fixtures, SeedSummary};
use crate::service::{PostManager, PostService, UserManager, UserService};

/// Services wired to one database connection pool.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserService>,
    pub posts: Arc<dyn PostService>,
}

impl Services {
    /// Build repositories and services on top of an open database.
    pub fn new(db: &Database) -> Self {
        let user_repo = Arc::new(UserStore::new(db.get_connection()));
        let post_repo = Arc::new(PostStore::new(db.get_connection()));

        Self {
            users: Arc::new(UserManager::new(user_repo)),
            posts: Arc::new(PostManager::new(post_repo)),
        }
    }
}

/// Connect, apply pending migrations and build the services.
pub async fn connect(config: &BlogServiceConfig) -> Result<Services, DbErr> {
    let db = Database::connect(&config.database).await?;
    Ok(Services::new(&db))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &BlogServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for state in db.migration_status().await? {
                let marker = if state.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, state.name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Drop and recreate all tables, then load `count` generated fixtures.
pub async fn run_seed(
    config: &BlogServiceConfig,
    count: usize,
    seed: u64,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;
    let summary = seed::load(&db, Fixtures::generate(count, seed)).await?;
    Ok(summary)
}
