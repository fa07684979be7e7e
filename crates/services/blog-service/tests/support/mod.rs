//! Shared setup for store tests: a migrated in-memory SQLite database.

use blog_service_lib::infra::Database;
use blog_service_lib::Services;
use common::DatabaseConfig;

pub async fn setup() -> (Database, Services) {
    let db = Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database should open and migrate");
    let services = Services::new(&db);
    (db, services)
}
