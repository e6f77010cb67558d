use std::sync::Arc;

use crate::config::PoolConfig;
use crate::database::Database;

/// A migrated in-memory SQLite database. The pool is pinned to a single
/// connection since every `:memory:` connection is its own database.
pub async fn test_db() -> Arc<Database> {
    let pool = PoolConfig {
        max_connections: 1,
        min_connections: 1,
        ..PoolConfig::default()
    };
    let db = Database::connect("sqlite::memory:", &pool).await.unwrap();
    db.migrate_up(None).await.unwrap();

    Arc::new(db)
}
