//! SQLite-backed stores.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::infrastructure::ports::RepoError;

mod card_repo;
mod card_row;
mod player_repo;
mod schema;

pub use card_repo::SqliteCardRepo;
pub use card_row::CardRow;
pub use player_repo::SqlitePlayerRepo;
pub use schema::ensure_schema;

/// Open a connection pool against `database_url`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, RepoError> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create all SQLite repositories from a pool.
pub struct SqliteRepositories {
    pub card: Arc<SqliteCardRepo>,
    pub player: Arc<SqlitePlayerRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            card: Arc::new(SqliteCardRepo::new(pool.clone())),
            player: Arc::new(SqlitePlayerRepo::new(pool)),
        }
    }
}

/// Maps a failed write, turning unique-index violations into
/// [`RepoError::ConstraintViolation`].
pub(crate) fn write_error(operation: &'static str, err: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return RepoError::constraint(db.message());
        }
    }
    RepoError::database(operation, err)
}
