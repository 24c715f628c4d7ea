use std::path::PathBuf;

use async_trait::async_trait;

use quote_core::db::repository::{RepositoryError, SessionRepository};
use quote_core::db::{DbConfig, RepositoryFactory};

use crate::repository::SqliteRepository;

/// Resolve the seeds directory at runtime so it works in both development
/// and packaged distribution.
///
/// Resolution order:
/// 1. **`QUOTE_DB_SQLITE_SEEDS_DIR`** — if set, use this path (override for
///    packagers or custom layouts).
/// 2. **`./seeds`** — if the directory exists in the current working
///    directory.
/// 3. **Crate manifest dir** — `$CARGO_MANIFEST_DIR/seeds` as last resort
///    (dev/tests when run from the build tree).
fn seeds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("QUOTE_DB_SQLITE_SEEDS_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return cwd_seeds;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

/// Map a backend-agnostic connection string onto a sqlx SQLite URL.
///
/// * `":memory:"` — an ephemeral in-memory database (useful for tests).
/// * Anything already starting with `sqlite:` is passed through unchanged.
/// * A bare file path — e.g. `"sessions.db"` — is opened read-write and
///   created if it does not exist.
fn database_url(connection_string: &str) -> String {
    if connection_string == ":memory:" {
        "sqlite::memory:".to_string()
    } else if connection_string.starts_with("sqlite:") {
        connection_string.to_string()
    } else {
        format!("sqlite:{connection_string}?mode=rwc")
    }
}

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`quote_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use quote_core::db::RepositoryRegistry;
/// use quote_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`, run
    /// migrations, and run seed SQL files when a seeds directory exists
    /// (see [`seeds_dir`]). Session storage needs no seed data, so a
    /// missing directory is not an error.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn SessionRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&database_url(&config.connection_string)).await?;
        repo.run_migrations().await?;

        let seeds = seeds_dir();
        if seeds.is_dir() {
            repo.run_seeds(&seeds).await?;
        }

        Ok(Box::new(repo))
    }
}
