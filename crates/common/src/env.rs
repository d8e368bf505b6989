//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the database is touched.

use tracing::warn;

/// Ensure the directory holding a SQLite database file exists.
///
/// Postgres URLs and in-memory SQLite need nothing on disk; anything else is
/// created on demand so sqlx can open the file with `mode=rwc`.
pub async fn ensure_env(database_url: &str) -> anyhow::Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path = rest.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = std::path::Path::new(path).parent() {
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        if tokio::fs::metadata(parent).await.is_err() {
            warn!(dir = %parent.display(), "database directory missing; creating it");
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
