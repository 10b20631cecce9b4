use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Migrations compiled into the binary, used when no migrations directory is
/// present on disk.
const EMBEDDED: &[(&str, &str)] = &[(
    "001_initial.sql",
    include_str!("../../migrations/001_initial.sql"),
)];

/// Apply every `.sql` file in `migrations_dir` that has not been applied yet,
/// in file name order. Each file runs in its own transaction together with
/// its bookkeeping row. Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection, migrations_dir: &Path) -> rusqlite::Result<usize> {
    tracing::debug!(dir = %migrations_dir.display(), "Checking for database migrations");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let migrations = load_migrations(migrations_dir)?;
    tracing::debug!(count = migrations.len(), "Found migration files");

    let mut applied_count = 0;
    for (name, sql) in &migrations {
        let already_applied: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM _migrations WHERE name = ?)",
            [name],
            |row| row.get(0),
        )?;
        if already_applied {
            continue;
        }

        tracing::info!(migration = %name, "Applying migration");
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.execute("INSERT INTO _migrations (name) VALUES (?)", [name])?;
        tx.commit()?;
        applied_count += 1;
    }

    if applied_count > 0 {
        tracing::info!(count = applied_count, "Migrations applied successfully");
    } else {
        tracing::debug!("No new migrations to apply");
    }

    Ok(applied_count)
}

fn load_migrations(migrations_dir: &Path) -> rusqlite::Result<Vec<(String, String)>> {
    let Ok(read_dir) = fs::read_dir(migrations_dir) else {
        tracing::warn!(
            dir = %migrations_dir.display(),
            "Migrations directory not found, using embedded migrations"
        );
        return Ok(EMBEDDED
            .iter()
            .map(|(name, sql)| (name.to_string(), sql.to_string()))
            .collect());
    };

    let mut paths: Vec<_> = read_dir
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "sql"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let sql = fs::read_to_string(&path)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            Ok((name, sql))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_migrations_apply_once() {
        let conn = Connection::open_in_memory().unwrap();
        let missing = Path::new("does/not/exist");

        assert_eq!(run_migrations(&conn, missing).unwrap(), 1);
        assert_eq!(run_migrations(&conn, missing).unwrap(), 0);

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('budget_categories', 'budget_entries')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_directory_and_embedded_migrations_share_names() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, Path::new("migrations")).unwrap();

        // Switching to the embedded set must not re-apply the same file.
        assert_eq!(run_migrations(&conn, Path::new("does/not/exist")).unwrap(), 0);
    }
}
