use contracts::domain::a001_coin::Coin;
use contracts::domain::a002_coin_collection::CoinCollection;
use contracts::domain::common::AggregateRoot;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Собрать sqlite URL из пути к файлу
pub fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Открыть БД и создать недостающие таблицы
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };

    let db_url = build_sqlite_url(&absolute_path);
    tracing::info!("Opening database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    ensure_coin_table(&conn).await?;
    ensure_collection_table(&conn).await?;

    Ok(conn)
}

async fn table_exists(conn: &DatabaseConnection, table_name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [table_name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn execute_all(conn: &DatabaseConnection, statements: &[String]) -> anyhow::Result<()> {
    for sql in statements {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.clone()))
            .await?;
    }
    Ok(())
}

async fn ensure_coin_table(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let table = Coin::table_name();
    if table_exists(conn, &table).await? {
        tracing::debug!("Table {} already exists", table);
        return Ok(());
    }

    tracing::info!("Creating {} table ({})", table, Coin::collection_name());
    let statements = [
        format!(
            r#"
            CREATE TABLE {table} (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                year INTEGER NOT NULL,
                material TEXT NOT NULL,
                weight REAL NOT NULL,
                diameter REAL NOT NULL,
                height REAL NOT NULL,
                price REAL NOT NULL,
                conservation_obverse TEXT NOT NULL,
                conservation_reverse TEXT NOT NULL,
                degree TEXT NOT NULL,
                note TEXT,
                photo_path_obverse TEXT,
                photo_path_reverse TEXT,
                collection_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                created_by TEXT NOT NULL,
                updated_by TEXT NOT NULL
            );
            "#
        ),
        format!("CREATE INDEX idx_{table}_year ON {table} (year);"),
        format!("CREATE INDEX idx_{table}_material ON {table} (material);"),
        format!("CREATE INDEX idx_{table}_price ON {table} (price);"),
        format!("CREATE INDEX idx_{table}_degree ON {table} (degree);"),
        format!("CREATE INDEX idx_{table}_collection_id ON {table} (collection_id);"),
    ];
    execute_all(conn, &statements).await
}

async fn ensure_collection_table(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let table = CoinCollection::table_name();
    if table_exists(conn, &table).await? {
        tracing::debug!("Table {} already exists", table);
        return Ok(());
    }

    tracing::info!("Creating {} table ({})", table, CoinCollection::collection_name());
    let statements = [
        format!(
            r#"
            CREATE TABLE {table} (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                created_by TEXT NOT NULL,
                updated_by TEXT NOT NULL
            );
            "#
        ),
        format!("CREATE UNIQUE INDEX idx_{table}_name ON {table} (name);"),
    ];
    execute_all(conn, &statements).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sqlite_url() {
        assert_eq!(
            build_sqlite_url(Path::new("/var/lib/cointrack/app.db")),
            "sqlite:///var/lib/cointrack/app.db?mode=rwc"
        );
        assert_eq!(
            build_sqlite_url(Path::new("C:\\data\\app.db")),
            "sqlite:///C:/data/app.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("coins.db");

        let conn = initialize_database(&path).await.unwrap();
        assert!(table_exists(&conn, "a001_coin").await.unwrap());
        assert!(table_exists(&conn, "a002_coin_collection").await.unwrap());
        drop(conn);

        // Повторный запуск на существующей БД не падает
        let conn = initialize_database(&path).await.unwrap();
        assert!(table_exists(&conn, "a001_coin").await.unwrap());
    }
}
