//! Database module for SQLite persistence using SeaORM

pub mod entities;

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;

/// Build a SeaORM SQLite URL that creates the file on first connect
pub fn sqlite_url(db_path: &Path) -> String {
    format!("sqlite:{}?mode=rwc", db_path.display())
}

/// Initialize database connection and create tables
pub async fn init_database(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    // Ensure parent directory exists for file-backed databases
    if let Some(path) = db_url
        .strip_prefix("sqlite:")
        .map(|rest| rest.split('?').next().unwrap_or(rest))
        .filter(|p| !p.is_empty() && !p.starts_with(":memory:"))
    {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    tracing::info!("Connecting to database: {}", db_url);

    let db = Database::connect(db_url).await?;

    create_tables(&db).await?;

    Ok(db)
}

/// Create all tables if they don't exist
async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS bags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            volume INTEGER NOT NULL,
            disabled INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        )
        "#.to_string(),
    )).await?;

    // Cuboids are owned by their bag and go away with it
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS cuboids (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            width INTEGER NOT NULL,
            height INTEGER NOT NULL,
            depth INTEGER NOT NULL,
            bag_id INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            FOREIGN KEY (bag_id) REFERENCES bags(id) ON DELETE CASCADE
        )
        "#.to_string(),
    )).await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"CREATE INDEX IF NOT EXISTS idx_cuboids_bag ON cuboids(bag_id)"#.to_string(),
    )).await?;

    tracing::info!("Database tables initialized");
    Ok(())
}
