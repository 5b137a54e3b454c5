use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;

// Database connection manager
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Creates the package and booking tables if they do not exist yet.
/// Bookings deliberately carry no foreign key to package: package delete is a
/// hard delete and existing bookings keep their package id.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let tables = [
        "CREATE TABLE IF NOT EXISTS package (
            id TEXT NOT NULL PRIMARY KEY,
            destination TEXT NOT NULL,
            description TEXT NOT NULL,
            location TEXT NOT NULL,
            hotel_name TEXT NOT NULL,
            hotel_type TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            price INTEGER NOT NULL,
            duration INTEGER NOT NULL,
            people_count INTEGER NOT NULL,
            rooms_count INTEGER NOT NULL,
            complementary_breakfast INTEGER NOT NULL DEFAULT 0,
            pick_and_drop INTEGER NOT NULL DEFAULT 0,
            features TEXT NOT NULL DEFAULT '[]',
            image_url TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS booking (
            id TEXT NOT NULL PRIMARY KEY,
            user_id TEXT NOT NULL,
            package_id TEXT NOT NULL,
            persons INTEGER NOT NULL,
            check_in TEXT NOT NULL,
            check_out TEXT NOT NULL,
            transportation TEXT NOT NULL,
            hotel TEXT NOT NULL,
            total_price INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'PENDING',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    ];

    for create_sql in tables {
        sqlx::query(create_sql).execute(pool).await?;
    }

    Ok(())
}
