//! Database configuration for the local dish store.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::entities::Dish;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::debug;

/// Default location of the local store.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/menu_desk.sqlite?mode=rwc";

/// Connects to `database_url` and makes sure every table exists.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to local store at {}", database_url);
    let db = Database::connect(database_url).await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates all tables from the entity definitions, skipping ones that exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut dish_table = schema.create_table_from_entity(Dish);
    dish_table.if_not_exists();

    db.execute(builder.build(&dish_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::DishModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Table exists and is queryable
        let _: Vec<DishModel> = Dish::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        let _: Vec<DishModel> = Dish::find().limit(1).all(&db).await?;
        Ok(())
    }
}
