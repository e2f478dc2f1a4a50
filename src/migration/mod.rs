//! Versioned schema migrations, applied at startup before the server binds.

use sea_orm_migration::prelude::*;

mod m20250925_000001_create_articles;
mod m20250925_000002_create_comments;
mod m20250925_000003_create_files;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250925_000001_create_articles::Migration),
            Box::new(m20250925_000002_create_comments::Migration),
            Box::new(m20250925_000003_create_files::Migration),
        ]
    }
}
