use crate::config::ColloquyConfig;
use crate::database::Database;
use anyhow::Result;
use std::fs;

pub struct BootstrapResources {
    pub directories_created: Vec<String>,
    pub database_initialized: bool,
    pub database: Database,
}

pub async fn initialize(config: &ColloquyConfig) -> Result<BootstrapResources> {
    let mut directories_created = Vec::new();
    create_dir_if_missing(&config.paths.data_dir, &mut directories_created)?;
    create_dir_if_missing(&config.paths.logs_dir, &mut directories_created)?;

    let database = Database::connect(&config.paths)?;
    let database_initialized = database.ensure_migrations()?;

    Ok(BootstrapResources {
        directories_created,
        database_initialized,
        database,
    })
}

fn create_dir_if_missing(path: &std::path::Path, created: &mut Vec<String>) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        created.push(path.display().to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, ColloquyPaths};
    use tempfile::TempDir;

    #[tokio::test]
    async fn initialize_creates_directories_and_migrates_once() {
        let tmp = TempDir::new().expect("temp dir");
        let paths = ColloquyPaths::from_base_dir(tmp.path()).expect("paths");
        let config = ColloquyConfig::new(0, paths, AuthConfig::default());

        let resources = initialize(&config).await.expect("first bootstrap");
        assert_eq!(resources.directories_created.len(), 2);
        assert!(resources.database_initialized);
        assert!(config.paths.db_path.exists());

        let resources = initialize(&config).await.expect("second bootstrap");
        assert!(resources.directories_created.is_empty());
        assert!(!resources.database_initialized);
    }
}
