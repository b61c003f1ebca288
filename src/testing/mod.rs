use crate::auth::PasswordHasher;
use crate::config::{AppConfig, DatabaseConfig};
use crate::database::DatabaseManager;

/// Fresh, migrated in-memory database for unit tests
pub async fn memory_database() -> DatabaseManager {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
        enable_query_logging: false,
    };
    let db = DatabaseManager::connect(&config)
        .await
        .expect("failed to open in-memory database");
    db.migrate().await.expect("failed to migrate in-memory database");
    db
}

/// Development config with a cheap password hash so tests stay fast
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.url = "sqlite::memory:".to_string();
    config.database.enable_query_logging = false;
    config.api.enable_request_logging = false;
    config.security.password_memory_kib = 1024;
    config.security.password_iterations = 1;
    config
}

pub fn test_hasher() -> PasswordHasher {
    let config = test_config();
    PasswordHasher::new(config.security.password_memory_kib, config.security.password_iterations)
        .expect("valid test hashing parameters")
}
