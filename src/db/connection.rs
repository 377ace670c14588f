use mongodb::{options::ClientOptions, Client, Database};
use tracing::info;

use crate::config::Config;
use crate::utils::error::{AppError, AppResult};

pub async fn init_db(config: &Config) -> AppResult<Database> {
    let mongo_uri = config.mongo_uri.as_deref().ok_or_else(|| {
        AppError::ConfigError("MONGO_URI must be set when POLL_STORE=mongo".to_string())
    })?;

    let mut client_options = ClientOptions::parse(mongo_uri)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse MongoDB URI: {}", e)))?;

    client_options.app_name = Some("PollingApp".to_string());

    let client = Client::with_options(client_options).map_err(|e| {
        AppError::DatabaseError(format!("Failed to initialize MongoDB client: {}", e))
    })?;

    info!(db = %config.db_name, "Database connection successful");

    Ok(client.database(&config.db_name))
}
