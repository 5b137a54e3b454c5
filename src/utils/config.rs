use std::env;

/// Environment-backed configuration, read once at startup and handed to the
/// components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub media_upload_url: String,
    pub media_api_key: String,
    pub media_folder: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            media_upload_url: env::var("MEDIA_UPLOAD_URL")?,
            media_api_key: env::var("MEDIA_API_KEY")?,
            media_folder: env::var("MEDIA_FOLDER")
                .unwrap_or_else(|_| "travel_packages".to_string()),
        })
    }
}
