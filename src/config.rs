//! Environment-driven application configuration.

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub database_url: Option<String>,
    pub media_root: String,
    /// Prefix prepended to blob keys to form public URLs. When unset,
    /// handlers expose the raw key as the URL.
    pub public_base_url: Option<String>,
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            database_url: std::env::var("DATABASE_URL").ok(),
            media_root: std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            admin_username: std::env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            // Insecure fallback for local use. Kept deliberately; run() warns
            // loudly when it is still in place in production.
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin".to_string()),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn uses_default_credentials(&self) -> bool {
        std::env::var("ADMIN_PASSWORD").is_err()
    }
}
