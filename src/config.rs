use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    pub port: u16,
    pub super_admin_email: String,
    /// Only the setup binary needs this; the server never reads it.
    pub super_admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let env_name = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        // Missing env file is fine, plain process env still applies.
        let _ = dotenvy::from_filename(format!(".env.{}", env_name));

        Self {
            database_url: env::var("MONGO_URL").expect("MONGO_URL must be set"),
            database_name: env::var("MONGO_DB").unwrap_or_else(|_| "marketplace".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            super_admin_email: env::var("SUPER_ADMIN_EMAIL").unwrap_or_else(|_| "admin@admin.com".to_string()),
            super_admin_password: env::var("SUPER_ADMIN_PASSWORD").ok(),
        }
    }
}
