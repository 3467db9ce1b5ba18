use std::env;

/// Runtime configuration, loaded once at startup from environment
/// variables. The database URL is read separately by `db::create_pool`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    /// Access token lifetime in seconds.
    pub jwt_expires_in: u64,
    /// Refresh token lifetime in seconds.
    pub jwt_refresh_expires_in: u64,
    pub cors_origin: String,
    pub app_env: String,
}

impl Config {
    /// Read configuration from the environment. Panics when a required
    /// variable is missing, so a misconfigured deployment fails at boot.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let jwt_refresh_secret =
            env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET must be set");

        let jwt_expires_in = env::var("JWT_EXPIRES_IN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);
        let jwt_refresh_expires_in = env::var("JWT_REFRESH_EXPIRES_IN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(604_800);

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Self {
            port,
            jwt_secret,
            jwt_refresh_secret,
            jwt_expires_in,
            jwt_refresh_expires_in,
            cors_origin,
            app_env,
        }
    }

    pub fn is_development(&self) -> bool {
        self.app_env != "production"
    }
}
