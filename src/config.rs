use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub secure_cookies: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        if jwt_secret.len() < 16 {
            return Err("JWT_SECRET must be at least 16 characters".to_string());
        }

        let host: IpAddr = env_or("MODQUEUE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MODQUEUE_HOST: {e}"))?;

        let port: u16 = env_or("MODQUEUE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid MODQUEUE_PORT: {e}"))?;

        let max_body_size: usize = env_or("MODQUEUE_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid MODQUEUE_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("MODQUEUE_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid MODQUEUE_DB_MAX_CONNECTIONS: {e}"))?;

        let secure_cookies = match env_or("MODQUEUE_SECURE_COOKIES", "true").as_str() {
            "false" | "0" | "no" => false,
            _ => true,
        };

        let log_level = env_or("MODQUEUE_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            max_body_size,
            db_max_connections,
            secure_cookies,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
