use crate::errors::ServerError;

const DEFAULT_AUDIENCE: &str = "authenticated";
const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Settings read once at startup and handed to the server explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub pool_size: u32,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required =
            |key: &str| var(key).ok_or_else(|| ServerError::EnvironmentError(key.to_string()));

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                required("DB_USER")?,
                required("DB_PASSWORD")?,
                required("DB_HOST")?,
                var("DB_PORT").unwrap_or_else(|| "5432".to_string()),
                required("DB_NAME")?,
            ),
        };

        let jwt_issuer = match var("JWT_ISSUER") {
            Some(issuer) => issuer,
            None => format!(
                "{}/auth/v1",
                required("AUTH_API_URL")?.trim_end_matches('/')
            ),
        };

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| ServerError::EnvironmentError("PORT".to_string()))?,
            None => 8000,
        };

        let pool_size = match var("DATABASE_POOL_SIZE") {
            Some(size) => size
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| ServerError::EnvironmentError("DATABASE_POOL_SIZE".to_string()))?,
            None => 10,
        };

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            pool_size,
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer,
            jwt_audience: var("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
            allowed_origin: var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        })
    }
}
