use std::env;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://siakad.db";
const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        // The signing secret must come from the environment. There is no
        // fallback value: a missing secret aborts startup.
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::Validation("JWT_SECRET is not set".to_string()))?;

        Ok(Self {
            database_url,
            port,
            jwt_secret,
        })
    }
}
