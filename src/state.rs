use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtHandler;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt: Arc<JwtHandler>,
}
