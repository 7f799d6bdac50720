pub mod routes;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::notifications::NotificationSink;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sink: Arc<dyn NotificationSink>,
}
