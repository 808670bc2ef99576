use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::audit::AuditorProvider;

/// Состояние приложения, доступное всем обработчикам
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auditor: Arc<dyn AuditorProvider>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auditor: Arc<dyn AuditorProvider>) -> Self {
        Self { db, auditor }
    }
}
