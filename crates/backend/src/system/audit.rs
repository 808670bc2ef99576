use chrono::{DateTime, Utc};

/// Источник аудит-данных: кто выполняет изменение и текущее время
///
/// Передаётся в сервисы явно при каждой записи. Время используется
/// и для проверки "год чеканки не в будущем".
pub trait AuditorProvider: Send + Sync {
    /// Идентификатор текущего автора изменений
    fn current_auditor(&self) -> String;

    /// Текущее время
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Фиксированный автор из конфигурации (до появления аутентификации)
#[derive(Debug, Clone)]
pub struct StaticAuditor {
    actor: String,
}

impl StaticAuditor {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
        }
    }
}

impl Default for StaticAuditor {
    fn default() -> Self {
        Self::new("system")
    }
}

impl AuditorProvider for StaticAuditor {
    fn current_auditor(&self) -> String {
        self.actor.clone()
    }
}
