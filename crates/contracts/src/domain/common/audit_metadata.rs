use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Аудит-поля агрегата (кто и когда создал/изменил запись)
///
/// Заполняются только сервером. Из входящих DTO никогда не читаются.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetadata {
    /// Дата создания записи
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
    /// Автор записи
    pub created_by: String,
    /// Автор последнего изменения
    pub updated_by: String,
}

impl AuditMetadata {
    /// Метаданные для новой записи
    pub fn new(actor: &str, now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            created_by: actor.to_string(),
            updated_by: actor.to_string(),
        }
    }

    /// Отметить изменение. `created_*` не трогаются.
    pub fn touch(&mut self, actor: &str, now: DateTime<Utc>) {
        self.updated_at = now;
        self.updated_by = actor.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_touch_preserves_creation_stamp() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let mut meta = AuditMetadata::new("alice", created);
        meta.touch("bob", later);

        assert_eq!(meta.created_at, created);
        assert_eq!(meta.created_by, "alice");
        assert_eq!(meta.updated_at, later);
        assert_eq!(meta.updated_by, "bob");
    }
}
