use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, AuditMetadata};
use crate::shared::validation::{FieldError, ValidationErrors, ValidationRules};

crate::string_aggregate_id!(
    /// Уникальный идентификатор коллекции
    CoinCollectionId
);

const NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
const DESCRIPTION_RULES: ValidationRules = ValidationRules::none().with_max_length(1000);

/// Именованная коллекция монет
///
/// Имя уникально среди всех коллекций (уникальный индекс в БД).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinCollection {
    pub id: CoinCollectionId,
    pub name: String,
    pub description: Option<String>,

    #[serde(flatten)]
    pub metadata: AuditMetadata,
}

impl CoinCollection {
    /// Создать новую коллекцию для вставки в БД
    pub fn new_for_insert(
        dto: CoinCollectionDto,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, Vec<FieldError>> {
        dto.validate()?;
        Ok(Self {
            id: CoinCollectionId::generate(),
            name: dto.name,
            description: dto.description,
            metadata: AuditMetadata::new(actor, now),
        })
    }

    /// Полная замена изменяемых полей
    pub fn replace_from(
        &mut self,
        dto: CoinCollectionDto,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<(), Vec<FieldError>> {
        dto.validate()?;
        self.name = dto.name;
        self.description = dto.description;
        self.metadata.touch(actor, now);
        Ok(())
    }
}

impl AggregateRoot for CoinCollection {
    type Id = CoinCollectionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn metadata(&self) -> &AuditMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "collections"
    }

    fn element_name() -> &'static str {
        "coin_collection"
    }
}

/// Тело запроса на создание/замену коллекции
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoinCollectionDto {
    pub name: String,
    pub description: Option<String>,
}

impl CoinCollectionDto {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = ValidationErrors::new();
        errors.check(NAME_RULES.validate_string(Some(&self.name), "name"));
        errors.check(DESCRIPTION_RULES.validate_string(self.description.as_deref(), "description"));
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_create_and_validate() {
        let dto = CoinCollectionDto {
            name: "Regno d'Italia".into(),
            description: Some("1861-1946".into()),
        };
        let collection = CoinCollection::new_for_insert(dto, "system", now()).unwrap();
        assert!(!collection.id.as_str().is_empty());
        assert_eq!(collection.metadata.updated_by, "system");
        assert_eq!(CoinCollection::table_name(), "a002_coin_collection");
    }

    #[test]
    fn test_rejects_blank_name_and_long_description() {
        let dto = CoinCollectionDto {
            name: "".into(),
            description: Some("d".repeat(1001)),
        };
        let errors = CoinCollection::new_for_insert(dto, "system", now()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field.as_deref(), Some("name"));
        assert_eq!(errors[1].message, "description must not exceed 1000 characters");
    }

    #[test]
    fn test_replace_keeps_creation_stamp() {
        let dto = CoinCollectionDto {
            name: "Old".into(),
            description: None,
        };
        let mut collection = CoinCollection::new_for_insert(dto, "alice", now()).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        collection
            .replace_from(
                CoinCollectionDto {
                    name: "New".into(),
                    description: Some("renamed".into()),
                },
                "bob",
                later,
            )
            .unwrap();
        assert_eq!(collection.name, "New");
        assert_eq!(collection.metadata.created_by, "alice");
        assert_eq!(collection.metadata.updated_at, later);
    }
}
