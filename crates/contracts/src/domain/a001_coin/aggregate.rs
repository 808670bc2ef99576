use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateId, AggregateRoot, AuditMetadata};
use crate::enums::{NumismaticRarity, OptionConservation};
use crate::shared::validation::{FieldError, ValidationErrors, ValidationRules};

// ============================================================================
// ID Type
// ============================================================================

crate::string_aggregate_id!(
    /// Уникальный идентификатор монеты
    CoinId
);

// ============================================================================
// Validation rules
// ============================================================================

const NAME_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
const MATERIAL_RULES: ValidationRules = ValidationRules::required().with_max_length(100);
const YEAR_RULES: ValidationRules = ValidationRules::none().with_min(0.0);
const POSITIVE_RULES: ValidationRules = ValidationRules::none().with_exclusive_min(0.0);
const PRICE_RULES: ValidationRules = ValidationRules::none().with_min(0.0);
const NOTE_RULES: ValidationRules = ValidationRules::none().with_max_length(1000);
const GRADE_RULES: ValidationRules = ValidationRules::required();

// ============================================================================
// Aggregate Root
// ============================================================================

/// Монета (один физический экземпляр коллекции)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub id: CoinId,
    pub name: String,
    /// Год чеканки
    pub year: i32,
    pub material: String,
    pub weight: f64,
    pub diameter: f64,
    pub height: f64,
    pub price: f64,
    pub conservation_obverse: OptionConservation,
    pub conservation_reverse: OptionConservation,
    /// Степень редкости
    pub degree: NumismaticRarity,
    pub note: Option<String>,
    pub photo_path_obverse: Option<String>,
    pub photo_path_reverse: Option<String>,
    /// Ссылка на коллекцию (целостность не проверяется)
    pub collection_id: Option<String>,

    #[serde(flatten)]
    pub metadata: AuditMetadata,
}

impl Coin {
    /// Создать новую монету для вставки в БД
    ///
    /// `now` используется и для аудита, и для проверки "год не в будущем".
    pub fn new_for_insert(
        dto: CoinDto,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, Vec<FieldError>> {
        let grades = dto.validate(now)?;
        Ok(Self {
            id: CoinId::generate(),
            name: dto.name,
            year: dto.year,
            material: dto.material,
            weight: dto.weight,
            diameter: dto.diameter,
            height: dto.height,
            price: dto.price,
            conservation_obverse: grades.conservation_obverse,
            conservation_reverse: grades.conservation_reverse,
            degree: grades.degree,
            note: dto.note,
            photo_path_obverse: dto.photo_path_obverse,
            photo_path_reverse: dto.photo_path_reverse,
            collection_id: dto.collection_id,
            metadata: AuditMetadata::new(actor, now),
        })
    }

    /// Полная замена изменяемых полей из DTO
    ///
    /// ID и `created_*` сохраняются, `updated_*` обновляются.
    /// При ошибке валидации агрегат не меняется.
    pub fn replace_from(
        &mut self,
        dto: CoinDto,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<(), Vec<FieldError>> {
        let grades = dto.validate(now)?;
        self.name = dto.name;
        self.year = dto.year;
        self.material = dto.material;
        self.weight = dto.weight;
        self.diameter = dto.diameter;
        self.height = dto.height;
        self.price = dto.price;
        self.conservation_obverse = grades.conservation_obverse;
        self.conservation_reverse = grades.conservation_reverse;
        self.degree = grades.degree;
        self.note = dto.note;
        self.photo_path_obverse = dto.photo_path_obverse;
        self.photo_path_reverse = dto.photo_path_reverse;
        self.collection_id = dto.collection_id;
        self.metadata.touch(actor, now);
        Ok(())
    }

    /// Аудит-информация по монете
    pub fn audit_info(&self) -> CoinAuditInfo {
        CoinAuditInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.metadata.created_at,
            updated_at: self.metadata.updated_at,
            created_by: self.metadata.created_by.clone(),
            updated_by: self.metadata.updated_by.clone(),
        }
    }
}

impl AggregateRoot for Coin {
    type Id = CoinId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn metadata(&self) -> &AuditMetadata {
        &self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "coins"
    }

    fn element_name() -> &'static str {
        "coin"
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Тело запроса на создание/замену монеты
///
/// Отсутствующие поля получают значения по умолчанию и затем
/// отклоняются валидацией (пустое имя, нулевой вес и т.д.).
/// `id` и аудит-поля во входящем JSON игнорируются.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoinDto {
    pub name: String,
    pub year: i32,
    pub material: String,
    pub weight: f64,
    pub diameter: f64,
    pub height: f64,
    pub price: f64,
    pub conservation_obverse: Option<OptionConservation>,
    pub conservation_reverse: Option<OptionConservation>,
    pub degree: Option<NumismaticRarity>,
    pub note: Option<String>,
    pub photo_path_obverse: Option<String>,
    pub photo_path_reverse: Option<String>,
    pub collection_id: Option<String>,
}

/// Обязательные перечисления после успешной валидации
struct ValidatedGrades {
    conservation_obverse: OptionConservation,
    conservation_reverse: OptionConservation,
    degree: NumismaticRarity,
}

impl CoinDto {
    /// Проверить DTO без построения агрегата
    pub fn validate_for(&self, now: DateTime<Utc>) -> Result<(), Vec<FieldError>> {
        self.validate(now).map(|_| ())
    }

    /// Валидация данных. Возвращает все нарушения сразу.
    fn validate(&self, now: DateTime<Utc>) -> Result<ValidatedGrades, Vec<FieldError>> {
        use chrono::Datelike;

        let mut errors = ValidationErrors::new();
        errors.check(NAME_RULES.validate_string(Some(&self.name), "name"));
        errors.check(YEAR_RULES.validate_number(f64::from(self.year), "year"));
        if self.year > now.year() {
            errors.push(FieldError::field("year", "year must not be in the future"));
        }
        errors.check(MATERIAL_RULES.validate_string(Some(&self.material), "material"));
        errors.check(POSITIVE_RULES.validate_number(self.weight, "weight"));
        errors.check(POSITIVE_RULES.validate_number(self.diameter, "diameter"));
        errors.check(POSITIVE_RULES.validate_number(self.height, "height"));
        errors.check(PRICE_RULES.validate_number(self.price, "price"));
        errors.check(
            GRADE_RULES.validate_present(self.conservation_obverse.as_ref(), "conservationObverse"),
        );
        errors.check(
            GRADE_RULES.validate_present(self.conservation_reverse.as_ref(), "conservationReverse"),
        );
        errors.check(GRADE_RULES.validate_present(self.degree.as_ref(), "degree"));
        errors.check(NOTE_RULES.validate_string(self.note.as_deref(), "note"));

        let (Some(conservation_obverse), Some(conservation_reverse), Some(degree)) = (
            self.conservation_obverse,
            self.conservation_reverse,
            self.degree,
        ) else {
            return Err(errors.into_errors());
        };
        errors.into_result()?;

        Ok(ValidatedGrades {
            conservation_obverse,
            conservation_reverse,
            degree,
        })
    }
}

impl From<&Coin> for CoinDto {
    fn from(c: &Coin) -> Self {
        Self {
            name: c.name.clone(),
            year: c.year,
            material: c.material.clone(),
            weight: c.weight,
            diameter: c.diameter,
            height: c.height,
            price: c.price,
            conservation_obverse: Some(c.conservation_obverse),
            conservation_reverse: Some(c.conservation_reverse),
            degree: Some(c.degree),
            note: c.note.clone(),
            photo_path_obverse: c.photo_path_obverse.clone(),
            photo_path_reverse: c.photo_path_reverse.clone(),
            collection_id: c.collection_id.clone(),
        }
    }
}

/// Аудит-информация монеты (`GET /api/coins/{id}/audit`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinAuditInfo {
    pub id: CoinId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}
