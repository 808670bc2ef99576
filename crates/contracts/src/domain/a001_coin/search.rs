//! Параметры поиска монет (простой и расширенный)

use serde::{Deserialize, Serialize};

use crate::enums::{NumismaticRarity, OptionConservation};
use crate::shared::query::{empty_as_none, split_list};
use crate::shared::validation::{FieldError, ValidationErrors, ValidationRules};

const NON_NEGATIVE: ValidationRules = ValidationRules::none().with_min(0.0);

/// Query-параметры `GET /api/coins/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinSearchRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
}

/// Критерий простого поиска: применяется не более одного фильтра
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSearch {
    /// Точное совпадение имени (с учётом регистра)
    ByName(String),
    ByYear(i32),
    All,
}

impl CoinSearchRequest {
    /// Непустое имя имеет приоритет над годом
    pub fn criterion(&self) -> SimpleSearch {
        match (&self.name, self.year) {
            (Some(name), _) if !name.trim().is_empty() => SimpleSearch::ByName(name.clone()),
            (_, Some(year)) => SimpleSearch::ByYear(year),
            _ => SimpleSearch::All,
        }
    }
}

/// Query-параметры `GET /api/coins/advanced-search` в сыром виде
///
/// Списки передаются через запятую (`degreeIn=R5,R4`) или повтором ключа.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSearchRequest {
    pub name: Option<String>,
    pub material: Option<String>,
    pub degree: Option<String>,
    #[serde(default)]
    pub degree_in: Vec<String>,
    #[serde(default)]
    pub conservation_obverse_in: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<f64>,
}

impl AdvancedSearchRequest {
    /// Проверка границ отдельных параметров (все должны быть >= 0)
    pub fn constraint_violations(&self) -> Vec<FieldError> {
        let mut errors = ValidationErrors::new();
        let bounds = [
            ("minYear", self.min_year.map(f64::from)),
            ("maxYear", self.max_year.map(f64::from)),
            ("minPrice", self.min_price),
            ("maxPrice", self.max_price),
        ];
        for (name, value) in bounds {
            if let Some(v) = value {
                errors.check(NON_NEGATIVE.validate_number(v, name).map_err(FieldError::into_path));
            }
        }
        errors.into_errors()
    }

    /// Разбор в типизированный фильтр
    ///
    /// `degree` и `degreeIn` сводятся в одно множество: непустой `degreeIn`
    /// имеет приоритет, иначе используется одиночный `degree`.
    pub fn into_filter(self) -> Result<CoinSearchFilter, String> {
        let mut degrees = parse_list(&self.degree_in, NumismaticRarity::from_code, "degreeIn")?;
        if degrees.is_empty() {
            let single: Vec<String> = self.degree.into_iter().collect();
            degrees = parse_list(&single, NumismaticRarity::from_code, "degree")?;
            degrees.truncate(1);
        }
        let conservation_obverse_in = parse_list(
            &self.conservation_obverse_in,
            OptionConservation::from_code,
            "conservationObverseIn",
        )?;

        Ok(CoinSearchFilter {
            name_contains: non_blank(self.name),
            material_contains: non_blank(self.material),
            degrees,
            conservation_obverse_in,
            min_year: self.min_year,
            max_year: self.max_year,
            min_price: self.min_price,
            max_price: self.max_price,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_list<T: PartialEq>(
    raw: &[String],
    parse: fn(&str) -> Option<T>,
    param: &str,
) -> Result<Vec<T>, String> {
    let mut values = Vec::new();
    for code in split_list(raw) {
        let value = parse(code).ok_or_else(|| format!("Invalid value '{}' for parameter {}", code, param))?;
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Ok(values)
}

/// Типизированный фильтр расширенного поиска
///
/// Все заданные условия объединяются через AND. Пустое множество
/// означает отсутствие фильтра по этому полю.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinSearchFilter {
    /// Подстрока имени без учёта регистра (буквально, не шаблон)
    pub name_contains: Option<String>,
    /// Подстрока материала без учёта регистра
    pub material_contains: Option<String>,
    pub degrees: Vec<NumismaticRarity>,
    pub conservation_obverse_in: Vec<OptionConservation>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CoinSearchFilter {
    /// Проверка диапазонов: min <= max, если заданы обе границы
    pub fn validate_ranges(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min_year, self.max_year) {
            if min > max {
                return Err(format!(
                    "minYear ({}) must be less than or equal to maxYear ({})",
                    min, max
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(format!(
                    "minPrice ({}) must be less than or equal to maxPrice ({})",
                    min, max
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_search_precedence() {
        let req = CoinSearchRequest {
            name: Some("Marengo".into()),
            year: Some(1801),
        };
        assert_eq!(req.criterion(), SimpleSearch::ByName("Marengo".into()));

        let req = CoinSearchRequest {
            name: Some("  ".into()),
            year: Some(1801),
        };
        assert_eq!(req.criterion(), SimpleSearch::ByYear(1801));

        assert_eq!(CoinSearchRequest::default().criterion(), SimpleSearch::All);
    }

    #[test]
    fn test_degree_set_takes_precedence() {
        let req = AdvancedSearchRequest {
            degree: Some("C".into()),
            degree_in: vec!["R5, R4".into(), "R5".into()],
            ..Default::default()
        };
        let filter = req.into_filter().unwrap();
        assert_eq!(filter.degrees, vec![NumismaticRarity::R5, NumismaticRarity::R4]);

        let req = AdvancedSearchRequest {
            degree: Some("C".into()),
            degree_in: vec!["".into()],
            ..Default::default()
        };
        assert_eq!(req.into_filter().unwrap().degrees, vec![NumismaticRarity::C]);

        let filter = AdvancedSearchRequest::default().into_filter().unwrap();
        assert!(filter.degrees.is_empty());
        assert!(filter.conservation_obverse_in.is_empty());
    }

    #[test]
    fn test_unknown_enum_literal_rejected() {
        let req = AdvancedSearchRequest {
            conservation_obverse_in: vec!["FDC,XF".into()],
            ..Default::default()
        };
        let err = req.into_filter().unwrap_err();
        assert!(err.contains("'XF'"));
        assert!(err.contains("conservationObverseIn"));
    }

    #[test]
    fn test_blank_substrings_are_ignored() {
        let req = AdvancedSearchRequest {
            name: Some(" ".into()),
            material: Some("gold".into()),
            ..Default::default()
        };
        let filter = req.into_filter().unwrap();
        assert_eq!(filter.name_contains, None);
        assert_eq!(filter.material_contains.as_deref(), Some("gold"));
    }

    #[test]
    fn test_range_validation() {
        let filter = CoinSearchFilter {
            min_year: Some(2000),
            max_year: Some(1990),
            ..Default::default()
        };
        let err = filter.validate_ranges().unwrap_err();
        assert!(err.contains("minYear"));

        let filter = CoinSearchFilter {
            min_price: Some(10.0),
            max_price: Some(10.0),
            min_year: Some(1990),
            ..Default::default()
        };
        assert!(filter.validate_ranges().is_ok());

        let filter = CoinSearchFilter {
            min_price: Some(10.5),
            max_price: Some(3.0),
            ..Default::default()
        };
        assert!(filter.validate_ranges().unwrap_err().contains("minPrice"));
    }

    #[test]
    fn test_negative_bounds_are_constraint_violations() {
        let req = AdvancedSearchRequest {
            min_year: Some(-5),
            max_price: Some(-0.1),
            min_price: Some(0.0),
            ..Default::default()
        };
        let errors = req.constraint_violations();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path.as_deref(), Some("minYear"));
        assert_eq!(errors[1].path.as_deref(), Some("maxPrice"));
        assert!(errors[0].field.is_none());
    }
}
