use serde::{Deserialize, Serialize};

use crate::enums::NumismaticRarity;
use crate::shared::query::empty_as_none;

/// Сводная статистика по всем монетам
///
/// `min_year`/`max_year` равны `None` для пустого набора.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinsSummaryStats {
    pub total_count: u64,
    pub total_price: f64,
    pub average_price: f64,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

/// Количество монет за год чеканки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinsByYearStats {
    pub year: i32,
    pub count: u64,
}

/// Количество монет по степени редкости
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinsByDegreeStats {
    pub degree: NumismaticRarity,
    pub count: u64,
}

/// Количество монет по материалу
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinsByMaterialStats {
    pub material: String,
    pub count: u64,
}

/// Query-параметры `GET /api/coins/stats/top-expensive`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopExpensiveRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
}

/// Лимит по умолчанию для топа самых дорогих монет
pub const DEFAULT_TOP_LIMIT: i64 = 10;
/// Верхняя граница лимита
pub const MAX_TOP_LIMIT: i64 = 100;

impl TopExpensiveRequest {
    /// Лимит с подстановкой значения по умолчанию
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_TOP_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_limit_defaults_when_missing_or_blank() {
        assert_eq!(TopExpensiveRequest::default().limit(), DEFAULT_TOP_LIMIT);

        let blank: TopExpensiveRequest = serde_json::from_str(r#"{"limit": ""}"#).unwrap();
        assert_eq!(blank.limit(), DEFAULT_TOP_LIMIT);

        let given: TopExpensiveRequest = serde_json::from_str(r#"{"limit": "3"}"#).unwrap();
        assert_eq!(given.limit(), 3);
    }
}
