//! Агрегаты по набору монет
//!
//! Считаются в памяти по полному набору документов: для коллекции
//! частного нумизмата объёмы небольшие.

use std::collections::BTreeMap;

use contracts::domain::a001_coin::stats::{DEFAULT_TOP_LIMIT, MAX_TOP_LIMIT};
use contracts::domain::a001_coin::{
    Coin, CoinsByDegreeStats, CoinsByMaterialStats, CoinsByYearStats, CoinsSummaryStats,
};
use contracts::enums::NumismaticRarity;

/// Сводка: количество, сумма и средняя цена, диапазон годов
pub fn summarize(coins: &[Coin]) -> CoinsSummaryStats {
    let total_count = coins.len() as u64;
    let total_price: f64 = coins.iter().map(|c| c.price).sum();
    let average_price = if total_count == 0 {
        0.0
    } else {
        total_price / total_count as f64
    };

    CoinsSummaryStats {
        total_count,
        total_price,
        average_price,
        min_year: coins.iter().map(|c| c.year).min(),
        max_year: coins.iter().map(|c| c.year).max(),
    }
}

/// Группировка по году, годы по возрастанию
pub fn count_by_year(coins: &[Coin]) -> Vec<CoinsByYearStats> {
    let mut groups: BTreeMap<i32, u64> = BTreeMap::new();
    for coin in coins {
        *groups.entry(coin.year).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|(year, count)| CoinsByYearStats { year, count })
        .collect()
}

/// Группировка по редкости в порядке объявления (R5 .. C), только непустые
pub fn count_by_degree(coins: &[Coin]) -> Vec<CoinsByDegreeStats> {
    let mut groups: BTreeMap<NumismaticRarity, u64> = BTreeMap::new();
    for coin in coins {
        *groups.entry(coin.degree).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|(degree, count)| CoinsByDegreeStats { degree, count })
        .collect()
}

/// Группировка по материалу (точное значение строки)
pub fn count_by_material(coins: &[Coin]) -> Vec<CoinsByMaterialStats> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for coin in coins {
        *groups.entry(coin.material.as_str()).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|(material, count)| CoinsByMaterialStats {
            material: material.to_string(),
            count,
        })
        .collect()
}

/// Лимит топа: значения вне [1, MAX_TOP_LIMIT] приводятся к границам
pub fn clamp_top_limit(limit: Option<i64>) -> u64 {
    limit.unwrap_or(DEFAULT_TOP_LIMIT).clamp(1, MAX_TOP_LIMIT) as u64
}
