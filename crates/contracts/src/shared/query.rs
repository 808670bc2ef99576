//! Разбор query-параметров
//!
//! Пустое значение (`?year=`) означает отсутствие параметра, а не ошибку.
//! Списки принимаются и через запятую (`degreeIn=R5,R4`), и повтором ключа
//! (`degreeIn=R5&degreeIn=R4`).

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// `deserialize_with` для необязательных чисел: пусто -> `None`
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid value '{}': {}", value, e))),
    }
}

/// Элементы списка из всех вхождений ключа, каждое делится по запятым
pub fn split_list(values: &[String]) -> impl Iterator<Item = &str> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
}
