use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
///
/// Идентификатор непрозрачен: хранилище выдаёт его при создании записи,
/// клиент получает его строкой и передаёт обратно без разбора.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Сгенерировать новый идентификатор
    fn generate() -> Self;

    /// Преобразовать ID в строку
    fn as_str(&self) -> &str;

    /// Создать ID из строки
    fn from_string(s: &str) -> Self;
}

/// Объявить newtype-идентификатор поверх `String`
#[macro_export]
macro_rules! string_aggregate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $crate::domain::common::AggregateId for $name {
            fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            fn as_str(&self) -> &str {
                &self.0
            }

            fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}
