//! Общие типы API учёта нумизматической коллекции
//!
//! Используются сервером и любыми клиентами: агрегаты, DTO запросов,
//! статистика, постраничная выдача и правила валидации.

pub mod domain;
pub mod enums;
pub mod shared;
