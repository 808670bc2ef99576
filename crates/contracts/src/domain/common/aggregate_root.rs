use super::{AggregateId, AuditMetadata};

/// Трейт для корня агрегата
///
/// Определяет обязательные методы и метаданные для всех агрегатов системы
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id: AggregateId;

    // ============================================================================
    // Методы экземпляра (данные конкретной записи)
    // ============================================================================

    /// Получить ID записи
    fn id(&self) -> &Self::Id;

    /// Получить аудит-метаданные
    fn metadata(&self) -> &AuditMetadata;

    // ============================================================================
    // Метаданные класса агрегата (статические данные)
    // ============================================================================

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции документов (например, "coins")
    fn collection_name() -> &'static str;

    /// Имя элемента для логов и сообщений (например, "coin")
    fn element_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Имя таблицы в БД (например, "a001_coin")
    fn table_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::element_name())
    }
}
