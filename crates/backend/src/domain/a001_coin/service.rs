use contracts::domain::a001_coin::{
    Coin, CoinAuditInfo, CoinDto, CoinSearchFilter, CoinSearchRequest, CoinsByDegreeStats,
    CoinsByMaterialStats, CoinsByYearStats, CoinsSummaryStats, SimpleSearch,
};
use contracts::shared::page::{Page, PageRequest};
use sea_orm::{Condition, DatabaseConnection};

use super::{query, repository, stats};
use crate::shared::error::ApiError;
use crate::system::audit::AuditorProvider;

/// Выполнить постраничную выборку по условию
async fn fetch_page(
    db: &DatabaseConnection,
    condition: Condition,
    request: &PageRequest,
) -> Result<Page<Coin>, ApiError> {
    let (column, order) = query::resolve_sort(&request.sort)?;
    let (content, total) =
        repository::find_page(db, condition, column, order, request.offset(), request.size)
            .await?;
    Ok(Page::new(content, request, total))
}

pub async fn list_all(db: &DatabaseConnection, page: &PageRequest) -> Result<Page<Coin>, ApiError> {
    fetch_page(db, Condition::all(), page).await
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Coin>, ApiError> {
    Ok(repository::get_by_id(db, id).await?)
}

pub async fn get_audit_info(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<CoinAuditInfo>, ApiError> {
    Ok(repository::get_by_id(db, id)
        .await?
        .map(|coin| coin.audit_info()))
}

/// Простой поиск: либо точное имя, либо год, либо всё
pub async fn search_coins(
    db: &DatabaseConnection,
    request: &CoinSearchRequest,
    page: &PageRequest,
) -> Result<Page<Coin>, ApiError> {
    let condition = match request.criterion() {
        SimpleSearch::ByName(name) => query::name_equals(&name),
        SimpleSearch::ByYear(year) => query::year_equals(year),
        SimpleSearch::All => Condition::all(),
    };
    fetch_page(db, condition, page).await
}

/// Расширенный поиск. Диапазоны проверяются до обращения к БД.
pub async fn advanced_search(
    db: &DatabaseConnection,
    filter: &CoinSearchFilter,
    page: &PageRequest,
) -> Result<Page<Coin>, ApiError> {
    if let Err(message) = filter.validate_ranges() {
        tracing::warn!("advanced search rejected: {}", message);
        return Err(ApiError::InvalidArgument(message));
    }
    fetch_page(db, query::build_condition(filter), page).await
}

/// Монеты, ссылающиеся на коллекцию
pub async fn coins_by_collection(
    db: &DatabaseConnection,
    collection_id: &str,
    page: &PageRequest,
) -> Result<Page<Coin>, ApiError> {
    fetch_page(db, query::collection_equals(collection_id), page).await
}

pub async fn create(
    db: &DatabaseConnection,
    auditor: &dyn AuditorProvider,
    dto: CoinDto,
) -> Result<Coin, ApiError> {
    let coin = Coin::new_for_insert(dto, &auditor.current_auditor(), auditor.now())
        .map_err(|errors| {
            tracing::warn!("coin rejected: {} validation error(s)", errors.len());
            ApiError::Validation(errors)
        })?;

    repository::insert(db, &coin).await?;
    tracing::info!(id = %coin.id, name = %coin.name, "coin created");
    Ok(coin)
}

/// Полная замена. `None`, если монеты нет.
///
/// Тело проверяется раньше поиска записи: некорректный запрос даёт 400
/// даже для несуществующего ID.
pub async fn update(
    db: &DatabaseConnection,
    auditor: &dyn AuditorProvider,
    id: &str,
    dto: CoinDto,
) -> Result<Option<Coin>, ApiError> {
    let now = auditor.now();
    dto.validate_for(now).map_err(ApiError::Validation)?;

    let Some(mut coin) = repository::get_by_id(db, id).await? else {
        return Ok(None);
    };
    coin.replace_from(dto, &auditor.current_auditor(), now)
        .map_err(ApiError::Validation)?;

    repository::update(db, &coin).await?;
    tracing::info!(id = %coin.id, "coin updated");
    Ok(Some(coin))
}

/// Идемпотентное удаление
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    if repository::delete_by_id(db, id).await? {
        tracing::info!(id, "coin deleted");
    }
    Ok(())
}

/// Количество монет в хранилище
pub async fn count_all(db: &DatabaseConnection) -> Result<u64, ApiError> {
    Ok(repository::count(db).await?)
}

pub async fn summary_stats(db: &DatabaseConnection) -> Result<CoinsSummaryStats, ApiError> {
    let coins = repository::list_all(db).await?;
    Ok(stats::summarize(&coins))
}

pub async fn stats_by_year(db: &DatabaseConnection) -> Result<Vec<CoinsByYearStats>, ApiError> {
    let coins = repository::list_all(db).await?;
    Ok(stats::count_by_year(&coins))
}

pub async fn stats_by_degree(db: &DatabaseConnection) -> Result<Vec<CoinsByDegreeStats>, ApiError> {
    let coins = repository::list_all(db).await?;
    Ok(stats::count_by_degree(&coins))
}

pub async fn stats_by_material(
    db: &DatabaseConnection,
) -> Result<Vec<CoinsByMaterialStats>, ApiError> {
    let coins = repository::list_all(db).await?;
    Ok(stats::count_by_material(&coins))
}

/// Самые дорогие монеты. Лимит приводится к [1, 100].
pub async fn top_expensive(db: &DatabaseConnection, limit: Option<i64>) -> Result<Vec<Coin>, ApiError> {
    let limit = stats::clamp_top_limit(limit);
    Ok(repository::top_by_price(db, limit).await?)
}
