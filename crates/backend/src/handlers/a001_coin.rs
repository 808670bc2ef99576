use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::{Query, QueryRejection};
use contracts::domain::a001_coin::stats::{MAX_TOP_LIMIT, TopExpensiveRequest};
use contracts::domain::a001_coin::{
    AdvancedSearchRequest, Coin, CoinAuditInfo, CoinDto, CoinSearchRequest, CoinsByDegreeStats,
    CoinsByMaterialStats, CoinsByYearStats, CoinsSummaryStats,
};
use contracts::shared::page::{Page, PageQuery};
use contracts::shared::validation::{FieldError, ValidationRules};

use super::{json_body, page_request, query_params};
use crate::domain::a001_coin;
use crate::shared::error::ApiError;
use crate::system::state::AppState;

const TOP_LIMIT_RULES: ValidationRules =
    ValidationRules::none().with_min(1.0).with_max(MAX_TOP_LIMIT as f64);

/// GET /api/coins
pub async fn list_all(
    State(state): State<AppState>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<Coin>>, ApiError> {
    let page = page_request(page)?;
    Ok(Json(a001_coin::service::list_all(&state.db, &page).await?))
}

/// GET /api/coins/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Coin>, ApiError> {
    a001_coin::service::get_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// GET /api/coins/:id/audit
pub async fn get_audit_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CoinAuditInfo>, ApiError> {
    a001_coin::service::get_audit_info(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// GET /api/coins/search?name=&year=
pub async fn search(
    State(state): State<AppState>,
    search: Result<Query<CoinSearchRequest>, QueryRejection>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<Coin>>, ApiError> {
    let search = query_params(search)?;
    let page = page_request(page)?;
    Ok(Json(
        a001_coin::service::search_coins(&state.db, &search, &page).await?,
    ))
}

/// GET /api/coins/advanced-search
pub async fn advanced_search(
    State(state): State<AppState>,
    search: Result<Query<AdvancedSearchRequest>, QueryRejection>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<Coin>>, ApiError> {
    let search = query_params(search)?;
    let violations = search.constraint_violations();
    if !violations.is_empty() {
        return Err(ApiError::ConstraintViolation(violations));
    }
    let filter = search.into_filter().map_err(ApiError::InvalidArgument)?;
    let page = page_request(page)?;

    Ok(Json(
        a001_coin::service::advanced_search(&state.db, &filter, &page).await?,
    ))
}

/// POST /api/coins
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CoinDto>, JsonRejection>,
) -> Result<(StatusCode, Json<Coin>), ApiError> {
    let dto = json_body(payload)?;
    let coin = a001_coin::service::create(&state.db, state.auditor.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(coin)))
}

/// PUT /api/coins/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CoinDto>, JsonRejection>,
) -> Result<Json<Coin>, ApiError> {
    let dto = json_body(payload)?;
    a001_coin::service::update(&state.db, state.auditor.as_ref(), &id, dto)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE /api/coins/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    a001_coin::service::delete(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/coins/stats/summary
pub async fn summary_stats(
    State(state): State<AppState>,
) -> Result<Json<CoinsSummaryStats>, ApiError> {
    Ok(Json(a001_coin::service::summary_stats(&state.db).await?))
}

/// GET /api/coins/stats/by-year
pub async fn stats_by_year(
    State(state): State<AppState>,
) -> Result<Json<Vec<CoinsByYearStats>>, ApiError> {
    Ok(Json(a001_coin::service::stats_by_year(&state.db).await?))
}

/// GET /api/coins/stats/by-degree
pub async fn stats_by_degree(
    State(state): State<AppState>,
) -> Result<Json<Vec<CoinsByDegreeStats>>, ApiError> {
    Ok(Json(a001_coin::service::stats_by_degree(&state.db).await?))
}

/// GET /api/coins/stats/by-material
pub async fn stats_by_material(
    State(state): State<AppState>,
) -> Result<Json<Vec<CoinsByMaterialStats>>, ApiError> {
    Ok(Json(a001_coin::service::stats_by_material(&state.db).await?))
}

/// GET /api/coins/stats/top-expensive?limit=
///
/// Лимит вне [1, 100] отклоняется, а не обрезается.
pub async fn top_expensive(
    State(state): State<AppState>,
    request: Result<Query<TopExpensiveRequest>, QueryRejection>,
) -> Result<Json<Vec<Coin>>, ApiError> {
    let limit = query_params(request)?.limit();
    TOP_LIMIT_RULES
        .validate_number(limit as f64, "limit")
        .map_err(|e| ApiError::ConstraintViolation(vec![FieldError::into_path(e)]))?;

    Ok(Json(
        a001_coin::service::top_expensive(&state.db, Some(limit)).await?,
    ))
}
