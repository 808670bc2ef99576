pub mod a001_coin;
pub mod a002_coin_collection;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use axum_extra::extract::{Query, QueryRejection};
use contracts::shared::page::{PageQuery, PageRequest};

use crate::shared::error::ApiError;

/// Тело запроса или 400 с текстом ошибки разбора JSON
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::warn!("malformed request body: {}", rejection.body_text());
            Err(ApiError::InvalidArgument(rejection.body_text()))
        }
    }
}

/// Query-параметры или 400 с текстом ошибки разбора
///
/// Повтор ключа (`degreeIn=R5&degreeIn=R4`) собирается в список.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query.map(|Query(value)| value).map_err(|rejection| {
        tracing::warn!("malformed query string: {}", rejection);
        ApiError::InvalidArgument(rejection.to_string())
    })
}

/// Параметры пагинации с нормализацией
pub(crate) fn page_request(
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<PageRequest, ApiError> {
    query_params(query)?
        .to_request()
        .map_err(ApiError::InvalidArgument)
}
