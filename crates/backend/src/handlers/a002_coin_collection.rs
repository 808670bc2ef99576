use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::{Query, QueryRejection};
use contracts::domain::a001_coin::Coin;
use contracts::domain::a002_coin_collection::{CoinCollection, CoinCollectionDto};
use contracts::shared::page::{Page, PageQuery};

use super::{json_body, page_request};
use crate::domain::a002_coin_collection;
use crate::shared::error::ApiError;
use crate::system::state::AppState;

/// GET /api/collections
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<CoinCollection>>, ApiError> {
    Ok(Json(a002_coin_collection::service::list_all(&state.db).await?))
}

/// GET /api/collections/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CoinCollection>, ApiError> {
    a002_coin_collection::service::get_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/collections
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CoinCollectionDto>, JsonRejection>,
) -> Result<(StatusCode, Json<CoinCollection>), ApiError> {
    let dto = json_body(payload)?;
    let collection =
        a002_coin_collection::service::create(&state.db, state.auditor.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

/// PUT /api/collections/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CoinCollectionDto>, JsonRejection>,
) -> Result<Json<CoinCollection>, ApiError> {
    let dto = json_body(payload)?;
    a002_coin_collection::service::update(&state.db, state.auditor.as_ref(), &id, dto)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE /api/collections/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    a002_coin_collection::service::delete(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/collections/:id/coins
pub async fn list_coins(
    State(state): State<AppState>,
    Path(id): Path<String>,
    page: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<Coin>>, ApiError> {
    let page = page_request(page)?;
    a002_coin_collection::service::coins_in_collection(&state.db, &id, &page)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use crate::test_support::spawn_app;
    use reqwest::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_collection_lifecycle_over_http() {
        let (_dir, base) = spawn_app().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{base}/api/collections"))
            .json(&json!({"name": "Savoia", "description": "Regno d'Italia"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let collection: Value = response.json().await.unwrap();
        let id = collection["id"].as_str().unwrap().to_string();
        assert_eq!(collection["createdBy"], "tester");

        let response = client
            .post(format!("{base}/api/collections"))
            .json(&json!({"name": "Savoia"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json: Value = response.json().await.unwrap();
        assert_eq!(json["status"], 409);

        let coin = json!({
            "name": "Lira",
            "year": 1900,
            "material": "Silver",
            "weight": 5.0,
            "diameter": 23.0,
            "height": 1.5,
            "price": 5.0,
            "conservationObverse": "BB",
            "conservationReverse": "BB",
            "degree": "R",
            "collectionId": id
        });
        let response = client
            .post(format!("{base}/api/coins"))
            .json(&coin)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let page: Value = client
            .get(format!("{base}/api/collections/{id}/coins?size=0"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(page["totalElements"], 1);
        assert_eq!(page["pageSize"], 20);
        assert_eq!(page["content"][0]["collectionId"], id.as_str());

        let response = client
            .put(format!("{base}/api/collections/{id}"))
            .json(&json!({"name": "Casa Savoia"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Value = response.json().await.unwrap();
        assert_eq!(updated["name"], "Casa Savoia");
        assert_eq!(updated["description"], Value::Null);

        let listed: Vec<Value> = client
            .get(format!("{base}/api/collections"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);

        for _ in 0..2 {
            let response = client
                .delete(format!("{base}/api/collections/{id}"))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }
    }

    #[tokio::test]
    async fn test_missing_collection_is_404() {
        let (_dir, base) = spawn_app().await;
        let client = reqwest::Client::new();

        for path in ["/api/collections/nope", "/api/collections/nope/coins"] {
            let response = client.get(format!("{base}{path}")).send().await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        }

        let response = client
            .put(format!("{base}/api/collections/nope"))
            .json(&json!({"name": "Ghost"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = client
            .post(format!("{base}/api/collections"))
            .json(&json!({"description": "no name"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: Value = response.json().await.unwrap();
        assert_eq!(json["errors"][0]["field"], "name");
    }
}
