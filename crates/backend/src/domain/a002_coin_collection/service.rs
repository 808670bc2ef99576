use contracts::domain::common::AggregateId;
use contracts::domain::a001_coin::Coin;
use contracts::domain::a002_coin_collection::{CoinCollection, CoinCollectionDto};
use contracts::shared::page::{Page, PageRequest};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use super::repository;
use crate::domain::a001_coin;
use crate::shared::error::ApiError;
use crate::system::audit::AuditorProvider;

/// Нарушение уникального индекса по имени -> 409
fn map_write_error(e: DbErr, name: &str) -> ApiError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::warn!(name, "collection name already in use");
            ApiError::Conflict(format!("Collection with name '{}' already exists", name))
        }
        _ => ApiError::from(e),
    }
}

/// Имя занято другой коллекцией -> 409
///
/// Уникальный индекс остаётся последней проверкой при гонке.
async fn ensure_name_free(
    db: &DatabaseConnection,
    name: &str,
    own_id: &str,
) -> Result<(), ApiError> {
    match repository::get_by_name(db, name).await? {
        Some(existing) if existing.id.as_str() != own_id => {
            tracing::warn!(name, "collection name already in use");
            Err(ApiError::Conflict(format!(
                "Collection with name '{}' already exists",
                name
            )))
        }
        _ => Ok(()),
    }
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<CoinCollection>, ApiError> {
    Ok(repository::list_all(db).await?)
}

pub async fn get_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<CoinCollection>, ApiError> {
    Ok(repository::get_by_id(db, id).await?)
}

pub async fn create(
    db: &DatabaseConnection,
    auditor: &dyn AuditorProvider,
    dto: CoinCollectionDto,
) -> Result<CoinCollection, ApiError> {
    let collection =
        CoinCollection::new_for_insert(dto, &auditor.current_auditor(), auditor.now())
            .map_err(ApiError::Validation)?;
    ensure_name_free(db, &collection.name, collection.id.as_str()).await?;

    repository::insert(db, &collection)
        .await
        .map_err(|e| map_write_error(e, &collection.name))?;
    tracing::info!(id = %collection.id, name = %collection.name, "collection created");
    Ok(collection)
}

/// Полная замена имени и описания. `None`, если коллекции нет.
pub async fn update(
    db: &DatabaseConnection,
    auditor: &dyn AuditorProvider,
    id: &str,
    dto: CoinCollectionDto,
) -> Result<Option<CoinCollection>, ApiError> {
    dto.validate().map_err(ApiError::Validation)?;

    let Some(mut collection) = repository::get_by_id(db, id).await? else {
        return Ok(None);
    };
    collection
        .replace_from(dto, &auditor.current_auditor(), auditor.now())
        .map_err(ApiError::Validation)?;
    ensure_name_free(db, &collection.name, collection.id.as_str()).await?;

    repository::update(db, &collection)
        .await
        .map_err(|e| map_write_error(e, &collection.name))?;
    tracing::info!(id = %collection.id, "collection updated");
    Ok(Some(collection))
}

/// Идемпотентное удаление. Монеты со ссылкой на коллекцию не трогаются.
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    if repository::delete_by_id(db, id).await? {
        tracing::info!(id, "collection deleted");
    }
    Ok(())
}

/// Монеты коллекции. `None`, если коллекции нет.
pub async fn coins_in_collection(
    db: &DatabaseConnection,
    id: &str,
    page: &PageRequest,
) -> Result<Option<Page<Coin>>, ApiError> {
    if repository::get_by_id(db, id).await?.is_none() {
        return Ok(None);
    }
    let coins = a001_coin::service::coins_by_collection(db, id, page).await?;
    Ok(Some(coins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_coin, temp_db, FixedAuditor};
    use contracts::domain::common::AggregateId;

    fn dto(name: &str) -> CoinCollectionDto {
        CoinCollectionDto {
            name: name.into(),
            description: Some(format!("{name} description")),
        }
    }

    #[tokio::test]
    async fn test_create_get_and_list_sorted() {
        let (_dir, db) = temp_db().await;
        let auditor = FixedAuditor::new("alice");
        let savoy = create(&db, &auditor, dto("Savoia")).await.unwrap();
        create(&db, &auditor, dto("Borboni")).await.unwrap();

        let loaded = get_by_id(&db, savoy.id.as_str()).await.unwrap().unwrap();
        assert_eq!(loaded, savoy);
        assert_eq!(loaded.metadata.created_by, "alice");

        let names: Vec<_> = list_all(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Borboni", "Savoia"]);

        assert!(get_by_id(&db, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let (_dir, db) = temp_db().await;
        let auditor = FixedAuditor::new("alice");
        create(&db, &auditor, dto("Savoia")).await.unwrap();
        let other = create(&db, &auditor, dto("Borboni")).await.unwrap();

        let err = create(&db, &auditor, dto("Savoia")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)), "{err:?}");

        let err = update(&db, &auditor, other.id.as_str(), dto("Savoia"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)), "{err:?}");

        // Сохранение под своим же именем не конфликт
        let kept = update(&db, &auditor, other.id.as_str(), dto("Borboni"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.name, "Borboni");
        assert_eq!(list_all(&db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_collection_is_rejected() {
        let (_dir, db) = temp_db().await;
        let err = create(&db, &FixedAuditor::new("alice"), dto(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref e) if e.len() == 1));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_dir, db) = temp_db().await;
        let created = create(&db, &FixedAuditor::new("alice"), dto("Old")).await.unwrap();

        let bob = FixedAuditor::new("bob").advanced_days(1);
        let updated = update(&db, &bob, created.id.as_str(), dto("New"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.metadata.created_by, "alice");
        assert_eq!(updated.metadata.updated_by, "bob");

        assert!(update(&db, &bob, "missing", dto("X")).await.unwrap().is_none());

        delete(&db, created.id.as_str()).await.unwrap();
        delete(&db, created.id.as_str()).await.unwrap();
        assert!(get_by_id(&db, created.id.as_str()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_coins_in_collection() {
        let (_dir, db) = temp_db().await;
        let auditor = FixedAuditor::new("alice");
        let collection = create(&db, &auditor, dto("Savoia")).await.unwrap();

        let mut coin = sample_coin("Lira", 1900, "Silver", 5.0);
        coin.collection_id = Some(collection.id.as_str().to_string());
        a001_coin::service::create(&db, &auditor, coin).await.unwrap();
        a001_coin::service::create(&db, &auditor, sample_coin("Loose", 1900, "Silver", 5.0))
            .await
            .unwrap();

        let page = coins_in_collection(&db, collection.id.as_str(), &PageRequest::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].name, "Lira");

        let missing = coins_in_collection(&db, "missing", &PageRequest::default())
            .await
            .unwrap();
        assert!(missing.is_none());

        // Удаление коллекции оставляет монеты с висячей ссылкой
        delete(&db, collection.id.as_str()).await.unwrap();
        let coins = a001_coin::service::coins_by_collection(
            &db,
            collection.id.as_str(),
            &PageRequest::default(),
        )
        .await
        .unwrap();
        assert_eq!(coins.total_elements, 1);
    }
}
