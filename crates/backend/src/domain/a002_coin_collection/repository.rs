use contracts::domain::a002_coin_collection::{CoinCollection, CoinCollectionId};
use contracts::domain::common::AuditMetadata;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::domain::a001_coin::repository::{format_timestamp, parse_timestamp};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_coin_collection")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for CoinCollection {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> anyhow::Result<Self> {
        Ok(CoinCollection {
            metadata: AuditMetadata {
                created_at: parse_timestamp(&m.created_at)?,
                updated_at: parse_timestamp(&m.updated_at)?,
                created_by: m.created_by,
                updated_by: m.updated_by,
            },
            id: CoinCollectionId(m.id),
            name: m.name,
            description: m.description,
        })
    }
}

fn to_active_model(collection: &CoinCollection) -> ActiveModel {
    ActiveModel {
        id: Set(collection.id.0.clone()),
        name: Set(collection.name.clone()),
        description: Set(collection.description.clone()),
        created_at: Set(format_timestamp(&collection.metadata.created_at)),
        updated_at: Set(format_timestamp(&collection.metadata.updated_at)),
        created_by: Set(collection.metadata.created_by.clone()),
        updated_by: Set(collection.metadata.updated_by.clone()),
    }
}

/// Ошибки записи возвращаются как `DbErr`: вызывающий различает нарушение уникальности имени
pub async fn insert(db: &DatabaseConnection, collection: &CoinCollection) -> Result<(), DbErr> {
    to_active_model(collection).insert(db).await?;
    Ok(())
}

pub async fn update(db: &DatabaseConnection, collection: &CoinCollection) -> Result<(), DbErr> {
    let mut active = to_active_model(collection);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.created_by = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn get_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> anyhow::Result<Option<CoinCollection>> {
    Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(CoinCollection::try_from)
        .transpose()
}

pub async fn get_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> anyhow::Result<Option<CoinCollection>> {
    Entity::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await?
        .map(CoinCollection::try_from)
        .transpose()
}

/// Все коллекции по имени
pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<CoinCollection>> {
    Entity::find()
        .order_by_asc(Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(CoinCollection::try_from)
        .collect()
}

pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
