use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use contracts::domain::a001_coin::{Coin, CoinId};
use contracts::domain::common::AuditMetadata;
use contracts::enums::{NumismaticRarity, OptionConservation};
use sea_orm::entity::prelude::*;
use sea_orm::{
    Condition, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};

/// Документ монеты: одно поле на атрибут, перечисления хранятся символьным кодом
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_coin")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub year: i32,
    pub material: String,
    pub weight: f64,
    pub diameter: f64,
    pub height: f64,
    pub price: f64,
    pub conservation_obverse: String,
    pub conservation_reverse: String,
    pub degree: String,
    pub note: Option<String>,
    pub photo_path_obverse: Option<String>,
    pub photo_path_reverse: Option<String>,
    pub collection_id: Option<String>,
    pub created_at: String, // DateTime<Utc> as RFC 3339
    pub updated_at: String, // DateTime<Utc> as RFC 3339
    pub created_by: String,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Фиксированная ширина, чтобы строки сортировались как время
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid timestamp '{}'", raw))?
        .with_timezone(&Utc))
}

impl TryFrom<Model> for Coin {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> anyhow::Result<Self> {
        let conservation_obverse = OptionConservation::from_code(&m.conservation_obverse)
            .with_context(|| format!("coin {}: unknown conservation '{}'", m.id, m.conservation_obverse))?;
        let conservation_reverse = OptionConservation::from_code(&m.conservation_reverse)
            .with_context(|| format!("coin {}: unknown conservation '{}'", m.id, m.conservation_reverse))?;
        let degree = NumismaticRarity::from_code(&m.degree)
            .with_context(|| format!("coin {}: unknown degree '{}'", m.id, m.degree))?;

        Ok(Coin {
            metadata: AuditMetadata {
                created_at: parse_timestamp(&m.created_at)?,
                updated_at: parse_timestamp(&m.updated_at)?,
                created_by: m.created_by,
                updated_by: m.updated_by,
            },
            id: CoinId(m.id),
            name: m.name,
            year: m.year,
            material: m.material,
            weight: m.weight,
            diameter: m.diameter,
            height: m.height,
            price: m.price,
            conservation_obverse,
            conservation_reverse,
            degree,
            note: m.note,
            photo_path_obverse: m.photo_path_obverse,
            photo_path_reverse: m.photo_path_reverse,
            collection_id: m.collection_id,
        })
    }
}

fn to_active_model(coin: &Coin) -> ActiveModel {
    ActiveModel {
        id: Set(coin.id.0.clone()),
        name: Set(coin.name.clone()),
        year: Set(coin.year),
        material: Set(coin.material.clone()),
        weight: Set(coin.weight),
        diameter: Set(coin.diameter),
        height: Set(coin.height),
        price: Set(coin.price),
        conservation_obverse: Set(coin.conservation_obverse.code().to_string()),
        conservation_reverse: Set(coin.conservation_reverse.code().to_string()),
        degree: Set(coin.degree.code().to_string()),
        note: Set(coin.note.clone()),
        photo_path_obverse: Set(coin.photo_path_obverse.clone()),
        photo_path_reverse: Set(coin.photo_path_reverse.clone()),
        collection_id: Set(coin.collection_id.clone()),
        created_at: Set(format_timestamp(&coin.metadata.created_at)),
        updated_at: Set(format_timestamp(&coin.metadata.updated_at)),
        created_by: Set(coin.metadata.created_by.clone()),
        updated_by: Set(coin.metadata.updated_by.clone()),
    }
}

fn into_coins(models: Vec<Model>) -> anyhow::Result<Vec<Coin>> {
    models.into_iter().map(Coin::try_from).collect()
}

pub async fn insert(db: &DatabaseConnection, coin: &Coin) -> anyhow::Result<()> {
    to_active_model(coin).insert(db).await?;
    Ok(())
}

/// Полная перезапись документа. `created_*` не переписываются.
pub async fn update(db: &DatabaseConnection, coin: &Coin) -> anyhow::Result<()> {
    let mut active = to_active_model(coin);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.created_by = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> anyhow::Result<Option<Coin>> {
    Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(Coin::try_from)
        .transpose()
}

/// Все монеты (для статистики)
pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Coin>> {
    let models = Entity::find().order_by_asc(Column::Id).all(db).await?;
    into_coins(models)
}

/// Удаление по ID. Возвращает true, если запись существовала.
pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn count(db: &DatabaseConnection) -> anyhow::Result<u64> {
    Ok(Entity::find().count(db).await?)
}

/// Страница документов по условию
///
/// Общее количество считается по тому же условию без учёта пагинации.
/// Вторичная сортировка по ID делает порядок стабильным.
pub async fn find_page(
    db: &DatabaseConnection,
    condition: Condition,
    order_by: Column,
    order: Order,
    offset: u64,
    limit: u64,
) -> anyhow::Result<(Vec<Coin>, u64)> {
    let total = Entity::find().filter(condition.clone()).count(db).await?;

    let models = Entity::find()
        .filter(condition)
        .order_by(order_by, order)
        .order_by_asc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;

    Ok((into_coins(models)?, total))
}

/// Самые дорогие монеты: цена по убыванию, при равенстве по ID
pub async fn top_by_price(db: &DatabaseConnection, limit: u64) -> anyhow::Result<Vec<Coin>> {
    let models = Entity::find()
        .order_by_desc(Column::Price)
        .order_by_asc(Column::Id)
        .limit(limit)
        .all(db)
        .await?;
    into_coins(models)
}
