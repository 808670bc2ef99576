//! Построение условий выборки монет и разбор сортировки

use contracts::domain::a001_coin::CoinSearchFilter;
use contracts::shared::page::{SortDirection, SortOrder};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, Order};

use super::repository::Column;
use crate::shared::error::ApiError;

const LIKE_ESCAPE: char = '!';

/// Экранирование спецсимволов LIKE: пользовательский ввод ищется буквально
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// `lower(column) LIKE %lower(needle)% ESCAPE '!'`
///
/// SQLite `lower()` меняет регистр только у ASCII, поэтому и здесь только ASCII.
fn contains_ignore_case(column: Column, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_ascii_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// Условие расширенного поиска: все заданные фильтры через AND
pub fn build_condition(filter: &CoinSearchFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(name) = &filter.name_contains {
        condition = condition.add(contains_ignore_case(Column::Name, name));
    }
    if let Some(material) = &filter.material_contains {
        condition = condition.add(contains_ignore_case(Column::Material, material));
    }

    // Пустое множество -> без фильтра, один элемент -> равенство, несколько -> IN
    match filter.degrees.as_slice() {
        [] => {}
        [single] => condition = condition.add(Column::Degree.eq(single.code())),
        many => condition = condition.add(Column::Degree.is_in(many.iter().map(|d| d.code()))),
    }
    if !filter.conservation_obverse_in.is_empty() {
        condition = condition.add(
            Column::ConservationObverse
                .is_in(filter.conservation_obverse_in.iter().map(|c| c.code())),
        );
    }

    if let Some(min) = filter.min_year {
        condition = condition.add(Column::Year.gte(min));
    }
    if let Some(max) = filter.max_year {
        condition = condition.add(Column::Year.lte(max));
    }
    if let Some(min) = filter.min_price {
        condition = condition.add(Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        condition = condition.add(Column::Price.lte(max));
    }

    condition
}

/// Точное совпадение имени (SQLite сравнивает с учётом регистра)
pub fn name_equals(name: &str) -> Condition {
    Condition::all().add(Column::Name.eq(name))
}

pub fn year_equals(year: i32) -> Condition {
    Condition::all().add(Column::Year.eq(year))
}

pub fn collection_equals(collection_id: &str) -> Condition {
    Condition::all().add(Column::CollectionId.eq(collection_id))
}

/// Колонка для сортировки по имени свойства из API (camelCase)
pub fn sort_column(property: &str) -> Option<Column> {
    let column = match property {
        "id" => Column::Id,
        "name" => Column::Name,
        "year" => Column::Year,
        "material" => Column::Material,
        "weight" => Column::Weight,
        "diameter" => Column::Diameter,
        "height" => Column::Height,
        "price" => Column::Price,
        "degree" => Column::Degree,
        "conservationObverse" => Column::ConservationObverse,
        "conservationReverse" => Column::ConservationReverse,
        "collectionId" => Column::CollectionId,
        "createdAt" => Column::CreatedAt,
        "updatedAt" => Column::UpdatedAt,
        _ => return None,
    };
    Some(column)
}

/// Сортировка запроса -> (колонка, порядок) или ошибка недопустимого аргумента
pub fn resolve_sort(sort: &SortOrder) -> Result<(Column, Order), ApiError> {
    let column = sort_column(&sort.property).ok_or_else(|| {
        ApiError::InvalidArgument(format!("Unknown sort property '{}'", sort.property))
    })?;
    let order = match sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    Ok((column, order))
}
