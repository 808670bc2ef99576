//! Постраничная выдача: параметры запроса, нормализация и объект страницы

use serde::{Deserialize, Serialize};

use crate::shared::query::empty_as_none;

/// Размер страницы по умолчанию (и замена для size <= 0)
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Максимальный размер страницы
pub const MAX_PAGE_SIZE: u64 = 100;
/// Поле сортировки по умолчанию
pub const DEFAULT_SORT_PROPERTY: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Порядок сортировки: поле + направление
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// Парсинг параметра `sort` в формате `property[,asc|desc]`
    ///
    /// Пустая строка даёт сортировку по умолчанию (`name,asc`).
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }

        let mut parts = raw.splitn(2, ',');
        let property = parts.next().unwrap_or_default().trim();
        if property.is_empty() {
            return Err(format!("Invalid sort parameter '{}'", raw));
        }

        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(d) => SortDirection::parse(d)
                .ok_or_else(|| format!("Invalid sort direction '{}'", d.trim()))?,
        };

        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::asc(DEFAULT_SORT_PROPERTY)
    }
}

/// Нормализованный запрос страницы
///
/// Инварианты: `size` в диапазоне [1, MAX_PAGE_SIZE].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: SortOrder,
}

impl PageRequest {
    /// Нормализация параметров: отрицательная страница -> 0,
    /// size <= 0 -> DEFAULT_PAGE_SIZE, size > MAX_PAGE_SIZE -> MAX_PAGE_SIZE.
    /// Некорректные значения никогда не отклоняются.
    pub fn clamped(page: i64, size: i64, sort: SortOrder) -> Self {
        let page = page.max(0) as u64;
        let size = if size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            (size as u64).min(MAX_PAGE_SIZE)
        };
        Self { page, size, sort }
    }

    /// Смещение первой записи страницы
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::clamped(0, DEFAULT_PAGE_SIZE as i64, SortOrder::default())
    }
}

/// Параметры пагинации из query string (`?page=&size=&sort=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self) -> Result<PageRequest, String> {
        let sort = match &self.sort {
            Some(s) => SortOrder::parse(s)?,
            None => SortOrder::default(),
        };
        Ok(PageRequest::clamped(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
            sort,
        ))
    }
}

/// Страница результата
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub sort: SortOrder,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size.max(1));
        Self {
            content,
            page_number: request.page,
            page_size: request.size,
            sort: request.sort.clone(),
            total_elements,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            sort: self.sort,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_size_and_page() {
        let r = PageRequest::clamped(0, 0, SortOrder::default());
        assert_eq!(r.size, 20);

        let r = PageRequest::clamped(0, 500, SortOrder::default());
        assert_eq!(r.size, 100);

        let r = PageRequest::clamped(-1, 10, SortOrder::default());
        assert_eq!(r.page, 0);
        assert_eq!(r.size, 10);

        let r = PageRequest::clamped(3, -7, SortOrder::default());
        assert_eq!((r.page, r.size), (3, 20));

        let r = PageRequest::clamped(2, 100, SortOrder::default());
        assert_eq!((r.size, r.offset()), (100, 200));
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(SortOrder::parse("").unwrap(), SortOrder::asc("name"));
        assert_eq!(SortOrder::parse("price").unwrap(), SortOrder::asc("price"));
        assert_eq!(SortOrder::parse("price,DESC").unwrap(), SortOrder::desc("price"));
        assert_eq!(SortOrder::parse(" year , asc ").unwrap(), SortOrder::asc("year"));
        assert!(SortOrder::parse("price,sideways").is_err());
        assert!(SortOrder::parse(",desc").is_err());
    }

    #[test]
    fn test_page_query_defaults() {
        let r = PageQuery::default().to_request().unwrap();
        assert_eq!(r, PageRequest::clamped(0, 20, SortOrder::asc("name")));

        let blank: PageQuery = serde_json::from_str(r#"{"page": "", "size": ""}"#).unwrap();
        assert_eq!(blank.to_request().unwrap(), r);
    }

    #[test]
    fn test_page_serialization_and_total_pages() {
        let request = PageRequest::clamped(1, 2, SortOrder::desc("price"));
        let page = Page::new(vec![1, 2], &request, 5);
        assert_eq!(page.total_pages, 3);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageNumber"], 1);
        assert_eq!(json["pageSize"], 2);
        assert_eq!(json["totalElements"], 5);
        assert_eq!(json["sort"]["property"], "price");
        assert_eq!(json["sort"]["direction"], "DESC");

        let empty: Page<i32> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(empty.total_pages, 0);
    }
}
