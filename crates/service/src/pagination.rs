//! Fixed-size page windows over ordered selections.
//!
//! Pages are 1-based and always [`PAGE_SIZE`] long. A page number below 1
//! addresses nothing, so it yields an empty page rather than an error.

use sea_orm::{DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, Select};

use crate::errors::ServiceError;

/// Items per page.
pub const PAGE_SIZE: u64 = 10;

/// Requested page number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
}

impl PageRequest {
    pub fn new(page: i64) -> Self { Self { page } }

    /// Parse a raw `?page=` value; absent or unparsable values mean page 1.
    pub fn from_query(raw: Option<&str>) -> Self {
        let page = raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(1);
        Self { page }
    }

    /// Zero-based page index, or `None` when the page lies before the first one.
    pub fn index(self) -> Option<u64> {
        if self.page < 1 { None } else { Some((self.page - 1) as u64) }
    }

    /// Offset of the first item on this page; `None` when it does not fit in `u64`.
    pub fn offset(self) -> Option<u64> {
        self.index().and_then(|i| i.checked_mul(PAGE_SIZE))
    }

    /// Half-open item range `[start, end)` covered by this page.
    pub fn bounds(self) -> Option<(u64, u64)> {
        self.offset().map(|start| (start, start.saturating_add(PAGE_SIZE)))
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page: 1 } }
}

/// One page of items plus the size of the whole filtered selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// Count the selection and fetch the requested window of it.
pub async fn fetch_page<'db, E>(db: &'db DatabaseConnection, select: Select<E>, req: PageRequest) -> Result<Page<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync + 'db,
{
    let paginator = select.paginate(db, PAGE_SIZE);
    let total = paginator.num_items().await?;
    // only windows that start inside the selection reach the database
    let items = match (req.index(), req.offset()) {
        (Some(idx), Some(start)) if start < total => paginator.fetch_page(idx).await?,
        _ => Vec::new(),
    };
    Ok(Page { items, total })
}
