//! Page arithmetic and the shared count + page fetch.

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;

pub const DEFAULT_LIMIT: u64 = 10;

/// Requested page; `page` is 1-based. Zero values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT)
    }
}

/// Pagination block returned next to the items.
///
/// `from`/`to` are 1-based positions of the first and last item on the
/// page, both 0 when the page is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
    pub from: u64,
    pub to: u64,
}

impl PageInfo {
    pub fn new(total: u64, request: PageRequest) -> Self {
        let offset = request.offset();
        let (from, to) = if offset >= total {
            (0, 0)
        } else {
            (offset + 1, (offset + request.limit).min(total))
        };
        Self {
            total,
            page: request.page,
            limit: request.limit,
            pages: total.div_ceil(request.limit),
            from,
            to,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Count with `condition`, then fetch one ordered page with the same
/// condition.
pub async fn fetch_page<E, C>(
    conn: &C,
    condition: Condition,
    order_by: E::Column,
    order: Order,
    request: PageRequest,
) -> Result<Paginated<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Column: ColumnTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let total = E::find().filter(condition.clone()).count(conn).await?;
    let items = E::find()
        .filter(condition)
        .order_by(order_by, order)
        .offset(request.offset())
        .limit(request.limit)
        .all(conn)
        .await?;

    Ok(Paginated {
        items,
        pagination: PageInfo::new(total, request),
    })
}
