//! Generic filtered pagination over any SeaORM entity.

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, ItemsAndPagesNumber, Iterable,
    PaginatorTrait, PrimaryKeyToColumn, QueryFilter, QueryOrder, Select,
};

use crate::errors::{ApiError, AppResult};
use crate::types::{FilterSpec, Paginated, PaginationParams};

/// An entity whose listing can be narrowed by [`FilterSpec`] constraints.
pub trait FilterableEntity: EntityTrait {
    /// Column backing the filter `field`, if the entity has one
    fn filter_column(field: &str) -> Option<Self::Column>;
}

/// Fetch one page of `query`, narrowed by `filter`.
///
/// Constraints are combined as equalities, ordered by primary key ascending.
/// No matches yield an empty page with `total_pages == 0`. Asking for a page
/// past the last one fails with `PAGES_NOT_FOUND`.
pub async fn paginate<E, C>(
    conn: &C,
    query: Select<E>,
    filter: &FilterSpec,
    params: &PaginationParams,
) -> AppResult<Paginated<E::Model>>
where
    E: FilterableEntity,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let mut condition = Condition::all();
    for (field, value) in filter.constraints() {
        match E::filter_column(field) {
            Some(column) => condition = condition.add(column.eq(value.clone())),
            None => tracing::debug!(field = %field, "Filter has no column, skipping"),
        }
    }

    let mut query = query.filter(condition);
    for key in E::PrimaryKey::iter() {
        query = query.order_by_asc(key.into_column());
    }

    let per_page = params.limit();
    let paginator = query.paginate(conn, per_page);
    let ItemsAndPagesNumber {
        number_of_items,
        number_of_pages,
    } = paginator.num_items_and_pages().await?;

    if number_of_pages == 0 {
        return Ok(Paginated::new(Vec::new(), params.page, per_page, 0));
    }

    if params.page > number_of_pages {
        tracing::warn!(
            page = params.page,
            total_pages = number_of_pages,
            "Requested page does not exist"
        );
        return Err(ApiError::pages_not_found(params.page, number_of_pages).into());
    }

    let data = paginator.fetch_page(params.page - 1).await?;
    tracing::debug!(
        page = params.page,
        per_page,
        total = number_of_items,
        "Fetched page"
    );

    Ok(Paginated::new(data, params.page, per_page, number_of_items))
}
