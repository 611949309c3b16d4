//! Mock dataset-list endpoint.
//!
//! Mirrors the shape of a paginated read API: the query is validated and
//! clamped server-side, the response carries pagination echo data, and an
//! artificial latency stands in for the network round trip. A second,
//! client-side filter pass covers what the mock backend does not index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::{Duration, sleep};

use common::config::FetchConfig;
use common::dataset::Dataset;
use common::error::AppError;
use common::resource::Resource;

use crate::resources::ResourceStore;

const SORTABLE_FIELDS: &[&str] = &["created_time", "name"];
const SORT_ORDERS: &[&str] = &["asc", "desc"];

/// Server-side query parameters for the dataset list.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DatasetQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    /// One of `created_time`, `name`. Defaults to `created_time`.
    pub sort_by: Option<String>,
    /// One of `asc`, `desc`. Defaults to `desc`.
    pub sort_order: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// One page of datasets plus the pagination echo.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetPage {
    pub items: Vec<Resource<Dataset>>,
    pub pagination: Pagination,
}

/// Filters applied client-side, after the page is fetched.
#[derive(Clone, Debug, Default)]
pub struct FrontendFilters {
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
    /// Creator multiselect; empty means all creators.
    pub creators: Vec<String>,
    /// Restrict to resources created by the current user.
    pub mine: bool,
}

/// Reject unknown sort fields and orders before touching the store.
pub fn validate_dataset_query(query: &DatasetQuery) -> Result<(), AppError> {
    if let Some(sort_by) = &query.sort_by
        && !SORTABLE_FIELDS.contains(&sort_by.as_str())
    {
        return Err(AppError::Validation(format!(
            "Invalid sort_by '{sort_by}'. Valid values: {}",
            SORTABLE_FIELDS.join(", ")
        )));
    }
    if let Some(sort_order) = &query.sort_order
        && !SORT_ORDERS.contains(&sort_order.as_str())
    {
        return Err(AppError::Validation(format!(
            "Invalid sort_order '{sort_order}'. Valid values: {}",
            SORT_ORDERS.join(", ")
        )));
    }
    if query.per_page == Some(0) {
        return Err(AppError::Validation("per_page must be at least 1".into()));
    }
    Ok(())
}

/// Fetch one page of datasets, as the backing API would serve it.
pub async fn fetch_datasets(
    store: &ResourceStore,
    config: &FetchConfig,
    query: &DatasetQuery,
) -> Result<DatasetPage, AppError> {
    validate_dataset_query(query)?;
    sleep(Duration::from_millis(config.latency_ms)).await;

    let mut items: Vec<&Resource<Dataset>> = store
        .datasets
        .iter()
        .filter(|d| {
            query
                .created_after
                .is_none_or(|after| d.meta.created_time >= after)
                && query
                    .created_before
                    .is_none_or(|before| d.meta.created_time <= before)
        })
        .collect();

    let sort_by = query.sort_by.as_deref().unwrap_or("created_time");
    match sort_by {
        "name" => items.sort_by(|a, b| {
            (&a.data.name, &a.meta.resource_id).cmp(&(&b.data.name, &b.meta.resource_id))
        }),
        _ => items.sort_by(|a, b| {
            (a.meta.created_time, &a.meta.resource_id)
                .cmp(&(b.meta.created_time, &b.meta.resource_id))
        }),
    }
    if query.sort_order.as_deref().unwrap_or("desc") == "desc" {
        items.reverse();
    }

    let per_page = query
        .per_page
        .unwrap_or(config.default_per_page)
        .clamp(1, config.max_per_page);
    let page = query.page.unwrap_or(1).max(1);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(per_page).max(1);

    // Saturate so an absurd page number is just an empty page, not a panic.
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let items = items
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(per_page as usize)
        .cloned()
        .collect();

    Ok(DatasetPage {
        items,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    })
}

/// Client-side pass over an already fetched page.
pub fn apply_frontend_filters<'a>(
    items: &'a [Resource<Dataset>],
    filters: &FrontendFilters,
    current_user: &str,
) -> Vec<&'a Resource<Dataset>> {
    let search = filters
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());
    items
        .iter()
        .filter(|d| {
            search.as_deref().is_none_or(|term| {
                d.data.name.to_lowercase().contains(term)
                    || d.data.description.to_lowercase().contains(term)
            })
        })
        .filter(|d| filters.creators.is_empty() || filters.creators.contains(&d.meta.creator))
        .filter(|d| !filters.mine || d.meta.creator == current_user)
        .collect()
}
