use super::error::DbError;
use crate::modules::common::responses::SimpleError;
use http::StatusCode;
use sea_orm::{ConnectionTrait, Paginator, SelectorTrait};
use serde::Serialize;
use thiserror::Error;

/// Amount of records shown on every listing page
pub const PAGE_SIZE: u64 = 5;

/// Reasons a requested page cannot be served
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Page is not 'last', nor can it be converted to an int.")]
    NotAnInteger,

    #[error("That page number is less than 1")]
    LessThanOne,

    #[error("That page contains no results")]
    NoResults,
}

impl From<PageError> for (StatusCode, SimpleError) {
    fn from(err: PageError) -> Self {
        (StatusCode::NOT_FOUND, SimpleError::from(err.to_string()))
    }
}

/// Pagination metadata of a executed query, rendered by the list templates
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    /// 1 Indexed page number
    pub number: u64,

    /// Total pages available for the query, never less than 1
    pub num_pages: u64,

    /// Total items available for the query
    pub count: u64,

    /// Amount of records per page
    pub per_page: u64,

    /// if the records span more than a single page
    pub is_paginated: bool,

    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
}

impl PageMeta {
    /// Resolves the `page` query parameter against the amount of items of a query.
    ///
    /// `None` selects the first page and `"last"` the last one, the first page of
    /// a empty query is always valid.
    pub fn resolve(requested: Option<&str>, count: u64, per_page: u64) -> Result<Self, PageError> {
        let num_pages = if count == 0 {
            1
        } else {
            count.div_ceil(per_page)
        };

        let number = match requested.map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(raw) => {
                let n = raw.parse::<i64>().map_err(|_| PageError::NotAnInteger)?;

                if n < 1 {
                    return Err(PageError::LessThanOne);
                }

                n as u64
            }
        };

        if number > num_pages {
            return Err(PageError::NoResults);
        }

        Ok(PageMeta {
            number,
            num_pages,
            count,
            per_page,
            is_paginated: num_pages > 1,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
        })
    }

    /// Amount of records on the resolved page
    pub fn len(&self) -> u64 {
        let offset = (self.number - 1) * self.per_page;
        self.count.saturating_sub(offset).min(self.per_page)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single page of records and its metadata
pub struct Page<T> {
    pub meta: PageMeta,
    pub records: Vec<T>,
}

impl<T> Page<T> {
    /// converts the records of the page, keeping the metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            meta: self.meta,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}

/// Executes a paginated query, fetching the number of items and the records of
/// the requested page into a `Page`
pub async fn fetch_page<'db, C, S>(
    paginator: Paginator<'db, C, S>,
    requested: Option<&str>,
) -> Result<Page<S::Item>, (StatusCode, SimpleError)>
where
    C: ConnectionTrait,
    S: SelectorTrait + 'db,
{
    let count = paginator.num_items().await.map_err(DbError::from)?;
    let meta = PageMeta::resolve(requested, count, PAGE_SIZE)?;

    let records = paginator
        .fetch_page(meta.number - 1)
        .await
        .map_err(DbError::from)?;

    Ok(Page { meta, records })
}
