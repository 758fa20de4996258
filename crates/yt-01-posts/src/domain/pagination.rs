//! # Pagination
//!
//! Fixed-size pages over an ordered result set.
//!
//! Pagination is lenient: page numbers below 1 and unparsable values read
//! as the first page, and a page past the end is simply empty.

use serde::Serialize;
use std::num::IntErrorKind;

/// Items per feed page.
pub const PAGE_SIZE: usize = 10;

/// 1-based page number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(usize);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Clamp `n` to at least 1.
    pub fn new(n: usize) -> Self {
        Self(n.max(1))
    }

    /// Read a `?page=` query value the way the feed pages do.
    ///
    /// A number too large for `usize` is still a page past the end.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::FIRST;
        };
        match raw.trim().parse::<usize>() {
            Ok(n) => Self::new(n),
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => Self(usize::MAX),
            Err(_) => Self::FIRST,
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Offset/limit slice of an ordered result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    pub fn for_page(page: PageNumber, page_size: usize) -> Self {
        Self {
            offset: (page.get() - 1).saturating_mul(page_size),
            limit: page_size,
        }
    }

    /// Apply the window to an already ordered sequence.
    pub fn slice<T, I: IntoIterator<Item = T>>(&self, items: I) -> Vec<T> {
        items.into_iter().skip(self.offset).take(self.limit).collect()
    }
}

/// One page of results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: PageNumber,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_number: PageNumber, total_items: usize, page_size: usize) -> Self {
        Self {
            items,
            page_number,
            total_items,
            page_size,
        }
    }

    /// Number of pages; an empty result still has one (empty) page.
    pub fn num_pages(&self) -> usize {
        let size = self.page_size.max(1);
        self.total_items.div_ceil(size).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page_number.get() < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number.get() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Transform every item, keeping the page metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            total_items: self.total_items,
            page_size: self.page_size,
        }
    }
}
