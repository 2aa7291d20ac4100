//! Infinite-scroll page accumulation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Something with a stable identifier.
pub trait Keyed {
    /// Identifier used to drop repeats across pages.
    fn key(&self) -> &str;
}

impl Keyed for crate::core::queue::MealItem {
    fn key(&self) -> &str {
        &self.id
    }
}

/// One page of results as returned by a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Cursor for the following page; absent on the last page.
    pub next_cursor: Option<String>,
}

/// Accumulates successive pages into one list.
///
/// Items already seen (by [`Keyed::key`]) are skipped, so a page that
/// overlaps the previous one after a server-side insert does not duplicate
/// rows.
#[derive(Debug, Clone)]
pub struct PageAccumulator<T> {
    items: Vec<T>,
    seen: HashSet<String>,
    next_cursor: Option<String>,
    pages: usize,
}

impl<T> Default for PageAccumulator<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            next_cursor: None,
            pages: 0,
        }
    }
}

impl<T: Keyed> PageAccumulator<T> {
    /// Empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page. Returns the number of new items kept.
    pub fn push(&mut self, page: Page<T>) -> usize {
        let before = self.items.len();
        for item in page.items {
            if self.seen.insert(item.key().to_owned()) {
                self.items.push(item);
            }
        }
        self.next_cursor = page.next_cursor;
        self.pages += 1;
        self.items.len() - before
    }

    /// Whether another page can be requested.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.pages == 0 || self.next_cursor.is_some()
    }

    /// Cursor for the next request.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Number of pages pushed so far.
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }

    /// Accumulated items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Drop everything, e.g. after the underlying query changes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Consume the accumulator and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
