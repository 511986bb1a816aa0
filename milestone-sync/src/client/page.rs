//! Cursor-based pages.

use http::Uri;

/// Opaque handle to the next page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(pub(crate) Uri);

impl PageCursor {
    /// Full URL the cursor points at.
    #[must_use]
    pub fn url(&self) -> String {
        self.0.to_string()
    }
}

/// One page of a listing and the cursor to the following one, if any.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Records on this page, in server order.
    pub items: Vec<T>,

    /// Cursor to the next page; `None` on the last page.
    pub next: Option<PageCursor>,
}

impl<T> From<octocrab::Page<T>> for Page<T> {
    fn from(page: octocrab::Page<T>) -> Self {
        Self {
            items: page.items,
            next: page.next.map(PageCursor),
        }
    }
}

/// Every record a paginated listing gathered.
///
/// `complete` is false when a page failed under [`ErrorPolicy::Log`] and the
/// walk stopped before the server ran out of pages. An incomplete listing is
/// a failure: the records are only the ones fetched before it.
///
/// [`ErrorPolicy::Log`]: crate::ErrorPolicy::Log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    /// Records in server order.
    pub items: Vec<T>,

    /// Whether the last page was reached.
    pub complete: bool,
}

impl<T> Listing<T> {
    /// Converts every record, keeping completeness.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            complete: self.complete,
        }
    }

    /// Number of records gathered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no record was gathered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
