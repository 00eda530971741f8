//! Paginated list-view state machine.
//!
//! DESIGN
//! ======
//! The pager owns page number, page size, and load state for one listing.
//! It never fetches anything itself: fetch-triggering events return a
//! `PageRequest` and the caller pushes the result back in via `complete`.
//!
//! Every issued request carries a monotonically increasing sequence number.
//! `complete` discards any result whose sequence is not the latest issued,
//! so a slow response can never clobber a newer page.
//!
//! States: Idle -> Loading on mount or page/size change; Loading -> Loaded
//! on a result with rows; Loading -> Empty on a result with none.

/// Selectable page sizes, smallest first.
pub const PAGE_SIZES: [u64; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Empty,
}

/// One fetch the caller must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Staleness token; hand it back to [`Pager::complete`].
    pub seq: u64,
    /// 1-based page number.
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    /// Offset passed to the backend: `(number - 1) * size`.
    /// Saturating: an out-of-range page number from the query string must
    /// not overflow before `complete` gets a chance to clamp it.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.number.saturating_sub(1).saturating_mul(self.size)
    }
}

/// `ceil(total / size)`. Zero records means zero pages.
#[must_use]
pub fn total_pages(total: u64, size: u64) -> u64 {
    total.div_ceil(size)
}

#[derive(Debug, Clone)]
pub struct Pager {
    page: u64,
    size: u64,
    total: u64,
    state: LoadState,
    seq: u64,
    filter: String,
}

impl Pager {
    #[must_use]
    pub fn new() -> Self {
        Self { page: 1, size: DEFAULT_PAGE_SIZE, total: 0, state: LoadState::Idle, seq: 0, filter: String::new() }
    }

    /// Pager positioned from request parameters. An unknown size falls back
    /// to the default; the page number is floored at 1 (the upper clamp
    /// needs the record count and happens in `complete`).
    #[must_use]
    pub fn for_request(page: u64, size: u64) -> Self {
        let mut pager = Self::new();
        if PAGE_SIZES.contains(&size) {
            pager.size = size;
        }
        pager.page = page.max(1);
        pager
    }

    /// First fetch after construction.
    pub fn mount(&mut self) -> PageRequest {
        self.issue()
    }

    /// Advance one page. `None` when already on the last page (or nothing
    /// is loaded yet) — mirrors the disabled Next button.
    pub fn next_page(&mut self) -> Option<PageRequest> {
        if !self.has_next() {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    /// Go back one page. `None` when already on page 1.
    pub fn prev_page(&mut self) -> Option<PageRequest> {
        if !self.has_prev() {
            return None;
        }
        self.page -= 1;
        Some(self.issue())
    }

    /// Switch page size and reset to page 1. `None` (no fetch) for a size
    /// outside [`PAGE_SIZES`].
    pub fn set_page_size(&mut self, size: u64) -> Option<PageRequest> {
        if !PAGE_SIZES.contains(&size) {
            return None;
        }
        self.size = size;
        self.page = 1;
        Some(self.issue())
    }

    /// Update the free-text filter. Applies to the loaded page only and
    /// never triggers a fetch.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_owned();
    }

    /// Re-issue a fetch for the current position, e.g. after `complete`
    /// clamped the page number.
    pub fn reload(&mut self) -> PageRequest {
        self.issue()
    }

    /// Accept a fetch result. Returns `false` (and changes nothing) when
    /// `seq` is not the latest issued request — the result is stale.
    pub fn complete(&mut self, seq: u64, row_count: usize, total: u64) -> bool {
        if seq != self.seq {
            tracing::debug!(stale = seq, current = self.seq, "discarding stale page result");
            return false;
        }

        self.total = total;
        self.state = if row_count == 0 { LoadState::Empty } else { LoadState::Loaded };

        // pageNumber stays within [1, totalPages] whenever totalPages > 0.
        let pages = total_pages(total, self.size);
        if pages > 0 && self.page > pages {
            self.page = pages;
        }
        true
    }

    fn issue(&mut self) -> PageRequest {
        self.seq += 1;
        self.state = LoadState::Loading;
        PageRequest { seq: self.seq, number: self.page, size: self.size }
    }

    // -- accessors ------------------------------------------------------------

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.size)
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "pager_test.rs"]
mod tests;
