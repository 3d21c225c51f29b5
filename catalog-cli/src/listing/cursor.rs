/// Number of products requested per page.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    pub fn delta(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Client-held position in a listing.
///
/// The service never reports a total count, so `total_estimate` is a
/// "has next page" probe: a full batch claims one more item than the pages
/// seen so far, a short batch is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page_index: usize,
    pub page_size: usize,
    pub total_estimate: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: PAGE_SIZE,
            total_estimate: 0,
        }
    }
}

impl PageCursor {
    pub fn skip(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Moves one page, never below the first.
    pub fn step(&mut self, direction: PageDirection) {
        self.page_index = self.page_index.saturating_add_signed(direction.delta());
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
    }

    pub fn record_batch(&mut self, batch_size: usize) {
        self.total_estimate = if batch_size >= self.page_size {
            self.seen_through().saturating_add(1)
        } else {
            self.skip().saturating_add(batch_size)
        };
    }

    pub fn nav(&self) -> PageNav {
        PageNav {
            page_number: self.page_index.saturating_add(1),
            prev_enabled: self.page_index > 0,
            next_enabled: self.total_estimate > self.seen_through(),
        }
    }

    /// Items covered by this page and every page before it.
    fn seen_through(&self) -> usize {
        self.page_index
            .saturating_add(1)
            .saturating_mul(self.page_size)
    }
}

/// State of a listing's previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNav {
    pub page_number: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PageNav {
    pub fn label(&self) -> String {
        format!("Page {}", self.page_number)
    }
}
