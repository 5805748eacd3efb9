/// Repositories shown per page
pub const PAGE_SIZE: usize = 6;

/// Number of pages needed to show `len` items, `page_size` at a time
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// One page worth of items, borrowed from the full slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-indexed
    pub number: usize,
    pub total_pages: usize,
}

/// Slice out page `number` (1-indexed).
///
/// Out of range pages, page 0 included, come back empty rather than
/// failing. The last page is clipped at the end of `items`.
pub fn paginate<T>(items: &[T], number: usize, page_size: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), page_size);

    let slice = if number == 0 {
        &items[..0]
    } else {
        let start = (number - 1).saturating_mul(page_size).min(items.len());
        let end = start.saturating_add(page_size).min(items.len());
        &items[start..end]
    };

    Page {
        items: slice,
        number,
        total_pages: total,
    }
}

/// Current page number plus the fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Step back one page. Returns false when already on the first page.
    pub fn previous(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one page. Returns false when already on the last page.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.current < total_pages {
            self.current += 1;
            true
        } else {
            false
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
