/// Slice bounds for one page of a sequence of `len` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// `page` is 1-based. Out-of-range pages produce an empty window.
    pub fn new(len: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = len.div_ceil(page_size);
        let start = page.saturating_sub(1).saturating_mul(page_size);
        let end = start.saturating_add(page_size);
        Self {
            page,
            total_pages,
            start: start.min(len),
            end: end.min(len),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.start.min(rows.len())..self.end.min(rows.len())]
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}
