use std::sync::Arc;

use crate::domain::entities::table::{RoleFilter, SortColumn, SortSpec};
use crate::domain::entities::user::User;
use crate::domain::pipeline::filter::{filter_rows, FilterQuery};
use crate::domain::pipeline::paginate::{total_pages, PageWindow};
use crate::domain::pipeline::sort::sort_rows;

/// Interaction state owned by [`TablePipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub search_input: String,
    pub debounced_search: String,
    pub role_filter: RoleFilter,
    pub sort: SortSpec,
    pub current_page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            search_input: String::new(),
            debounced_search: String::new(),
            role_filter: RoleFilter::All,
            sort: SortSpec::default(),
            current_page: 1,
        }
    }
}

/// Everything the table needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub rows: Vec<&'a User>,
    pub current_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub sort: SortSpec,
    pub role_filter: RoleFilter,
    pub search_input: &'a str,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Filter, sort and paginate coordinator over a shared, read-only record set.
///
/// Each stage caches its output as row positions into `users` and is rerun
/// only when one of its inputs changes:
///
/// - filter: debounced search, role filter, record set
/// - sort: filter output, sort column, sort direction
/// - paginate: computed on demand from the sorted rows and the current page
#[derive(Debug, Clone)]
pub struct TablePipeline {
    users: Arc<[User]>,
    page_size: usize,
    state: TableState,
    filtered: Vec<usize>,
    sorted: Vec<usize>,
}

impl TablePipeline {
    pub fn new(users: Arc<[User]>, page_size: usize) -> Self {
        let mut pipeline = Self {
            users,
            page_size: page_size.max(1),
            state: TableState::default(),
            filtered: Vec::new(),
            sorted: Vec::new(),
        };
        pipeline.refilter();
        pipeline
    }

    #[cfg(test)]
    pub fn state(&self) -> &TableState {
        &self.state
    }

    #[cfg(test)]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.sorted.len(), self.page_size)
    }

    /// Raw keystrokes. Any edit returns to page 1; filtering waits for
    /// [`Self::apply_debounced_search`].
    pub fn set_search_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.state.search_input {
            return;
        }
        self.state.search_input = text;
        self.state.current_page = 1;
    }

    /// Returns `false` when the settled term is unchanged.
    pub fn apply_debounced_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.state.debounced_search {
            return false;
        }
        tracing::debug!(term = %term, "search settled");
        self.state.debounced_search = term;
        self.state.current_page = 1;
        self.refilter();
        true
    }

    pub fn set_role_filter(&mut self, role_filter: RoleFilter) {
        self.state.current_page = 1;
        if role_filter == self.state.role_filter {
            return;
        }
        self.state.role_filter = role_filter;
        self.refilter();
    }

    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.state.sort = self.state.sort.toggled(column);
        tracing::debug!(column = ?self.state.sort.column, direction = ?self.state.sort.direction, "sort changed");
        self.resort();
    }

    /// Moves to `page` when it lies within `1..=total_pages`. With no pages
    /// the table stays on page 1.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            self.state.current_page = 1;
            return false;
        }
        if page == 0 || page > total_pages {
            tracing::debug!(page, total_pages, "page request out of range");
            return false;
        }
        self.state.current_page = page;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        match self.state.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.state.current_page + 1)
    }

    /// Swaps in a freshly loaded record set, keeping filter and sort choices.
    pub fn replace_users(&mut self, users: Arc<[User]>) {
        self.users = users;
        self.state.current_page = 1;
        self.refilter();
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.sorted.len(), self.state.current_page, self.page_size)
    }

    pub fn view(&self) -> TableView<'_> {
        let window = self.window();
        TableView {
            rows: window
                .slice(&self.sorted)
                .iter()
                .map(|&pos| &self.users[pos])
                .collect(),
            current_page: self.state.current_page,
            total_pages: window.total_pages,
            filtered_count: self.filtered_count(),
            sort: self.state.sort,
            role_filter: self.state.role_filter,
            search_input: &self.state.search_input,
            has_previous: window.has_previous(),
            has_next: window.has_next(),
        }
    }

    fn refilter(&mut self) {
        let query = FilterQuery::new(&self.state.debounced_search, self.state.role_filter);
        self.filtered = filter_rows(&self.users, &query);
        tracing::debug!(
            total = self.users.len(),
            matched = self.filtered.len(),
            role = %self.state.role_filter,
            "filter stage rerun"
        );
        self.resort();
    }

    fn resort(&mut self) {
        self.sorted = sort_rows(&self.users, &self.filtered, self.state.sort);
        tracing::debug!(count = self.sorted.len(), "sort stage rerun");
    }
}
