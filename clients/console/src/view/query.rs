use common::models::UserFilters;

/// Search, role filter and page of the user listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub filter: String,
    pub page: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter: "all".to_string(),
            page: 1,
        }
    }
}

impl ListQuery {
    /// Adopt the filters echoed by the server
    pub fn sync(&mut self, filters: &UserFilters, page: u64) {
        self.search = filters.search.clone();
        self.filter = filters.filter.clone();
        self.page = page;
    }

    /// New search: same filters, back to the first page
    pub fn submit_search(&mut self, search: &str, filter: &str) {
        self.search = search.to_string();
        self.filter = filter.to_string();
        self.page = 1;
    }

    pub fn goto(&mut self, page: u64) {
        self.page = page.max(1);
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("search", self.search.clone()),
            ("filter", self.filter.clone()),
            ("page", self.page.to_string()),
        ]
    }
}
