/// Key the record index is stored under
pub const DEFAULT_INDEX_KEY: &str = "file_history_index";

/// Maximum number of records kept before the oldest are evicted
pub const DEFAULT_MAX_RECORDS: usize = 1000;

/// Number of records reported as "recent" in statistics
pub const DEFAULT_RECENT_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub max_records: usize,
    pub recent_limit: usize,
    pub index_key: String,
}

impl StoreConfig {
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            recent_limit: DEFAULT_RECENT_LIMIT,
            index_key: DEFAULT_INDEX_KEY.to_string(),
        }
    }
}
