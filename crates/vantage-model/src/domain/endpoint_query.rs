const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// Filter and pagination for listing endpoints of one organisation.
#[derive(Debug, Clone)]
pub struct EndpointQuery {
    /// Case-insensitive substring match on the endpoint name.
    pub name: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

/// One page of a listing.
///
/// `total` counts matches before pagination.
#[derive(Debug, Clone)]
pub struct EndpointPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl Default for EndpointQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointQuery {
    pub fn new() -> Self {
        Self {
            name: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Whether `name` passes the name filter.
    pub fn matches(&self, name: &str) -> bool {
        match &self.name {
            Some(needle) => name
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
            None => true,
        }
    }
}
