/// Pagination window for enumerations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl Page {
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        Self { limit, offset }
    }

    /// No limit, no offset.
    pub fn all() -> Self {
        Self::default()
    }

    /// Skips `offset` items and takes at most `limit` of the rest.
    pub fn apply<I>(self, items: I) -> Vec<I::Item>
    where
        I: IntoIterator,
    {
        let items = items.into_iter().skip(self.offset.unwrap_or(0));
        match self.limit {
            Some(limit) => items.take(limit).collect(),
            None => items.collect(),
        }
    }
}
