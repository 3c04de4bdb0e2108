/// One page of results plus the total row count of the unpaged query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResults<T> {
    results: Vec<T>,
    total: i64,
    offset: Option<usize>,
    limit: Option<usize>,
}

impl<T> QueryResults<T> {
    pub fn new(results: Vec<T>, total: i64, offset: Option<usize>, limit: Option<usize>) -> Self {
        Self {
            results,
            total,
            offset,
            limit,
        }
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn into_results(self) -> Vec<T> {
        self.results
    }

    /// Rows matched before OFFSET and LIMIT were applied.
    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

impl<T> IntoIterator for QueryResults<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
