//! Search service - whitelist validation and query normalization

use crate::{
    db::{PostgresQuestionStore, QuestionStore},
    models::{Question, SearchQuery, SearchRequest},
    Result,
};

pub struct SearchService {
    store: PostgresQuestionStore,
}

impl SearchService {
    pub fn new(store: PostgresQuestionStore) -> Self {
        Self { store }
    }

    /// Validate the requested field against the whitelist, normalize sort
    /// direction and limit, then run the parameterized substring query.
    /// An empty result set is an empty list, not an error.
    pub async fn search(&self, request: SearchRequest) -> Result<Vec<Question>> {
        let query = SearchQuery::from_request(request)?;
        self.store.search(&query).await
    }
}
