// Resource recommendation: ranks the static catalog against a free-text query
// by TF-IDF cosine similarity.

pub mod catalog;
pub mod handlers;
pub mod tfidf;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub use catalog::{default_catalog, Resource};

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Error, PartialEq)]
pub enum RankError {
    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("top_k must be at least 1")]
    InvalidTopK,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub resource: Resource,
    pub score: f64,
}

/// Ranks a fixed resource catalog against queries. Built once at startup and
/// shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Ranker {
    catalog: Vec<Resource>,
}

impl Ranker {
    pub fn new(catalog: Vec<Resource>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &[Resource] {
        &self.catalog
    }

    /// Returns the `top_k` catalog entries most similar to `query`, best first.
    /// Equal scores keep catalog order.
    ///
    /// If the corpus cannot be vectorized the first `top_k` entries are
    /// returned with score 0.0 instead of an error.
    pub fn recommend(&self, query: &str, top_k: usize) -> Result<Vec<Recommendation>, RankError> {
        if query.trim().is_empty() {
            return Err(RankError::EmptyQuery);
        }
        if top_k == 0 {
            return Err(RankError::InvalidTopK);
        }

        let mut docs: Vec<String> = self.catalog.iter().map(Resource::document).collect();
        docs.push(query.to_string());

        let vectors = match tfidf::fit_transform(&docs) {
            Ok(vectors) => vectors,
            Err(e) => {
                warn!("Vectorization failed for query {query:?}: {e}; using catalog order");
                return Ok(self.unranked(top_k));
            }
        };

        let (query_vector, corpus_vectors) = match vectors.split_last() {
            Some(split) => split,
            None => return Ok(self.unranked(top_k)),
        };

        let scores: Vec<f64> = corpus_vectors
            .iter()
            .map(|v| tfidf::cosine_similarity(query_vector, v))
            .collect();

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // sort_by is stable, so ties stay in catalog order.
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(order
            .into_iter()
            .take(top_k)
            .map(|i| Recommendation {
                resource: self.catalog[i].clone(),
                score: scores[i],
            })
            .collect())
    }

    fn unranked(&self, top_k: usize) -> Vec<Recommendation> {
        self.catalog
            .iter()
            .take(top_k)
            .map(|resource| Recommendation {
                resource: resource.clone(),
                score: 0.0,
            })
            .collect()
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}
