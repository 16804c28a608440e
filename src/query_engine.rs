use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{LoadError, QueryError};
use crate::food_data::FoodRecord;
use crate::nutrient_projector::{NutrientProjector, SimplifiedNutrientResponse};
use crate::search::corpus::{Corpus, CorpusStore};
use crate::search::data_loader::load_foundation_foods;
use crate::search::engine::search_by_name;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchFoodsResponse {
    pub found: bool,
    pub count: usize,
    pub items: Vec<FoodRecord>,
}

impl SearchFoodsResponse {
    pub fn from_items(items: Vec<FoodRecord>) -> Self {
        Self {
            found: !items.is_empty(),
            count: items.len(),
            items,
        }
    }
}

/// Everything a front end (CLI, RPC handler, ...) needs from the food engine.
/// Implementations must be safe to share across threads; test doubles can
/// stand in for the real corpus-backed engine.
pub trait QueryEngine: Send + Sync {
    /// Ranked free-text search returning full records. `limit` is clamped to 1..=10, defaulting to 3.
    fn search_by_name(&self, query: &str, limit: i64) -> Result<SearchFoodsResponse, QueryError>;

    /// Same search, projected to simplified nutrients. `None` for the filter uses the default nutrient list.
    fn search_by_name_simplified(
        &self,
        query: &str,
        limit: i64,
        nutrient_filter: Option<&[String]>,
    ) -> Result<SimplifiedNutrientResponse, QueryError>;

    fn lookup(&self, fdc_id: i64) -> Result<FoodRecord, QueryError>;

    fn health_check(&self) -> Result<(), QueryError>;
}

/// The corpus-backed engine.
#[derive(Debug)]
pub struct FoundationFoodsEngine {
    store: CorpusStore,
    projector: NutrientProjector,
}

impl FoundationFoodsEngine {
    pub fn new(store: CorpusStore, projector: NutrientProjector) -> Self {
        Self { store, projector }
    }

    pub fn from_corpus(corpus: Corpus, projector: NutrientProjector) -> Self {
        Self::new(CorpusStore::with_corpus(corpus), projector)
    }

    pub fn load(json_path: &Path, projector: NutrientProjector) -> Result<Self, LoadError> {
        let corpus = load_foundation_foods(json_path)?;
        Ok(Self::from_corpus(corpus, projector))
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }
}

impl QueryEngine for FoundationFoodsEngine {
    fn search_by_name(&self, query: &str, limit: i64) -> Result<SearchFoodsResponse, QueryError> {
        let corpus = self.store.corpus()?;
        let items = search_by_name(corpus, query, limit).into_iter().cloned().collect();
        Ok(SearchFoodsResponse::from_items(items))
    }

    fn search_by_name_simplified(
        &self,
        query: &str,
        limit: i64,
        nutrient_filter: Option<&[String]>,
    ) -> Result<SimplifiedNutrientResponse, QueryError> {
        let corpus = self.store.corpus()?;
        let foods = search_by_name(corpus, query, limit);
        debug!(
            query,
            matched = foods.len(),
            default_nutrients = nutrient_filter.is_none(),
            "Projecting simplified nutrients"
        );
        Ok(self.projector.project(foods, nutrient_filter))
    }

    fn lookup(&self, fdc_id: i64) -> Result<FoodRecord, QueryError> {
        self.store.lookup(fdc_id).cloned()
    }

    fn health_check(&self) -> Result<(), QueryError> {
        self.store.corpus().map(|_| ())
    }
}
