use std::collections::HashMap;

use crate::error::{LoadError, QueryError};
use crate::food_data::FoodRecord;

/// The immutable, ordered set of food records. Load order is kept because the
/// ranking tie-break depends on it.
#[derive(Debug, Default)]
pub struct Corpus {
    foods: Vec<FoodRecord>,
    index_by_fdc_id: HashMap<i64, usize>,
}

impl Corpus {
    pub fn from_records(foods: Vec<FoodRecord>) -> Result<Self, LoadError> {
        let mut index_by_fdc_id = HashMap::with_capacity(foods.len());
        for (position, food) in foods.iter().enumerate() {
            if index_by_fdc_id.insert(food.fdc_id, position).is_some() {
                return Err(LoadError::DuplicateFdcId(food.fdc_id));
            }
        }
        Ok(Self { foods, index_by_fdc_id })
    }

    pub fn lookup(&self, fdc_id: i64) -> Option<&FoodRecord> {
        self.index_by_fdc_id
            .get(&fdc_id)
            .and_then(|&position| self.foods.get(position))
    }

    pub fn foods(&self) -> &[FoodRecord] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

/// Holder for the corpus. The corpus is fixed when the store is built and can
/// only be read, so any number of threads may query it without locking.
#[derive(Debug, Default)]
pub struct CorpusStore {
    corpus: Option<Corpus>,
}

impl CorpusStore {
    /// A store with nothing loaded yet; every query against it is not-ready.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_corpus(corpus: Corpus) -> Self {
        Self { corpus: Some(corpus) }
    }

    pub fn is_ready(&self) -> bool {
        self.corpus().is_ok()
    }

    /// The loaded corpus, or the not-ready fault that prevents serving it.
    pub fn corpus(&self) -> Result<&Corpus, QueryError> {
        match &self.corpus {
            None => Err(QueryError::NotLoaded),
            Some(corpus) if corpus.is_empty() => Err(QueryError::EmptyCorpus),
            Some(corpus) => Ok(corpus),
        }
    }

    pub fn lookup(&self, fdc_id: i64) -> Result<&FoodRecord, QueryError> {
        self.corpus()?
            .lookup(fdc_id)
            .ok_or(QueryError::NotFound(fdc_id))
    }
}
