use rayon::prelude::*;
use tracing::debug;

use crate::food_data::FoodRecord;
use crate::search::corpus::Corpus;
use crate::search::scorer::{relevance_score, NormalizedQuery};

pub const DEFAULT_SEARCH_LIMIT: usize = 3;
pub const MAX_SEARCH_LIMIT: usize = 10;

/// A candidate and its score, alive only for the duration of one search.
#[derive(Debug, Clone, Copy)]
pub struct ScoredFood<'a> {
    pub food: &'a FoodRecord,
    pub score: f64,
}

/// Non-positive limits fall back to the default; large ones are capped.
pub fn clamp_limit(limit: i64) -> usize {
    if limit <= 0 {
        DEFAULT_SEARCH_LIMIT
    } else {
        usize::try_from(limit).map_or(MAX_SEARCH_LIMIT, |l| l.min(MAX_SEARCH_LIMIT))
    }
}

/// Scores every food in the corpus and returns the positive hits, best first.
/// Equal scores keep corpus order.
pub fn rank_foods<'a>(corpus: &'a Corpus, query: &NormalizedQuery) -> Vec<ScoredFood<'a>> {
    // Indexed parallel collect keeps corpus order, which the stable sort below relies on.
    let mut results: Vec<ScoredFood<'a>> = corpus
        .foods()
        .par_iter()
        .filter_map(|food| {
            let score = relevance_score(&food.description, query);
            (score > 0.0).then_some(ScoredFood { food, score })
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}

/// Top `limit` foods (after clamping) for a free-text query.
pub fn search_by_name<'a>(corpus: &'a Corpus, query: &str, limit: i64) -> Vec<&'a FoodRecord> {
    let limit = clamp_limit(limit);
    let normalized_query = NormalizedQuery::new(query);

    debug!(query, limit, total_foods = corpus.len(), "Searching Foundation Foods");

    let ranked = rank_foods(corpus, &normalized_query);
    let foods: Vec<&FoodRecord> = ranked
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, result)| {
            debug!(
                rank = i + 1,
                score = result.score,
                description = %result.food.description,
                "Search result"
            );
            result.food
        })
        .collect();

    debug!(
        query,
        results_found = ranked.len(),
        results_returned = foods.len(),
        "Search complete"
    );
    foods
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dairy_corpus() -> Corpus {
        Corpus::from_records(vec![
            FoodRecord::new(1, "Milk, whole, 3.25% milkfat"),
            FoodRecord::new(2, "Cheese, cottage, lowfat, 2% milkfat"),
            FoodRecord::new(3, "Eggs, whole, raw, fresh"),
            FoodRecord::new(4, "Bread, white, commercially prepared"),
        ])
        .unwrap()
    }

    fn descriptions(foods: &[&FoodRecord]) -> Vec<String> {
        foods.iter().map(|f| f.description.clone()).collect()
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 3);
        assert_eq!(clamp_limit(-4), 3);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(55), 10);
        assert_eq!(clamp_limit(i64::MAX), 10);
    }

    #[test]
    fn test_milk_prefers_milk_entry() {
        let corpus = dairy_corpus();
        let results = search_by_name(&corpus, "milk", 3);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].description, "Milk, whole, 3.25% milkfat");
        assert_eq!(results[1].description, "Cheese, cottage, lowfat, 2% milkfat");
    }

    #[test]
    fn test_partial_match_and_case_insensitivity() {
        let corpus = dairy_corpus();
        assert_eq!(descriptions(&search_by_name(&corpus, "egg", 3)), vec!["Eggs, whole, raw, fresh"]);
        assert_eq!(search_by_name(&corpus, "MILK", 3)[0].fdc_id, 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        let corpus = dairy_corpus();
        assert!(search_by_name(&corpus, "xyz123nonexistent", 3).is_empty());
        assert!(search_by_name(&corpus, "   ", 3).is_empty());
    }

    #[test]
    fn test_limit_is_respected() {
        let corpus = dairy_corpus();
        // "whole" appears in two descriptions
        assert_eq!(search_by_name(&corpus, "whole", 1).len(), 1);
        assert_eq!(search_by_name(&corpus, "whole", 0).len(), 2);
    }

    #[test]
    fn test_equal_scores_keep_corpus_order() {
        let records: Vec<FoodRecord> = (0..40)
            .map(|i| FoodRecord::new(i, "Apples, raw, with skin"))
            .collect();
        let corpus = Corpus::from_records(records).unwrap();

        let ranked = rank_foods(&corpus, &NormalizedQuery::new("apples"));
        assert_eq!(ranked.len(), 40);
        let ids: Vec<i64> = ranked.iter().map(|r| r.food.fdc_id).collect();
        assert_eq!(ids, (0..40).collect::<Vec<i64>>());

        let top = search_by_name(&corpus, "apples", 55);
        let top_ids: Vec<i64> = top.iter().map(|f| f.fdc_id).collect();
        assert_eq!(top_ids, (0..10).collect::<Vec<i64>>());
    }

    #[test]
    fn test_repeated_searches_are_identical() {
        let corpus = Corpus::from_records(vec![
            FoodRecord::new(10, "Beans, snap, green, raw"),
            FoodRecord::new(11, "Beans, kidney, red, mature seeds, raw"),
            FoodRecord::new(12, "Beans, black, mature seeds, raw"),
            FoodRecord::new(13, "Beans, pinto, mature seeds, raw"),
        ])
        .unwrap();
        let first: Vec<i64> = search_by_name(&corpus, "beans raw", 10).iter().map(|f| f.fdc_id).collect();
        for _ in 0..20 {
            let again: Vec<i64> = search_by_name(&corpus, "beans raw", 10).iter().map(|f| f.fdc_id).collect();
            assert_eq!(first, again);
        }
        // All four score the same, so load order decides.
        assert_eq!(first, vec![10, 11, 12, 13]);
    }
}
