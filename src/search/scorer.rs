//! Heuristic relevance scoring of a food description against a search query.
//!
//! Scores are additive across exact/prefix/substring and per-word signals, then
//! scaled by a multi-word boost, a long-description penalty and a handful of
//! food-specific adjustments. A score of zero means "not a match".

const EXACT_MATCH_SCORE: f64 = 1000.0;
const PREFIX_MATCH_SCORE: f64 = 500.0;
const SUBSTRING_MATCH_SCORE: f64 = 100.0;

const WORD_EXACT_SCORE: f64 = 50.0;
const WORD_EXACT_POSITION_STEP: f64 = 10.0;
const WORD_PREFIX_SCORE: f64 = 25.0;
const WORD_PREFIX_POSITION_STEP: f64 = 5.0;
const WORD_PREFIX_MIN_LEN: usize = 3;
const WORD_SUBSTRING_SCORE: f64 = 10.0;
const WORD_SUBSTRING_MIN_LEN: usize = 4;
// Only the first few description words earn a positional bonus.
const POSITION_BONUS_WORDS: usize = 3;

const LONG_DESCRIPTION_WORDS: usize = 10;
const LONG_DESCRIPTION_PENALTY: f64 = 0.8;

const SIMPLE_NAME_MAX_WORDS: usize = 3;
const SIMPLE_NAME_BOOST: f64 = 1.5;
const BRANDED_MAX_PLAIN_WORDS: usize = 6;
const BRANDED_PENALTY: f64 = 0.7;
const BRAND_INDICATORS: [&str; 6] = ["brand", "store", "composite", "mixed", "frozen", "canned"];

/// Lower-cases, trims and strips `,` `.` `(` `)` so that punctuation in USDA
/// descriptions ("Milk, whole") doesn't get in the way of matching.
pub fn normalize_string(s: &str) -> String {
    s.to_lowercase()
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '(' | ')'))
        .collect()
}

/// A query normalized once per search and reused for every candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuery {
    pub text: String,
    pub words: Vec<String>,
}

impl NormalizedQuery {
    pub fn new(raw_query: &str) -> Self {
        let text = normalize_string(raw_query);
        let words = text.split_whitespace().map(str::to_string).collect();
        Self { text, words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Best score a single query word earns against any description word.
fn best_word_score(query_word: &str, desc_words: &[&str]) -> f64 {
    let mut best = 0.0_f64;
    for (index, desc_word) in desc_words.iter().enumerate() {
        let position_slots = POSITION_BONUS_WORDS.saturating_sub(index) as f64;
        let word_score = if *desc_word == query_word {
            WORD_EXACT_SCORE + position_slots * WORD_EXACT_POSITION_STEP
        } else if desc_word.starts_with(query_word) && query_word.len() >= WORD_PREFIX_MIN_LEN {
            WORD_PREFIX_SCORE + position_slots * WORD_PREFIX_POSITION_STEP
        } else if desc_word.contains(query_word) && query_word.len() >= WORD_SUBSTRING_MIN_LEN {
            WORD_SUBSTRING_SCORE
        } else {
            0.0
        };
        best = best.max(word_score);
    }
    best
}

/// Relevance of `description` to `query`. Pure and deterministic; returns 0.0
/// when either side has no words or no query word matches any description word.
pub fn relevance_score(description: &str, query: &NormalizedQuery) -> f64 {
    let normalized_desc = normalize_string(description);
    let desc_words: Vec<&str> = normalized_desc.split_whitespace().collect();

    if query.words.is_empty() || desc_words.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    if normalized_desc == query.text {
        score += EXACT_MATCH_SCORE;
    }
    if normalized_desc.starts_with(&query.text) {
        score += PREFIX_MATCH_SCORE;
    }
    if normalized_desc.contains(&query.text) {
        score += SUBSTRING_MATCH_SCORE;
    }

    let mut matched_words = 0usize;
    for query_word in &query.words {
        let word_score = best_word_score(query_word, &desc_words);
        if word_score > 0.0 {
            matched_words += 1;
            score += word_score;
        }
    }

    // No shared words means no match, whatever the raw substring checks said.
    if matched_words == 0 {
        return 0.0;
    }

    let total_query_words = query.words.len();
    if total_query_words > 1 {
        score *= 1.0 + matched_words as f64 / total_query_words as f64;
    }

    if desc_words.len() > LONG_DESCRIPTION_WORDS && matched_words < total_query_words {
        score *= LONG_DESCRIPTION_PENALTY;
    }

    adjust_score_for_food_context(&normalized_desc, &desc_words, &query.words, score)
}

/// Food-specific nudges: prefer "Milk, whole" over "... 2% milkfat", plain names
/// over long branded ones, and so on.
fn adjust_score_for_food_context(
    normalized_desc: &str,
    desc_words: &[&str],
    query_words: &[String],
    mut score: f64,
) -> f64 {
    let single_word_query = query_words.len() == 1;

    if single_word_query
        && desc_words.len() <= SIMPLE_NAME_MAX_WORDS
        && desc_words[0].contains(query_words[0].as_str())
    {
        score *= SIMPLE_NAME_BOOST;
    }

    for query_word in query_words {
        match query_word.as_str() {
            "milk" => {
                if normalized_desc.starts_with("milk") {
                    score *= 2.0;
                } else if normalized_desc.contains("milkfat") || normalized_desc.contains("milk fat") {
                    score *= 0.3;
                }
            }
            "cheese" => {
                if normalized_desc.starts_with("cheese") {
                    score *= 1.5;
                }
            }
            "chicken" | "beef" | "pork" => {
                if normalized_desc.starts_with(query_word.as_str()) {
                    score *= 1.3;
                }
            }
            "bread" => {
                if normalized_desc.contains("bread") {
                    score *= 1.2;
                }
            }
            _ => {}
        }
    }

    if single_word_query
        && desc_words.len() > BRANDED_MAX_PLAIN_WORDS
        && BRAND_INDICATORS.iter().any(|indicator| normalized_desc.contains(indicator))
    {
        score *= BRANDED_PENALTY;
    }

    score
}
