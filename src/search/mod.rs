pub mod corpus;
pub mod data_loader;
pub mod engine;
pub mod scorer;

pub use corpus::{Corpus, CorpusStore};
pub use data_loader::{load_foundation_foods, parse_foundation_foods};
pub use engine::{clamp_limit, rank_foods, search_by_name, ScoredFood, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
pub use scorer::{normalize_string, relevance_score, NormalizedQuery};
