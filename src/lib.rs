pub mod cli;
pub mod config;
pub mod error;
pub mod food_data;
pub mod logging;
pub mod nutrient_projector;
pub mod query_engine;
pub mod search;

pub use error::{LoadError, QueryError};
pub use query_engine::{FoundationFoodsEngine, QueryEngine, SearchFoodsResponse};
