pub mod engine;
pub mod model;
pub mod search;

pub use engine::{IndexView, QueryEngine};
pub use model::IndexStats;
pub use search::{PrefixSearch, SearchHit};
