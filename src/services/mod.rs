pub mod catalog;
pub mod normalizer;
pub mod recommendations;

pub use catalog::{load_catalog, CardSource};
pub use normalizer::normalize;
pub use recommendations::{recommend, EngineSettings, RecommendationEngine, UserContext};
