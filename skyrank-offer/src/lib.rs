pub mod models;
pub mod features;
pub mod ranker;
pub mod badges;
pub mod sort;

pub use models::{Badge, FlightScores, ScoredFlight, SubScores};
pub use features::FlightMetadata;
pub use ranker::{score_flights, CandidateSet, RankingError};
pub use sort::{rank_flights, sort_scored_flights, SortOption};
