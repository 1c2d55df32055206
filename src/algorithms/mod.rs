pub mod astar;
pub mod heuristic;
pub mod purchase_tour;

// Common algorithm traits
use crate::algorithms::purchase_tour::TourState;
use crate::models::Cost;

/// Estimate of the cost still needed to get from a state to the goal
///
/// A* only guarantees the cheapest plan when the estimate never exceeds the
/// true remaining cost.
pub trait TourHeuristic {
    fn estimate(&self, state: &TourState, goal: &TourState) -> Cost;
}

pub use heuristic::{PriceDistanceHeuristic, ZeroHeuristic};
