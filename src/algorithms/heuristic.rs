use crate::algorithms::purchase_tour::TourState;
use crate::algorithms::TourHeuristic;
use crate::models::{BestPriceIndex, Cost, ItemId, Location, Requirement, Seconds};
use crate::utils::market_graph::MarketGraph;
use std::collections::HashMap;

/// Always estimates zero, turning the search into plain best-first search
///
/// Admissible, so the plan found is always the cheapest one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl TourHeuristic for ZeroHeuristic {
    fn estimate(&self, _state: &TourState, _goal: &TourState) -> Cost {
        0.0
    }
}

/// Cheapest known price of every remaining item plus the travel cost of the
/// quickest route to the goal
///
/// Not proven admissible and in practice no faster than [`ZeroHeuristic`];
/// opt-in only. Only valid for searches ending at the location it was built
/// for.
#[derive(Debug, Clone)]
pub struct PriceDistanceHeuristic {
    cheapest: HashMap<ItemId, Cost>,
    goal: Location,
    seconds_to_goal: HashMap<Location, Seconds>,
    cost_per_second: Cost,
}

impl PriceDistanceHeuristic {
    /// Precompute cheapest prices for `requirement` and distances to `goal`
    pub fn new(
        prices: &BestPriceIndex,
        graph: &MarketGraph,
        requirement: &Requirement,
        goal: Location,
        cost_per_second: Cost,
    ) -> Self {
        let cheapest = requirement
            .item_ids()
            .filter_map(|item| prices.cheapest_price(item).map(|price| (item, price)))
            .collect();

        Self {
            cheapest,
            goal,
            // Undirected, so distances from the goal are distances to it
            seconds_to_goal: graph.travel_seconds_from(goal),
            cost_per_second,
        }
    }
}

impl TourHeuristic for PriceDistanceHeuristic {
    fn estimate(&self, state: &TourState, goal: &TourState) -> Cost {
        let purchases: Cost = state
            .required
            .iter()
            .map(|(quantity, item)| match self.cheapest.get(&item) {
                Some(price) => quantity as Cost * price,
                None => Cost::INFINITY,
            })
            .sum();

        // Distances were precomputed for one goal only
        debug_assert_eq!(goal.position, self.goal);

        let travel = if state.position == goal.position {
            0.0
        } else {
            match self.seconds_to_goal.get(&state.position) {
                Some(seconds) => *seconds as Cost * self.cost_per_second,
                None => Cost::INFINITY,
            }
        };

        purchases + travel
    }
}
