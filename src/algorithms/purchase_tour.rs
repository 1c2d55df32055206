// Purchase tour state machine and the entry point of the planner

use crate::algorithms::astar::{astar_search, SearchObserver, Silent};
use crate::algorithms::{TourHeuristic, ZeroHeuristic};
use crate::error::Result;
use crate::models::{BestPriceIndex, Cost, Location, PurchasePlan, Requirement, Transition};
use crate::utils::market_graph::MarketGraph;
use std::fmt;
use std::time::Instant;
use tracing::info;

/// Where the shopper is and what is still left to buy
///
/// The requirement is kept in canonical order, so equal states hash equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TourState {
    pub position: Location,
    pub required: Requirement,
}

impl TourState {
    pub fn new(position: Location, required: Requirement) -> Self {
        Self { position, required }
    }

    /// State reached by applying `transition`
    pub fn apply(&self, transition: &Transition) -> TourState {
        match transition {
            Transition::Purchase { item, .. } => TourState {
                position: self.position,
                required: self.required.without(*item),
            },
            Transition::Travel { destination, .. } => TourState {
                position: *destination,
                required: self.required.clone(),
            },
        }
    }
}

impl fmt::Display for TourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {} item(s) left", self.position, self.required.len())
    }
}

/// Read-only inputs shared by every state of one search
#[derive(Debug, Clone, Copy)]
pub struct TourProblem<'a> {
    pub prices: &'a BestPriceIndex,
    pub graph: &'a MarketGraph,
    pub cost_per_second: Cost,
}

impl<'a> TourProblem<'a> {
    pub fn new(prices: &'a BestPriceIndex, graph: &'a MarketGraph, cost_per_second: Cost) -> Self {
        Self {
            prices,
            graph,
            cost_per_second,
        }
    }

    /// Every purchase and move available from `state`, with its cost
    ///
    /// A required entry is bought in one go or not at all: if the best offer
    /// here cannot cover the whole quantity, no purchase is offered for it.
    pub fn neighbors(&self, state: &TourState) -> Vec<(Transition, TourState, Cost)> {
        let mut result = Vec::new();

        for (quantity, item) in state.required.iter() {
            let Some(offer) = self.prices.best_offer(&state.position, item) else {
                continue;
            };
            if !offer.covers(quantity) {
                continue;
            }

            let cost = offer.cost_of(quantity);
            let transition = Transition::Purchase {
                item,
                quantity,
                location: state.position,
                cost,
            };
            let next = state.apply(&transition);
            result.push((transition, next, cost));
        }

        for (destination, seconds) in self.graph.neighbors(state.position) {
            let cost = seconds as Cost * self.cost_per_second;
            let transition = Transition::Travel { destination, cost };
            let next = state.apply(&transition);
            result.push((transition, next, cost));
        }

        result
    }
}

/// Cheapest plan that buys everything in `requirement` and ends at `end`
///
/// Uses the zero heuristic, so the result is optimal. Fails with
/// [`Error::NoRoute`](crate::error::Error::NoRoute) when no plan exists.
pub fn optimize_purchase(
    prices: &BestPriceIndex,
    graph: &MarketGraph,
    requirement: &Requirement,
    start: Location,
    end: Location,
    cost_per_second: Cost,
) -> Result<PurchasePlan> {
    let problem = TourProblem::new(prices, graph, cost_per_second);
    optimize_purchase_with(&problem, requirement, start, end, &ZeroHeuristic, &mut Silent)
}

/// Like [`optimize_purchase`], with an explicit heuristic and progress observer
pub fn optimize_purchase_with<H, O>(
    problem: &TourProblem<'_>,
    requirement: &Requirement,
    start: Location,
    end: Location,
    heuristic: &H,
    observer: &mut O,
) -> Result<PurchasePlan>
where
    H: TourHeuristic + ?Sized,
    O: SearchObserver<TourState> + ?Sized,
{
    let started = Instant::now();
    let initial = TourState::new(start, requirement.clone());
    let goal = TourState::new(end, Requirement::empty());

    info!(
        start = %start,
        end = %end,
        items = requirement.len(),
        markets = problem.graph.node_count(),
        "planning purchase tour"
    );

    let (total_cost, transitions) = astar_search(
        initial,
        &goal,
        |state| problem.neighbors(state),
        |state, goal| heuristic.estimate(state, goal),
        observer,
    )?;

    info!(
        total_cost,
        steps = transitions.len(),
        elapsed = ?started.elapsed(),
        "purchase tour planned"
    );

    Ok(PurchasePlan::new(total_cost, transitions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::astar::LogProgress;
    use crate::models::Offer;
    use std::time::Duration;
    use tracing_test::traced_test;

    fn create_test_problem() -> (BestPriceIndex, MarketGraph) {
        let here = Location::new(1, 100);
        let there = Location::new(2, 200);

        let prices = BestPriceIndex::from_offers(vec![
            Offer::new(34, here, 5.0, 10),
            Offer::new(35, here, 2.0, 3),
            Offer::new(35, there, 3.0, 50),
        ]);

        let mut graph = MarketGraph::new();
        graph.connect(here, there, 60);

        (prices, graph)
    }

    #[test]
    fn test_neighbors() {
        let (prices, graph) = create_test_problem();
        let problem = TourProblem::new(&prices, &graph, 2.0);
        let here = Location::new(1, 100);
        let there = Location::new(2, 200);

        let state = TourState::new(here, Requirement::new(vec![(10, 34), (5, 35)]).unwrap());
        let neighbors = problem.neighbors(&state);

        // Item 35 needs 5 but only 3 are on offer here
        assert_eq!(neighbors.len(), 2);

        let (purchase, after_purchase, cost) = &neighbors[0];
        assert_eq!(*cost, 50.0);
        assert!(purchase.is_purchase());
        assert_eq!(after_purchase.position, here);
        assert_eq!(after_purchase.required, Requirement::new(vec![(5, 35)]).unwrap());

        let (travel, after_travel, cost) = &neighbors[1];
        assert_eq!(*cost, 120.0);
        assert_eq!(
            *travel,
            Transition::Travel {
                destination: there,
                cost: 120.0
            }
        );
        assert_eq!(after_travel.position, there);
        assert_eq!(after_travel.required, state.required);
    }

    #[test]
    fn test_optimize_purchase_round_trip() {
        let (prices, graph) = create_test_problem();
        let here = Location::new(1, 100);
        let requirement = Requirement::new(vec![(10, 34), (5, 35)]).unwrap();

        let plan = optimize_purchase(&prices, &graph, &requirement, here, here, 0.1).unwrap();

        // 10 * 5 + 5 * 3 + 2 * 60 * 0.1
        assert!((plan.total_cost - 77.0).abs() < 1e-9);
        assert_eq!(plan.purchases().count(), 2);
        assert_eq!(plan.travel_count(), 2);
    }

    #[test]
    fn test_state_equality_is_canonical() {
        let here = Location::new(1, 100);
        let a = TourState::new(here, Requirement::new(vec![(1, 2), (3, 4)]).unwrap());
        let b = TourState::new(here, Requirement::new(vec![(3, 4), (1, 2)]).unwrap());

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "1:100 with 2 item(s) left");
    }

    #[test]
    #[traced_test]
    fn test_progress_is_logged() {
        let (prices, graph) = create_test_problem();
        let problem = TourProblem::new(&prices, &graph, 1.0);
        let here = Location::new(1, 100);
        let requirement = Requirement::new(vec![(5, 35)]).unwrap();

        let plan = optimize_purchase_with(
            &problem,
            &requirement,
            here,
            here,
            &ZeroHeuristic,
            &mut LogProgress {
                interval: Duration::ZERO,
            },
        )
        .unwrap();

        // Only the far market stocks enough, so it is a round trip
        assert_eq!(plan.total_cost, 15.0 + 2.0 * 60.0);
        assert!(logs_contain("search in progress"));
        assert!(logs_contain("purchase tour planned"));
    }
}
