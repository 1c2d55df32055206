// Generic best-first (A*) search over an implicit state graph

use crate::error::{Error, Result};
use crate::models::Cost;
use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How often progress is reported by default
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Snapshot of a running search handed to a [`SearchObserver`]
#[derive(Debug)]
pub struct SearchProgress<'a, S> {
    /// Cost to reach the state being expanded
    pub best_cost: Cost,
    pub current: &'a S,
    pub frontier_len: usize,
    pub expanded: usize,
    pub elapsed: Duration,
}

/// Receives periodic progress reports; purely observational
pub trait SearchObserver<S> {
    /// Minimum time between two reports
    fn interval(&self) -> Duration {
        DEFAULT_PROGRESS_INTERVAL
    }

    fn on_progress(&mut self, progress: &SearchProgress<'_, S>);
}

/// Observer that ignores all reports
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl<S> SearchObserver<S> for Silent {
    fn interval(&self) -> Duration {
        Duration::MAX
    }

    fn on_progress(&mut self, _progress: &SearchProgress<'_, S>) {}
}

/// Observer that logs each report at info level
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    pub interval: Duration,
}

impl Default for LogProgress {
    fn default() -> Self {
        Self {
            interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl<S: Debug> SearchObserver<S> for LogProgress {
    fn interval(&self) -> Duration {
        self.interval
    }

    fn on_progress(&mut self, progress: &SearchProgress<'_, S>) {
        info!(
            best_cost = progress.best_cost,
            frontier = progress.frontier_len,
            expanded = progress.expanded,
            elapsed = ?progress.elapsed,
            current = ?progress.current,
            "search in progress"
        );
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub frontier_peak: usize,
}

// Min-priority on top of the max-first priority queue
type Priority = Reverse<OrderedFloat<Cost>>;

fn priority(cost: Cost) -> Priority {
    Reverse(OrderedFloat(cost))
}

/// Find the cheapest sequence of transitions from `initial` to `goal`
///
/// `neighbors` yields `(transition, next_state, cost)` for a state and
/// `heuristic` estimates the remaining cost from a state to the goal. Costs
/// must be non-negative. The goal is recognised by state equality.
///
/// A state that is already waiting in the frontier has its priority raised in
/// place when a cheaper way to it is found, so each state sits in the
/// frontier at most once.
///
/// Returns the total cost and the transitions in order, or [`Error::NoRoute`]
/// once the frontier is exhausted. Ties between equal-cost paths are broken
/// arbitrarily.
pub fn astar_search<S, T, N, I, H, O>(
    initial: S,
    goal: &S,
    mut neighbors: N,
    mut heuristic: H,
    observer: &mut O,
) -> Result<(Cost, Vec<T>)>
where
    S: Eq + Hash + Clone,
    N: FnMut(&S) -> I,
    I: IntoIterator<Item = (T, S, Cost)>,
    H: FnMut(&S, &S) -> Cost,
    O: SearchObserver<S> + ?Sized,
{
    let started = Instant::now();
    let mut last_report = started;
    let mut stats = SearchStats::default();

    let mut best_known_cost: HashMap<S, Cost> = HashMap::new();
    let mut predecessor: HashMap<S, S> = HashMap::new();
    let mut transition_label: HashMap<S, T> = HashMap::new();
    let mut frontier: PriorityQueue<S, Priority> = PriorityQueue::new();

    best_known_cost.insert(initial.clone(), 0.0);
    frontier.push(initial.clone(), priority(heuristic(&initial, goal)));

    while let Some((current, _)) = frontier.pop() {
        let current_cost = best_known_cost[&current];

        if current == *goal {
            debug!(
                cost = current_cost,
                expanded = stats.expanded,
                frontier_peak = stats.frontier_peak,
                elapsed = ?started.elapsed(),
                "search reached goal"
            );
            let path = reconstruct_path(&initial, current, predecessor, transition_label);
            return Ok((current_cost, path));
        }

        stats.expanded += 1;
        if last_report.elapsed() >= observer.interval() {
            observer.on_progress(&SearchProgress {
                best_cost: current_cost,
                current: &current,
                frontier_len: frontier.len(),
                expanded: stats.expanded,
                elapsed: started.elapsed(),
            });
            last_report = Instant::now();
        }

        for (transition, next, edge_cost) in neighbors(&current) {
            let candidate = current_cost + edge_cost;
            let improves = best_known_cost
                .get(&next)
                .map_or(true, |&known| candidate < known);

            if improves {
                best_known_cost.insert(next.clone(), candidate);
                predecessor.insert(next.clone(), current.clone());
                let estimate = candidate + heuristic(&next, goal);
                transition_label.insert(next.clone(), transition);
                frontier.push_increase(next, priority(estimate));
            }
        }

        stats.frontier_peak = stats.frontier_peak.max(frontier.len());
    }

    debug!(
        expanded = stats.expanded,
        frontier_peak = stats.frontier_peak,
        elapsed = ?started.elapsed(),
        "search exhausted frontier"
    );
    Err(Error::NoRoute)
}

// Walk predecessors back to the start, then flip
fn reconstruct_path<S, T>(
    initial: &S,
    goal: S,
    mut predecessor: HashMap<S, S>,
    mut transition_label: HashMap<S, T>,
) -> Vec<T>
where
    S: Eq + Hash,
{
    let mut path = Vec::new();
    let mut state = goal;

    while state != *initial {
        let (Some(previous), Some(transition)) =
            (predecessor.remove(&state), transition_label.remove(&state))
        else {
            break;
        };
        path.push(transition);
        state = previous;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    // Directed weighted graph over small integers; transitions are the
    // destination node
    fn edges() -> HashMap<u32, Vec<(u32, Cost)>> {
        let mut edges = HashMap::new();
        edges.insert(1, vec![(2, 7.0), (3, 9.0), (6, 14.0)]);
        edges.insert(2, vec![(1, 7.0), (3, 10.0), (4, 15.0)]);
        edges.insert(3, vec![(1, 9.0), (2, 10.0), (4, 11.0), (6, 2.0)]);
        edges.insert(4, vec![(2, 15.0), (3, 11.0), (5, 6.0)]);
        edges.insert(5, vec![(4, 6.0), (6, 9.0)]);
        edges.insert(6, vec![(1, 14.0), (3, 2.0), (5, 9.0)]);
        edges.insert(7, vec![]);
        edges
    }

    fn search(from: u32, to: u32) -> Result<(Cost, Vec<u32>)> {
        let edges = edges();
        astar_search(
            from,
            &to,
            |state: &u32| {
                edges[state]
                    .iter()
                    .map(|&(next, cost)| (next, next, cost))
                    .collect::<Vec<_>>()
            },
            |_, _| 0.0,
            &mut Silent,
        )
    }

    #[test]
    fn test_finds_cheapest_path() {
        let (cost, path) = search(1, 5).unwrap();

        assert_eq!(cost, 20.0);
        assert_eq!(path, vec![3, 6, 5]);
    }

    #[test]
    fn test_initial_is_goal() {
        let (cost, path) = search(4, 4).unwrap();

        assert_eq!(cost, 0.0);
        assert!(path.is_empty());
    }

    #[test]
    fn test_unreachable_goal() {
        assert!(matches!(search(1, 7), Err(Error::NoRoute)));
        assert!(matches!(search(7, 1), Err(Error::NoRoute)));
    }

    #[test]
    fn test_heuristic_guides_search() {
        // Exact remaining cost is a perfect heuristic: only the optimal path
        // gets expanded
        let edges = edges();
        let exact: HashMap<u32, Cost> =
            [(1, 20.0), (2, 21.0), (3, 11.0), (4, 6.0), (5, 0.0), (6, 9.0)]
                .into_iter()
                .collect();
        let mut expanded = 0;

        let (cost, path) = astar_search(
            1u32,
            &5,
            |state: &u32| {
                expanded += 1;
                edges[state]
                    .iter()
                    .map(|&(next, cost)| (next, next, cost))
                    .collect::<Vec<_>>()
            },
            |state, _| exact.get(state).copied().unwrap_or(Cost::INFINITY),
            &mut Silent,
        )
        .unwrap();

        assert_eq!(cost, 20.0);
        assert_eq!(path, vec![3, 6, 5]);
        assert_eq!(expanded, 3);
    }

    struct Recorder {
        reports: Vec<(Cost, usize)>,
    }

    impl SearchObserver<u32> for Recorder {
        fn interval(&self) -> Duration {
            Duration::ZERO
        }

        fn on_progress(&mut self, progress: &SearchProgress<'_, u32>) {
            self.reports.push((progress.best_cost, progress.expanded));
        }
    }

    #[test]
    fn test_observer_receives_progress() {
        let edges = edges();
        let mut recorder = Recorder { reports: vec![] };

        astar_search(
            1u32,
            &5,
            |state: &u32| {
                edges[state]
                    .iter()
                    .map(|&(next, cost)| (next, next, cost))
                    .collect::<Vec<_>>()
            },
            |_, _| 0.0,
            &mut recorder,
        )
        .unwrap();

        assert!(!recorder.reports.is_empty());
        assert_eq!(recorder.reports[0], (0.0, 1));
        // Best-first: costs never go down
        assert!(recorder.reports.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
