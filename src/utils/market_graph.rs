// Compact weighted graph over the locations that matter for one search

use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::{AreaId, Location, Seconds};
use crate::utils::route_cache::RouteCache;
use crate::utils::travel_network::TravelNetwork;
use itertools::Itertools;
use petgraph::algo::dijkstra;
use petgraph::graphmap::UnGraphMap;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Undirected graph over relevant locations, weighted by travel seconds
///
/// Built fresh for every search since the relevant set depends on what is
/// being bought.
#[derive(Debug, Clone, Default)]
pub struct MarketGraph {
    graph: UnGraphMap<Location, Seconds>,
}

impl MarketGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_location(&mut self, location: Location) {
        self.graph.add_node(location);
    }

    /// Connect two locations, keeping the lower weight if already connected
    pub fn connect(&mut self, a: Location, b: Location, seconds: Seconds) {
        if a == b {
            return;
        }
        match self.graph.edge_weight(a, b) {
            Some(&existing) if existing <= seconds => {}
            _ => {
                self.graph.add_edge(a, b, seconds);
            }
        }
    }

    /// Neighbouring locations with the seconds it takes to reach them
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item = (Location, Seconds)> + '_ {
        self.graph
            .edges(location)
            .map(|(_, neighbor, seconds)| (neighbor, *seconds))
    }

    pub fn edge_weight(&self, a: Location, b: Location) -> Option<Seconds> {
        self.graph.edge_weight(a, b).copied()
    }

    pub fn contains(&self, location: Location) -> bool {
        self.graph.contains_node(location)
    }

    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.graph.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Travel seconds from `from` to every location reachable from it
    pub fn travel_seconds_from(&self, from: Location) -> HashMap<Location, Seconds> {
        dijkstra(&self.graph, from, None, |(_, _, seconds)| *seconds)
    }

    /// Seconds of the quickest route between two locations
    pub fn shortest_travel_seconds(&self, from: Location, to: Location) -> Option<Seconds> {
        if from == to {
            return Some(0);
        }
        dijkstra(&self.graph, from, Some(to), |(_, _, seconds)| *seconds)
            .get(&to)
            .copied()
    }
}

/// Build the market graph with a route cache scoped to this call
pub fn build_market_graph<I>(
    network: &TravelNetwork,
    relevant_locations: I,
    config: &SearchConfig,
) -> Result<MarketGraph>
where
    I: IntoIterator<Item = Location>,
{
    let mut cache = RouteCache::new();
    build_market_graph_with_cache(network, relevant_locations, config, &mut cache)
}

/// Build the market graph over exactly `relevant_locations`
///
/// Routes for every pair of relevant areas are resolved up front, in
/// parallel, through `cache`. Locations in one area are `in_area_seconds`
/// apart. For areas further apart the cached shortest path is walked; every
/// relevant area it passes through starts a new edge, so one path can yield
/// several edges. Each area-pair edge connects every location of one area to
/// every location of the other.
pub fn build_market_graph_with_cache<I>(
    network: &TravelNetwork,
    relevant_locations: I,
    config: &SearchConfig,
    cache: &mut RouteCache,
) -> Result<MarketGraph>
where
    I: IntoIterator<Item = Location>,
{
    let locations: BTreeSet<Location> = relevant_locations.into_iter().collect();

    let mut by_area: BTreeMap<AreaId, Vec<Location>> = BTreeMap::new();
    for location in &locations {
        by_area.entry(location.area).or_default().push(*location);
    }

    let mut graph = MarketGraph::new();
    for location in &locations {
        graph.add_location(*location);
    }

    // In-area travel is a flat cost
    for markets in by_area.values() {
        for (a, b) in markets.iter().tuple_combinations() {
            graph.connect(*a, *b, config.in_area_seconds);
        }
    }

    let area_pairs: Vec<(AreaId, AreaId)> = by_area.keys().copied().tuple_combinations().collect();
    cache.warm(network, area_pairs.iter().copied())?;

    for &(from, to) in &area_pairs {
        let path = cache.shortest_path(network, from, to)?;

        // Every relevant area on the path closes the current leg
        let mut leg_start = from;
        let mut hops: Seconds = 0;
        for &area in path.iter().skip(1) {
            hops += 1;
            if let Some(right_markets) = by_area.get(&area) {
                let seconds = hops * config.jump_seconds;
                for left in &by_area[&leg_start] {
                    for right in right_markets {
                        graph.connect(*left, *right, seconds);
                    }
                }
                leg_start = area;
                hops = 0;
            }
        }
    }

    debug!(
        locations = graph.node_count(),
        areas = by_area.len(),
        edges = graph.edge_count(),
        cached_routes = cache.len(),
        "built market graph"
    );

    Ok(graph)
}
