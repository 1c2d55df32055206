use crate::models::AreaId;
use petgraph::algo::astar;
use petgraph::graphmap::UnGraphMap;

/// Travel network graph structure
///
/// Nodes are areas, edges are unit-cost hops between neighbouring areas.
/// This is the large graph; searches never run over it directly.
#[derive(Debug, Clone, Default)]
pub struct TravelNetwork {
    graph: UnGraphMap<AreaId, ()>,
}

impl TravelNetwork {
    /// Create a travel network from undirected area pairs
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (AreaId, AreaId)>,
    {
        let mut graph = UnGraphMap::new();
        for (from, to) in edges {
            graph.add_edge(from, to, ());
        }
        Self { graph }
    }

    /// Add an area with no connections yet
    pub fn add_area(&mut self, area: AreaId) {
        self.graph.add_node(area);
    }

    pub fn contains_area(&self, area: AreaId) -> bool {
        self.graph.contains_node(area)
    }

    pub fn area_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn hop_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Fewest-hops path between two areas, both ends included
    ///
    /// Returns `None` when either area is unknown or they are not connected.
    pub fn shortest_path(&self, from: AreaId, to: AreaId) -> Option<Vec<AreaId>> {
        if !self.contains_area(from) || !self.contains_area(to) {
            return None;
        }

        astar(&self.graph, from, |area| area == to, |_| 1u32, |_| 0)
            .map(|(_hops, path)| path)
    }
}
