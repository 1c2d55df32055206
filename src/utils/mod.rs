pub mod loader;
pub mod market_graph;
pub mod route_cache;
pub mod travel_network;
