// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use algorithms::purchase_tour::{optimize_purchase, optimize_purchase_with, TourProblem, TourState};
pub use config::{SearchConfig, SweatLevel};
pub use error::{Error, Result};
pub use models::{BestPriceIndex, Location, Offer, PurchasePlan, Requirement, Transition};
pub use utils::market_graph::{build_market_graph, build_market_graph_with_cache, MarketGraph};
pub use utils::route_cache::RouteCache;
pub use utils::travel_network::TravelNetwork;
