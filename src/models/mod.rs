// Models module - exports all model types

mod best_price;
mod location;
mod offer;
mod requirement;
mod transition;

// Re-export model types
pub use self::best_price::BestPriceIndex;
pub use self::location::Location;
pub use self::offer::Offer;
pub use self::requirement::Requirement;
pub use self::transition::{PurchasePlan, Transition};

// Common type aliases for improved code readability
pub type ItemId = u32;
pub type AreaId = u32;
pub type NodeId = u64;
pub type Quantity = u32;
pub type Cost = f64;
pub type Seconds = u32;
