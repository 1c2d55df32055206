// Offer model representing a priced, quantity-bounded sell order

use crate::models::{Cost, ItemId, Location, Quantity};
use serde::{Deserialize, Serialize};

/// An item that can be bought at a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Item being sold
    pub item: ItemId,

    /// Where the item can be bought
    pub location: Location,

    /// Price of a single unit
    pub unit_price: Cost,

    /// Units on offer at that price
    pub quantity_available: Quantity,
}

impl Offer {
    /// Creates a new offer
    pub fn new(
        item: ItemId,
        location: Location,
        unit_price: Cost,
        quantity_available: Quantity,
    ) -> Self {
        Self {
            item,
            location,
            unit_price,
            quantity_available,
        }
    }

    /// Checks if this single offer can cover `quantity` units on its own
    pub fn covers(&self, quantity: Quantity) -> bool {
        self.quantity_available >= quantity
    }

    /// Price of buying `quantity` units from this offer
    pub fn cost_of(&self, quantity: Quantity) -> Cost {
        quantity as Cost * self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers() {
        let offer = Offer::new(34, Location::new(1, 100), 4.5, 6);
        assert!(offer.covers(6));
        assert!(offer.covers(1));
        assert!(!offer.covers(10));
    }

    #[test]
    fn test_cost_of() {
        let offer = Offer::new(34, Location::new(1, 100), 4.5, 6);
        assert_eq!(offer.cost_of(4), 18.0);
    }
}
