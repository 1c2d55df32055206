// Transition and plan models for representing purchase tours

use crate::models::{Cost, ItemId, Location, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single step of a purchase tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Buy `quantity` units of `item` at `location`
    Purchase {
        item: ItemId,
        quantity: Quantity,
        location: Location,
        cost: Cost,
    },
    /// Move to `destination`, paying the opportunity cost of the travel time
    Travel { destination: Location, cost: Cost },
}

impl Transition {
    pub fn cost(&self) -> Cost {
        match self {
            Transition::Purchase { cost, .. } => *cost,
            Transition::Travel { cost, .. } => *cost,
        }
    }

    pub fn is_purchase(&self) -> bool {
        matches!(self, Transition::Purchase { .. })
    }

    /// Unit price paid by a purchase
    pub fn unit_price(&self) -> Option<Cost> {
        match self {
            Transition::Purchase { quantity, cost, .. } if *quantity > 0 => {
                Some(cost / *quantity as Cost)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Purchase {
                item,
                quantity,
                location,
                ..
            } => write!(
                f,
                "buy {} of {} at {} for {:.2} each",
                quantity,
                item,
                location,
                self.unit_price().unwrap_or(0.0)
            ),
            Transition::Travel { destination, cost } => {
                write!(f, "move to {}, opportunity cost {:.2}", destination, cost)
            }
        }
    }
}

/// Result of a purchase tour search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasePlan {
    /// Total cost of all transitions
    pub total_cost: Cost,

    /// Ordered steps from the start to the end location
    pub transitions: Vec<Transition>,
}

impl PurchasePlan {
    pub fn new(total_cost: Cost, transitions: Vec<Transition>) -> Self {
        Self {
            total_cost,
            transitions,
        }
    }

    /// Money spent on purchases
    pub fn purchase_cost(&self) -> Cost {
        self.transitions
            .iter()
            .filter(|t| t.is_purchase())
            .map(Transition::cost)
            .sum()
    }

    /// Opportunity cost of all travel
    pub fn travel_cost(&self) -> Cost {
        self.transitions
            .iter()
            .filter(|t| !t.is_purchase())
            .map(Transition::cost)
            .sum()
    }

    pub fn purchases(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(|t| t.is_purchase())
    }

    /// Number of travel steps in the tour, in-area moves included
    pub fn travel_count(&self) -> usize {
        self.transitions.len() - self.purchases().count()
    }
}
