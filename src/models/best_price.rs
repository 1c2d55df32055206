// Best-price index: the cheapest offer per item at every location

use crate::models::{Cost, ItemId, Location, Offer, Quantity};
use std::collections::HashMap;
use tracing::debug;

/// Per-location, per-item lookup of the cheapest known offer
///
/// Built once from a flat stream of offers and read-only afterwards. An item
/// missing at a location means it cannot be bought there.
#[derive(Debug, Clone, Default)]
pub struct BestPriceIndex {
    markets: HashMap<Location, HashMap<ItemId, Offer>>,
}

impl BestPriceIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduces `offers` to the cheapest offer per `(location, item)`
    ///
    /// Ties on price keep the offer seen first.
    pub fn from_offers<I>(offers: I) -> Self
    where
        I: IntoIterator<Item = Offer>,
    {
        let mut index = Self::new();
        let mut seen = 0usize;
        for offer in offers {
            index.insert(offer);
            seen += 1;
        }
        debug!(
            offers = seen,
            markets = index.markets.len(),
            "built best price index"
        );
        index
    }

    /// Records `offer` if it beats the current best for its location and item
    fn insert(&mut self, offer: Offer) {
        let market = self.markets.entry(offer.location).or_default();
        match market.get(&offer.item) {
            Some(best) if best.unit_price <= offer.unit_price => {}
            _ => {
                market.insert(offer.item, offer);
            }
        }
    }

    /// Gets the cheapest offer for `item` at `location`
    pub fn best_offer(&self, location: &Location, item: ItemId) -> Option<&Offer> {
        self.markets.get(location)?.get(&item)
    }

    /// Checks if the best offer at `location` can cover `quantity` units
    pub fn has_sufficient_quantity(
        &self,
        location: &Location,
        item: ItemId,
        quantity: Quantity,
    ) -> bool {
        self.best_offer(location, item)
            .map_or(false, |offer| offer.covers(quantity))
    }

    /// Cheapest unit price for `item` across every location
    pub fn cheapest_price(&self, item: ItemId) -> Option<Cost> {
        self.markets
            .values()
            .filter_map(|market| market.get(&item))
            .map(|offer| offer.unit_price)
            .reduce(Cost::min)
    }

    /// All offers at `location`
    pub fn offers_at(&self, location: &Location) -> impl Iterator<Item = &Offer> {
        self.markets.get(location).into_iter().flat_map(|m| m.values())
    }

    /// Best offers for `item`, one per location that sells it
    pub fn offers_for(&self, item: ItemId) -> impl Iterator<Item = &Offer> {
        self.markets.values().filter_map(move |m| m.get(&item))
    }

    /// Locations with at least one offer
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.markets.keys()
    }

    /// Number of locations with at least one offer
    pub fn market_count(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

impl FromIterator<Offer> for BestPriceIndex {
    fn from_iter<T: IntoIterator<Item = Offer>>(iter: T) -> Self {
        Self::from_offers(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_index() -> BestPriceIndex {
        let market_a = Location::new(1, 100);
        let market_b = Location::new(2, 200);

        BestPriceIndex::from_offers(vec![
            Offer::new(1, market_a, 10.0, 5),
            Offer::new(1, market_a, 8.0, 2), // cheaper, smaller
            Offer::new(1, market_a, 12.0, 50),
            Offer::new(2, market_a, 20.0, 3),
            Offer::new(1, market_b, 9.0, 7),
        ])
    }

    #[test]
    fn test_keeps_cheapest_offer() {
        let index = create_test_index();
        let best = index.best_offer(&Location::new(1, 100), 1).unwrap();

        assert_eq!(best.unit_price, 8.0);
        assert_eq!(best.quantity_available, 2);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let market = Location::new(1, 100);
        let index = BestPriceIndex::from_offers(vec![
            Offer::new(1, market, 5.0, 3),
            Offer::new(1, market, 5.0, 9),
        ]);

        assert_eq!(index.best_offer(&market, 1).unwrap().quantity_available, 3);
    }

    #[test]
    fn test_absent_item_is_not_free() {
        let index = create_test_index();
        let market_b = Location::new(2, 200);

        assert!(index.best_offer(&market_b, 2).is_none());
        assert!(!index.has_sufficient_quantity(&market_b, 2, 1));
        assert!(index.best_offer(&Location::new(9, 9), 1).is_none());
    }

    #[test]
    fn test_has_sufficient_quantity_uses_best_offer() {
        let index = create_test_index();
        let market_a = Location::new(1, 100);

        // The 50-unit offer is not the cheapest, so it does not count
        assert!(index.has_sufficient_quantity(&market_a, 1, 2));
        assert!(!index.has_sufficient_quantity(&market_a, 1, 3));
    }

    #[test]
    fn test_cheapest_price_across_locations() {
        let index = create_test_index();

        assert_eq!(index.cheapest_price(1), Some(8.0));
        assert_eq!(index.cheapest_price(2), Some(20.0));
        assert_eq!(index.cheapest_price(3), None);
        assert_eq!(index.offers_for(1).count(), 2);
        assert_eq!(index.market_count(), 2);
    }
}
