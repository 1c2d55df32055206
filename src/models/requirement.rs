// Requirement model: the quantities of each item still to be bought

use crate::error::{Error, Result};
use crate::models::{ItemId, Quantity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Multiset of `(quantity, item)` pairs with unique items
///
/// Entries are kept sorted by item id, so two requirements holding the same
/// pairs compare and hash equal no matter the order they were built in.
///
/// Serialized as a list of `[quantity, item]` pairs; deserializing goes
/// through [`Requirement::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<(Quantity, ItemId)>",
    into = "Vec<(Quantity, ItemId)>"
)]
pub struct Requirement {
    items: Vec<(ItemId, Quantity)>,
}

impl Requirement {
    /// Creates an empty requirement
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a requirement from `(quantity, item)` pairs
    ///
    /// Zero quantities are dropped. An item listed twice is a caller error
    /// and is rejected with [`Error::DuplicateItem`]; use [`Requirement::merged`]
    /// to sum duplicates instead.
    pub fn new<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Quantity, ItemId)>,
    {
        let mut items: Vec<(ItemId, Quantity)> = pairs
            .into_iter()
            .map(|(quantity, item)| (item, quantity))
            .collect();
        items.sort_by_key(|(item, _)| *item);

        // A zero quantity still counts as a listing
        if let Some(window) = items.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::DuplicateItem(window[0].0));
        }
        items.retain(|(_, quantity)| *quantity > 0);

        Ok(Self { items })
    }

    /// Creates a requirement, summing the quantities of repeated items
    ///
    /// Fails with [`Error::QuantityOverflow`] when a sum does not fit in a
    /// [`Quantity`].
    pub fn merged<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Quantity, ItemId)>,
    {
        let mut totals: BTreeMap<ItemId, Quantity> = BTreeMap::new();
        for (quantity, item) in pairs {
            if quantity == 0 {
                continue;
            }
            let total = totals.entry(item).or_insert(0);
            *total = total
                .checked_add(quantity)
                .ok_or(Error::QuantityOverflow(item))?;
        }
        Ok(Self {
            items: totals.into_iter().collect(),
        })
    }

    /// Parses a shopping list, one `<quantity> <item-id>` per line
    ///
    /// Blank lines and lines starting with `#` are skipped. A line holding
    /// only an item id asks for one unit. Repeated items are summed, see
    /// [`Requirement::merged`].
    pub fn parse_lines(text: &str) -> Result<Self> {
        let mut pairs = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parse_err = |reason: &str| Error::Parse {
                line: idx + 1,
                reason: reason.to_string(),
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            let (quantity, item) = match fields.as_slice() {
                [item] => (1, *item),
                [quantity, item] => (
                    quantity
                        .parse::<Quantity>()
                        .map_err(|_| parse_err("quantity is not a whole number"))?,
                    *item,
                ),
                _ => return Err(parse_err("expected `<quantity> <item-id>`")),
            };
            let item = item
                .parse::<ItemId>()
                .map_err(|_| parse_err("item id is not a number"))?;

            pairs.push((quantity, item));
        }

        Self::merged(pairs)
    }

    /// Returns a copy with `item` removed
    pub fn without(&self, item: ItemId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|(id, _)| *id != item)
                .copied()
                .collect(),
        }
    }

    /// Iterates the `(quantity, item)` pairs in item order
    pub fn iter(&self) -> impl Iterator<Item = (Quantity, ItemId)> + '_ {
        self.items.iter().map(|(item, quantity)| (*quantity, *item))
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|(item, _)| *item)
    }

    /// Gets the quantity required for `item`, if any
    pub fn quantity_of(&self, item: ItemId) -> Option<Quantity> {
        self.items
            .binary_search_by_key(&item, |(id, _)| *id)
            .ok()
            .map(|idx| self.items[idx].1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Gets the number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Gets the total number of units across all items
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|(_, q)| *q as u64).sum()
    }
}

impl TryFrom<Vec<(Quantity, ItemId)>> for Requirement {
    type Error = Error;

    fn try_from(pairs: Vec<(Quantity, ItemId)>) -> Result<Self> {
        Self::new(pairs)
    }
}

impl From<Requirement> for Vec<(Quantity, ItemId)> {
    fn from(requirement: Requirement) -> Self {
        requirement.iter().collect()
    }
}
