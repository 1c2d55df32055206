// Location model identifying a market or waypoint inside a travel area

use crate::error::Error;
use crate::models::{AreaId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A specific place inside an area of the travel network
///
/// The area is the unit the travel network connects; the node pins a
/// market (or any other point) within it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Location {
    pub area: AreaId,
    pub node: NodeId,
}

impl Location {
    /// Creates a new location inside `area`
    pub fn new(area: AreaId, node: NodeId) -> Self {
        Self { area, node }
    }

    /// Checks if both locations sit in the same area
    pub fn shares_area_with(&self, other: &Location) -> bool {
        self.area == other.area
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.area, self.node)
    }
}

// Parses the `area:node` form used on the command line
impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (area, node) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| Error::InvalidLocation(s.to_string()))?;
        let area = area
            .parse::<AreaId>()
            .map_err(|_| Error::InvalidLocation(s.to_string()))?;
        let node = node
            .parse::<NodeId>()
            .map_err(|_| Error::InvalidLocation(s.to_string()))?;
        Ok(Self::new(area, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let location: Location = "30000142:60003760".parse().unwrap();
        assert_eq!(location, Location::new(30000142, 60003760));
        assert_eq!(location.to_string(), "30000142:60003760");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("30000142".parse::<Location>().is_err());
        assert!("a:1".parse::<Location>().is_err());
        assert!("1:".parse::<Location>().is_err());
    }

    #[test]
    fn test_shares_area_with() {
        let loc1 = Location::new(1, 10);
        let loc2 = Location::new(1, 11);
        let loc3 = Location::new(2, 10);

        assert!(loc1.shares_area_with(&loc2));
        assert!(!loc1.shares_area_with(&loc3));
    }
}
