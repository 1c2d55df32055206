// Memoised shortest paths through the travel network

use crate::error::{Error, Result};
use crate::models::AreaId;
use crate::utils::travel_network::TravelNetwork;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::trace;

/// Shortest-path memo keyed by unordered area pair
///
/// Paths are stored from the lower area id to the higher one; a lookup in the
/// other direction returns the stored path reversed. The cache has no global
/// state: its lifetime is whatever the caller gives it. It is not meant for
/// concurrent mutation, wrap it in a lock if searches share one.
#[derive(Debug, Clone, Default)]
pub struct RouteCache {
    routes: HashMap<(AreaId, AreaId), Vec<AreaId>>,
}

fn pair_key(a: AreaId, b: AreaId) -> (AreaId, AreaId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of areas from `from` to `to`, both included
    ///
    /// Fails with [`Error::Disconnected`] when no path exists. Failed lookups
    /// are not cached.
    pub fn shortest_path(
        &mut self,
        network: &TravelNetwork,
        from: AreaId,
        to: AreaId,
    ) -> Result<Vec<AreaId>> {
        let key = pair_key(from, to);

        if self.routes.contains_key(&key) {
            trace!(from, to, "route cache hit");
        } else {
            trace!(from, to, "route cache miss");
            let path = network
                .shortest_path(key.0, key.1)
                .ok_or(Error::Disconnected { from, to })?;
            self.routes.insert(key, path);
        }
        let path = &self.routes[&key];

        if from <= to {
            Ok(path.clone())
        } else {
            Ok(path.iter().rev().copied().collect())
        }
    }

    /// Compute every missing pair in parallel and store the results
    ///
    /// Fails on the first disconnected pair; the pairs that did resolve are
    /// kept.
    pub fn warm<I>(&mut self, network: &TravelNetwork, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (AreaId, AreaId)>,
    {
        let mut missing: Vec<(AreaId, AreaId)> = pairs
            .into_iter()
            .map(|(a, b)| pair_key(a, b))
            .filter(|key| !self.routes.contains_key(key))
            .collect();
        missing.sort_unstable();
        missing.dedup();

        let resolved: Vec<((AreaId, AreaId), Option<Vec<AreaId>>)> = missing
            .par_iter()
            .map(|&(a, b)| ((a, b), network.shortest_path(a, b)))
            .collect();

        let mut disconnected = None;
        for ((a, b), path) in resolved {
            match path {
                Some(path) => {
                    self.routes.insert((a, b), path);
                }
                None => {
                    disconnected.get_or_insert(Error::Disconnected { from: a, to: b });
                }
            }
        }

        match disconnected {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn contains(&self, a: AreaId, b: AreaId) -> bool {
        self.routes.contains_key(&pair_key(a, b))
    }

    /// Gets the number of cached area pairs
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_network() -> TravelNetwork {
        TravelNetwork::from_edges(vec![(1, 2), (2, 3), (3, 4), (10, 11)])
    }

    #[test]
    fn test_reverse_lookup_reuses_entry() {
        let network = create_test_network();
        let mut cache = RouteCache::new();

        let forward = cache.shortest_path(&network, 1, 4).unwrap();
        let backward = cache.shortest_path(&network, 4, 1).unwrap();

        assert_eq!(forward, vec![1, 2, 3, 4]);
        assert_eq!(backward, vec![4, 3, 2, 1]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_reverse_first_then_forward() {
        let network = create_test_network();
        let mut cache = RouteCache::new();

        assert_eq!(cache.shortest_path(&network, 3, 1).unwrap(), vec![3, 2, 1]);
        assert_eq!(cache.shortest_path(&network, 1, 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_disconnected_is_an_error() {
        let network = create_test_network();
        let mut cache = RouteCache::new();

        let err = cache.shortest_path(&network, 4, 10).unwrap_err();
        assert!(matches!(err, Error::Disconnected { from: 4, to: 10 }));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_warm() {
        let network = create_test_network();
        let mut cache = RouteCache::new();

        cache
            .warm(&network, vec![(1, 3), (3, 1), (2, 4), (10, 11)])
            .unwrap();

        assert_eq!(cache.len(), 3);
        assert!(cache.contains(3, 1));
        assert_eq!(cache.shortest_path(&network, 4, 2).unwrap(), vec![4, 3, 2]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_warm_keeps_resolved_pairs_on_failure() {
        let network = create_test_network();
        let mut cache = RouteCache::new();

        let result = cache.warm(&network, vec![(1, 2), (1, 10)]);

        assert!(matches!(result, Err(Error::Disconnected { .. })));
        assert!(cache.contains(1, 2));
        assert!(!cache.contains(1, 10));
    }
}
