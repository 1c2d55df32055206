use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::{AreaId, Cost, ItemId, Location, NodeId, Offer, Quantity, Requirement};

use super::travel_network::TravelNetwork;

/// Serialized travel network: unit-weight hops between area ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelNetworkFile {
    pub edges: Vec<(AreaId, AreaId)>,
}

/// One sell order as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferRecord {
    pub item_id: ItemId,
    pub area_id: AreaId,
    pub node_id: NodeId,
    pub price: Cost,
    pub quantity: Quantity,
}

impl From<OfferRecord> for Offer {
    fn from(record: OfferRecord) -> Self {
        Offer::new(
            record.item_id,
            Location::new(record.area_id, record.node_id),
            record.price,
            record.quantity,
        )
    }
}

// Load the travel network edge list
pub fn load_travel_network(path: &Path) -> Result<TravelNetwork> {
    let reader = BufReader::new(File::open(path)?);
    let file: TravelNetworkFile = serde_json::from_reader(reader)?;
    let network = TravelNetwork::from_edges(file.edges);

    info!(
        path = %path.display(),
        areas = network.area_count(),
        hops = network.hop_count(),
        "loaded travel network"
    );
    Ok(network)
}

// Load offers, keeping only the items in `items` when given
pub fn load_offers(path: &Path, items: Option<&Requirement>) -> Result<Vec<Offer>> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<OfferRecord> = serde_json::from_reader(reader)?;
    let total = records.len();

    let offers: Vec<Offer> = records
        .into_iter()
        .map(Offer::from)
        .filter(|offer| items.map_or(true, |req| req.quantity_of(offer.item).is_some()))
        .collect();

    info!(
        path = %path.display(),
        total,
        relevant = offers.len(),
        "loaded offers"
    );
    Ok(offers)
}

// Load a shopping list file
pub fn load_requirement(path: &Path) -> Result<Requirement> {
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    let requirement = Requirement::parse_lines(&text)?;

    info!(
        path = %path.display(),
        items = requirement.len(),
        units = requirement.total_quantity(),
        "loaded shopping list"
    );
    Ok(requirement)
}
