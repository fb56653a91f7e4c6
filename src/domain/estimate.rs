//! The aggregate handed to the estimate backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{customer::Customer, room::Room};

/// Number of boxes per size the customer expects to pack.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoxCounts {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
}

impl BoxCounts {
    pub fn total(&self) -> u64 {
        u64::from(self.small) + u64::from(self.medium) + u64::from(self.large)
    }
}

/// Labour the crew is asked to perform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceFlags {
    pub pack: bool,
    pub unpack: bool,
    pub load: bool,
    pub unload: bool,
    pub clean: bool,
}

/// Normalized description of a customer's move, ready for pricing.
///
/// Built once by the assembler and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EstimateRequest {
    pub customer: Customer,
    pub load_address: String,
    pub unload_address: String,
    pub start_time: String,
    /// Owned by the pricing backend; always empty when assembled here.
    pub end_time: String,
    pub rooms: Vec<Room>,
    pub room_names: Vec<String>,
    pub specialty: BTreeMap<String, bool>,
    pub boxes: BoxCounts,
    pub services: ServiceFlags,
    pub need_truck: bool,
    pub special_requests: Vec<String>,
    pub distance_to_job: u32,
    pub distance_total: u32,
}

impl EstimateRequest {
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }

    pub fn total_items(&self) -> u64 {
        self.rooms.iter().map(|room| room.items.total()).sum()
    }

    pub fn selected_specialty(&self) -> impl Iterator<Item = &str> + '_ {
        self.specialty
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(key, _)| key.as_str())
    }
}
