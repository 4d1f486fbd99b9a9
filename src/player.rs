//! Player state and resource bookkeeping.
//!
//! The core treats players as opaque owner ids; this module is the thin
//! economic ledger behind them: resource counts with all-or-nothing
//! spending, and lists of owned pieces.

use crate::board::{PlayerId, Resource};
use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// Development card types. Stored as plain data; play rules are the
/// caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevelopmentCard {
    /// Move robber and steal, counts toward Largest Army
    Knight,
    /// Worth 1 VP
    VictoryPoint,
    /// Build 2 roads for free
    RoadBuilding,
    /// Take any 2 resources from the bank
    YearOfPlenty,
    /// All players must give you all of one resource type
    Monopoly,
}

/// A hand of resources: one count per resource type, indexed by the order
/// of [`Resource::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    counts: [u32; Resource::ALL.len()],
}

/// Slot of a resource in the counts array
fn slot(resource: Resource) -> usize {
    Resource::ALL
        .iter()
        .position(|&r| r == resource)
        .expect("resource missing from Resource::ALL")
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand from (resource, amount) pairs. Repeated resources
    /// accumulate.
    pub fn of(amounts: &[(Resource, u32)]) -> Self {
        let mut hand = Self::new();
        for &(resource, amount) in amounts {
            hand.add(resource, amount);
        }
        hand
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        self.counts[slot(resource)]
    }

    /// Add resources to hand
    pub fn add(&mut self, resource: Resource, amount: u32) {
        self.counts[slot(resource)] += amount;
    }

    /// Check if every resource count covers the cost
    pub fn can_afford(&self, cost: &ResourceHand) -> bool {
        self.counts
            .iter()
            .zip(cost.counts.iter())
            .all(|(have, need)| have >= need)
    }

    /// Try to subtract a cost. All-or-nothing: returns false and deducts
    /// nothing if any resource is insufficient.
    pub fn try_subtract(&mut self, cost: &ResourceHand) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for (have, need) in self.counts.iter_mut().zip(cost.counts.iter()) {
            *have -= need;
        }
        true
    }
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (0-3)
    pub id: PlayerId,
    /// Current resources
    pub resources: ResourceHand,
    /// Victory point counter
    pub victory_points: u32,
    /// Edges this player has claimed roads on
    pub roads: Vec<(NodeId, NodeId)>,
    /// Nodes holding this player's settlements
    pub settlements: Vec<NodeId>,
    /// Nodes holding this player's cities
    pub cities: Vec<NodeId>,
    /// Development cards in hand
    pub dev_cards: Vec<DevelopmentCard>,
    /// Number of knights played
    pub played_knights: u32,
}

impl Player {
    /// Create a new player with empty holdings
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            resources: ResourceHand::new(),
            victory_points: 0,
            roads: Vec::new(),
            settlements: Vec::new(),
            cities: Vec::new(),
            dev_cards: Vec::new(),
            played_knights: 0,
        }
    }

    /// Add resources to this player's hand
    pub fn add_resource(&mut self, resource: Resource, amount: u32) {
        self.resources.add(resource, amount);
    }

    /// Spend a cost from this player's hand. All-or-nothing.
    pub fn spend(&mut self, cost: &ResourceHand) -> bool {
        self.resources.try_subtract(cost)
    }
}
