//! Intersection/road graph derived from tile geometry.
//!
//! Each tile contributes six hexagon corners; corners shared by adjacent
//! tiles must collapse to a single node. Identity is a function of the
//! rounded planar position, not of which tile produced the corner, so the
//! derivation rounds every corner to a fixed precision and keys a
//! position-to-id map on the result. Node ids are dense and assigned in
//! first-discovery order, which makes the standard board's ids stable
//! layout constants (the harbor table below depends on this).
//!
//! Containers are purpose-built rather than a general graph structure: a
//! dense `Vec<Node>` indexed by id, and a `BTreeMap` of edges keyed by the
//! order-independent (min, max) id pair.

use crate::board::{Board, PlayerId, Resource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Stable node identifier within a graph instance
pub type NodeId = usize;

/// Hex circumradius used for corner geometry. The rounding precision below
/// is tuned to this size; they change together or not at all.
const HEX_SIZE: f64 = 1.0;

/// Positions are rounded to hundredths before they are compared. At unit
/// hex size distinct corners are at least ~0.87 apart while float error on
/// shared corners is around 1e-15, so hundredths sit comfortably between
/// the two. Guarded by `test_rounding_precision_margin`.
const POSITION_SCALE: f64 = 100.0;

/// Round a raw corner position to the canonical grid used for node identity.
fn round_position(x: f64, y: f64) -> (i64, i64) {
    (
        (x * POSITION_SCALE).round() as i64,
        (y * POSITION_SCALE).round() as i64,
    )
}

/// What's built on an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Building {
    /// Settlement (1 VP, 1 resource per adjacent tile)
    Settlement,
    /// City (2 VP, 2 resources per adjacent tile)
    City,
}

/// Harbor types for maritime trading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Harbor {
    /// 3:1 trade any resource
    Generic,
    /// 2:1 trade for a specific resource
    Specific(Resource),
}

impl Harbor {
    /// The exchange rate for this harbor
    pub fn rate(&self) -> u32 {
        match self {
            Harbor::Generic => 3,
            Harbor::Specific(_) => 2,
        }
    }
}

/// A harbor assignment: two adjacent coastal nodes share one harbor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarborSite {
    /// The node pair granted the trade bonus
    pub nodes: (NodeId, NodeId),
    /// Type of harbor (generic or specific resource)
    pub harbor: Harbor,
}

/// An intersection where up to three tiles meet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Dense id, assigned in first-discovery order during derivation
    pub id: NodeId,
    /// Planar position, rounded to the canonical precision
    pub position: (f64, f64),
    /// What's built here, if anything
    pub building: Option<Building>,
    /// Who owns the building
    pub owner: Option<PlayerId>,
    /// Trade bonus attached to this intersection
    pub harbor: Option<Harbor>,
}

/// The derived node/edge graph of a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntersectionGraph {
    nodes: Vec<Node>,
    /// Road slots keyed by normalized (min, max) endpoint pair
    edges: BTreeMap<(NodeId, NodeId), Option<PlayerId>>,
}

impl IntersectionGraph {
    /// Derive the graph from a board and overlay the standard harbor table.
    pub fn from_board(board: &Board) -> Self {
        let mut graph = Self::derive(board);
        graph.apply_harbors(&standard_harbor_sites());
        graph
    }

    /// Derive the graph without harbors (callers with non-standard layouts
    /// supply their own table via `apply_harbors`).
    pub fn derive(board: &Board) -> Self {
        let mut nodes: Vec<Node> = Vec::new();
        let mut edges: BTreeMap<(NodeId, NodeId), Option<PlayerId>> = BTreeMap::new();
        let mut by_position: HashMap<(i64, i64), NodeId> = HashMap::new();

        for tile in board.tiles() {
            let corners = tile.coord.corners(HEX_SIZE);

            // Dedup pass: resolve each corner to a canonical node id.
            let corner_ids: Vec<NodeId> = corners
                .iter()
                .map(|&(x, y)| {
                    let key = round_position(x, y);
                    *by_position.entry(key).or_insert_with(|| {
                        let id = nodes.len();
                        nodes.push(Node {
                            id,
                            position: (
                                key.0 as f64 / POSITION_SCALE,
                                key.1 as f64 / POSITION_SCALE,
                            ),
                            building: None,
                            owner: None,
                            harbor: None,
                        });
                        id
                    })
                })
                .collect();

            // Connect the hexagon's corners in a cycle; adjacent tiles
            // contribute the same edge twice, the map keeps one record.
            for i in 0..corner_ids.len() {
                let a = corner_ids[i];
                let b = corner_ids[(i + 1) % corner_ids.len()];
                edges.entry(edge_key(a, b)).or_insert(None);
            }
        }

        Self { nodes, edges }
    }

    /// Attach harbors to existing nodes. Sites referencing node ids absent
    /// from this graph are skipped silently; harbor tables are static data
    /// that may reference ids outside a non-standard layout.
    pub fn apply_harbors(&mut self, sites: &[HarborSite]) {
        for site in sites {
            for id in [site.nodes.0, site.nodes.1] {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.harbor = Some(site.harbor);
                }
            }
        }
    }

    // ==================== Query Methods ====================

    /// Number of intersections
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of road slots
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterate all nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate all edges as (a, b, owner) with a < b
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Option<PlayerId>)> + '_ {
        self.edges.iter().map(|(&(a, b), &owner)| (a, b, owner))
    }

    /// Check whether an edge exists between two nodes
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.contains_key(&edge_key(a, b))
    }

    /// Get the owner of an edge, if the edge exists
    pub fn edge_owner(&self, a: NodeId, b: NodeId) -> Option<Option<PlayerId>> {
        self.edges.get(&edge_key(a, b)).copied()
    }

    /// All nodes with no building, in id order. A fresh snapshot, not a
    /// live view.
    pub fn available_settlement_spots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.building.is_none())
            .map(|n| n.id)
            .collect()
    }

    // ==================== Mutation Methods ====================

    /// Claim an empty intersection for a settlement. Fails without change
    /// if the node does not exist or already has a building. Distance-rule
    /// enforcement is the caller's concern.
    pub fn claim_settlement(&mut self, node: NodeId, owner: PlayerId) -> bool {
        match self.nodes.get_mut(node) {
            Some(n) if n.building.is_none() => {
                n.building = Some(Building::Settlement);
                n.owner = Some(owner);
                true
            }
            _ => false,
        }
    }

    /// Upgrade a settlement to a city. Fails without change unless the node
    /// holds that owner's settlement.
    pub fn upgrade_to_city(&mut self, node: NodeId, owner: PlayerId) -> bool {
        match self.nodes.get_mut(node) {
            Some(n)
                if n.building == Some(Building::Settlement) && n.owner == Some(owner) =>
            {
                n.building = Some(Building::City);
                true
            }
            _ => false,
        }
    }

    /// Claim an unowned edge for a road. Fails without change if the edge
    /// does not exist or is already owned.
    pub fn claim_road(&mut self, a: NodeId, b: NodeId, owner: PlayerId) -> bool {
        match self.edges.get_mut(&edge_key(a, b)) {
            Some(slot) if slot.is_none() => {
                *slot = Some(owner);
                true
            }
            _ => false,
        }
    }

    /// Convert to a JSON-friendly representation (edge map flattened to an
    /// array, since JSON objects can't use tuple keys)
    pub fn to_json_friendly(&self) -> GraphJson {
        GraphJson {
            nodes: self.nodes.clone(),
            edges: self
                .edges()
                .map(|(a, b, owner)| EdgeJson { a, b, owner })
                .collect(),
        }
    }
}

/// Normalize an unordered node pair
fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The 9 standard harbor sites: 4 generic (3:1) and one 2:1 per resource,
/// spaced around the coast. Node ids refer to the standard layout's
/// derivation order (board order x counterclockwise corner order).
pub fn standard_harbor_sites() -> Vec<HarborSite> {
    vec![
        HarborSite {
            nodes: (28, 29),
            harbor: Harbor::Generic,
        },
        HarborSite {
            nodes: (31, 32),
            harbor: Harbor::Specific(Resource::Grain),
        },
        HarborSite {
            nodes: (34, 35),
            harbor: Harbor::Specific(Resource::Ore),
        },
        HarborSite {
            nodes: (37, 38),
            harbor: Harbor::Generic,
        },
        HarborSite {
            nodes: (40, 41),
            harbor: Harbor::Specific(Resource::Wool),
        },
        HarborSite {
            nodes: (43, 44),
            harbor: Harbor::Generic,
        },
        HarborSite {
            nodes: (46, 47),
            harbor: Harbor::Specific(Resource::Brick),
        },
        HarborSite {
            nodes: (49, 51),
            harbor: Harbor::Specific(Resource::Lumber),
        },
        HarborSite {
            nodes: (50, 52),
            harbor: Harbor::Generic,
        },
    ]
}

/// JSON-friendly graph representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphJson {
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeJson {
    pub a: NodeId,
    pub b: NodeId,
    pub owner: Option<PlayerId>,
}
