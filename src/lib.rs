//! hexisle - board engine for a hex-tile territory-acquisition game
//!
//! This crate provides:
//! - Randomized terrain/number placement on a fixed axial layout
//! - Derivation of the canonical intersection/road graph from tile
//!   geometry, with floating-point corner deduplication
//! - Harbor (trade-bonus) assignment over derived nodes
//! - Ownership mutation of intersections and roads
//! - Thin player and turn bookkeeping
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates and hex corner geometry
//! - [`board`]: Tiles, the tile deck, and board generation
//! - [`graph`]: The derived intersection/road graph and its mutation API
//! - [`player`]: Resource hands and per-player holdings
//! - [`game`]: Turn rotation and dice

pub mod board;
pub mod game;
pub mod graph;
pub mod hex;
pub mod player;

// Re-export commonly used types
pub use board::{Board, BoardError, BoardJson, PlayerId, Resource, Terrain, Tile, TileDeck};
pub use game::Game;
pub use graph::{
    Building, EdgeJson, GraphJson, Harbor, HarborSite, IntersectionGraph, Node, NodeId,
};
pub use hex::HexCoord;
pub use player::{DevelopmentCard, Player, ResourceHand};
