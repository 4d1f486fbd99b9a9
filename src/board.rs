//! Terrain tiles and board generation.
//!
//! This module contains:
//! - Resource and terrain types
//! - The tile deck (shuffled, count-constrained terrain/number assignment)
//! - The board itself: ordered tiles, coordinate lookup, robber tracking

use crate::hex::HexCoord;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Player identifier (0-3 for a 4-player game)
pub type PlayerId = u8;

/// Resource types produced by terrain tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Brick,
    Lumber,
    Ore,
    Grain,
    Wool,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Brick,
        Resource::Lumber,
        Resource::Ore,
        Resource::Grain,
        Resource::Wool,
    ];
}

/// What a tile is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    /// Produces the given resource when its number is rolled
    Producing(Resource),
    /// Desert - no production, starting home of the robber
    Desert,
}

impl Terrain {
    /// Get the resource this terrain produces, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Terrain::Producing(r) => Some(*r),
            Terrain::Desert => None,
        }
    }
}

/// A single hex tile on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Position on the hex grid
    pub coord: HexCoord,
    /// Terrain type
    pub terrain: Terrain,
    /// Dice number that triggers production (2-12, None for desert)
    pub number: Option<u8>,
    /// Whether the robber is currently on this tile
    pub has_robber: bool,
}

impl Tile {
    /// Create a producing tile
    pub fn producing(coord: HexCoord, resource: Resource, number: u8) -> Self {
        Self {
            coord,
            terrain: Terrain::Producing(resource),
            number: Some(number),
            has_robber: false,
        }
    }

    /// Create a desert tile. The robber starts here.
    pub fn desert(coord: HexCoord) -> Self {
        Self {
            coord,
            terrain: Terrain::Desert,
            number: None,
            has_robber: true,
        }
    }

    /// Check if this tile produces resources right now
    pub fn is_productive(&self) -> bool {
        matches!(self.terrain, Terrain::Producing(_)) && !self.has_robber
    }
}

/// Errors from board construction with caller-supplied layouts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("duplicate tile coordinate ({q}, {r})")]
    DuplicateCoord { q: i32, r: i32 },
    #[error("tile number {number} at ({q}, {r}) outside 2-12")]
    NumberOutOfRange { q: i32, r: i32, number: u8 },
}

/// The 19 axial coordinates of the standard layout: center, inner ring,
/// outer ring. Order matters - it is the board's tile order and therefore
/// fixes node ids in the derived graph.
pub const STANDARD_COORDS: [HexCoord; 19] = [
    HexCoord::new(0, 0),
    HexCoord::new(1, 0),
    HexCoord::new(1, -1),
    HexCoord::new(0, -1),
    HexCoord::new(-1, 0),
    HexCoord::new(-1, 1),
    HexCoord::new(0, 1),
    HexCoord::new(2, -2),
    HexCoord::new(2, -1),
    HexCoord::new(2, 0),
    HexCoord::new(1, 1),
    HexCoord::new(0, 2),
    HexCoord::new(-1, 2),
    HexCoord::new(-2, 2),
    HexCoord::new(-2, 1),
    HexCoord::new(-2, 0),
    HexCoord::new(-1, -1),
    HexCoord::new(0, -2),
    HexCoord::new(1, -2),
];

/// A shuffled, count-constrained assignment of terrain and number tokens.
///
/// The standard deck pairs 18 producing tiles plus one desert against the 18
/// standard number tokens. Shuffling the two multisets is independent and
/// uniform; no placement constraints are applied afterwards.
#[derive(Debug, Clone)]
pub struct TileDeck {
    terrains: Vec<Terrain>,
    numbers: Vec<u8>,
}

impl TileDeck {
    /// The standard terrain multiset: 3 Brick, 4 Lumber, 4 Grain, 4 Wool,
    /// 3 Ore, 1 Desert.
    pub fn standard_terrains() -> Vec<Terrain> {
        let mut terrains = Vec::with_capacity(19);
        terrains.extend(std::iter::repeat(Terrain::Producing(Resource::Brick)).take(3));
        terrains.extend(std::iter::repeat(Terrain::Producing(Resource::Lumber)).take(4));
        terrains.extend(std::iter::repeat(Terrain::Producing(Resource::Grain)).take(4));
        terrains.extend(std::iter::repeat(Terrain::Producing(Resource::Wool)).take(4));
        terrains.extend(std::iter::repeat(Terrain::Producing(Resource::Ore)).take(3));
        terrains.push(Terrain::Desert);
        terrains
    }

    /// The standard number-token multiset (one per producing tile).
    pub fn standard_numbers() -> Vec<u8> {
        vec![2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12]
    }

    /// Shuffle the standard multisets with the provided RNG
    pub fn shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut terrains = Self::standard_terrains();
        let mut numbers = Self::standard_numbers();
        terrains.shuffle(rng);
        numbers.shuffle(rng);
        Self { terrains, numbers }
    }

    /// Pop the next terrain; panics if the deck is exhausted (the deck size
    /// must exactly match the layout size, an invariant of the caller).
    fn next_terrain(&mut self) -> Terrain {
        self.terrains
            .pop()
            .expect("tile deck exhausted before layout was filled")
    }

    /// Pop the next number token; same exhaustion invariant as terrains.
    fn next_number(&mut self) -> u8 {
        self.numbers
            .pop()
            .expect("number tokens exhausted before layout was filled")
    }
}

/// The game board: an ordered collection of placed tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    robber_location: HexCoord,
}

impl Board {
    /// Create the standard board with randomized tiles and numbers
    pub fn standard() -> Self {
        let mut rng = rand::thread_rng();
        Self::standard_with_rng(&mut rng)
    }

    /// Create the standard board with a provided RNG.
    /// This allows for deterministic board generation when needed.
    pub fn standard_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut deck = TileDeck::shuffled(rng);
        assert_eq!(
            deck.terrains.len(),
            STANDARD_COORDS.len(),
            "deck size must equal layout size"
        );

        let mut tiles = Vec::with_capacity(STANDARD_COORDS.len());
        let mut robber_location = STANDARD_COORDS[0];

        for coord in STANDARD_COORDS {
            let tile = match deck.next_terrain() {
                Terrain::Desert => {
                    robber_location = coord;
                    Tile::desert(coord)
                }
                Terrain::Producing(resource) => {
                    Tile::producing(coord, resource, deck.next_number())
                }
            };
            tiles.push(tile);
        }

        Self {
            tiles,
            robber_location,
        }
    }

    /// Create a board from an explicit layout. No shuffling is performed;
    /// coordinates must be unique. The robber starts on the first desert
    /// tile if the layout has one, otherwise on the first tile.
    pub fn from_layout(tiles: Vec<Tile>) -> Result<Self, BoardError> {
        let mut seen = HashSet::new();
        for tile in &tiles {
            if !seen.insert(tile.coord) {
                return Err(BoardError::DuplicateCoord {
                    q: tile.coord.q,
                    r: tile.coord.r,
                });
            }
            if let Some(number) = tile.number {
                if !(2..=12).contains(&number) {
                    return Err(BoardError::NumberOutOfRange {
                        q: tile.coord.q,
                        r: tile.coord.r,
                        number,
                    });
                }
            }
        }

        let robber_location = tiles
            .iter()
            .find(|t| matches!(t.terrain, Terrain::Desert))
            .or(tiles.first())
            .map(|t| t.coord)
            .unwrap_or_default();

        let mut board = Self {
            tiles,
            robber_location,
        };
        // Normalize the flag so exactly the robber tile carries it.
        for tile in &mut board.tiles {
            tile.has_robber = tile.coord == robber_location;
        }
        Ok(board)
    }

    /// Ordered tile list (for rendering and graph derivation)
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get a tile by coordinate
    pub fn tile_at(&self, q: i32, r: i32) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.coord.q == q && t.coord.r == r)
    }

    /// Get the robber's current location
    pub fn robber_location(&self) -> HexCoord {
        self.robber_location
    }

    /// Move the robber to a new tile. A no-op if the coordinate is not on
    /// the board.
    pub fn move_robber(&mut self, new_location: HexCoord) -> bool {
        if !self.tiles.iter().any(|t| t.coord == new_location) {
            return false;
        }
        for tile in &mut self.tiles {
            tile.has_robber = tile.coord == new_location;
        }
        self.robber_location = new_location;
        true
    }

    /// Convert to a JSON-friendly representation for rendering collaborators
    pub fn to_json_friendly(&self) -> BoardJson {
        BoardJson {
            tiles: self
                .tiles
                .iter()
                .map(|tile| TileJson {
                    q: tile.coord.q,
                    r: tile.coord.r,
                    terrain: tile.terrain,
                    number: tile.number,
                    has_robber: tile.has_robber,
                })
                .collect(),
            robber_q: self.robber_location.q,
            robber_r: self.robber_location.r,
        }
    }
}

/// JSON-friendly board representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardJson {
    pub tiles: Vec<TileJson>,
    pub robber_q: i32,
    pub robber_r: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileJson {
    pub q: i32,
    pub r: i32,
    pub terrain: Terrain,
    pub number: Option<u8>,
    pub has_robber: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_standard_board_has_19_tiles() {
        let board = Board::standard();
        assert_eq!(board.tiles().len(), 19);
    }

    #[test]
    fn test_standard_board_covers_layout_coords_once() {
        let board = Board::standard();
        let coords: HashSet<HexCoord> = board.tiles().iter().map(|t| t.coord).collect();
        assert_eq!(coords.len(), 19);
        for coord in STANDARD_COORDS {
            assert!(coords.contains(&coord), "missing layout coord {:?}", coord);
        }
    }

    #[test]
    fn test_standard_board_resource_counts() {
        let board = Board::standard();

        let mut counts: HashMap<Option<Resource>, u32> = HashMap::new();
        for tile in board.tiles() {
            *counts.entry(tile.terrain.resource()).or_insert(0) += 1;
        }

        assert_eq!(counts.get(&Some(Resource::Brick)), Some(&3));
        assert_eq!(counts.get(&Some(Resource::Lumber)), Some(&4));
        assert_eq!(counts.get(&Some(Resource::Grain)), Some(&4));
        assert_eq!(counts.get(&Some(Resource::Wool)), Some(&4));
        assert_eq!(counts.get(&Some(Resource::Ore)), Some(&3));
        assert_eq!(counts.get(&None), Some(&1), "exactly one desert");
    }

    #[test]
    fn test_standard_board_number_multiset() {
        let board = Board::standard();

        let mut counts: HashMap<u8, u32> = HashMap::new();
        for tile in board.tiles() {
            if let Some(num) = tile.number {
                *counts.entry(num).or_insert(0) += 1;
            }
        }

        assert_eq!(counts.get(&2), Some(&1));
        assert_eq!(counts.get(&3), Some(&2));
        assert_eq!(counts.get(&4), Some(&2));
        assert_eq!(counts.get(&5), Some(&2));
        assert_eq!(counts.get(&6), Some(&2));
        assert_eq!(counts.get(&7), None);
        assert_eq!(counts.get(&8), Some(&2));
        assert_eq!(counts.get(&9), Some(&2));
        assert_eq!(counts.get(&10), Some(&2));
        assert_eq!(counts.get(&11), Some(&2));
        assert_eq!(counts.get(&12), Some(&1));
    }

    #[test]
    fn test_desert_has_no_number_and_hosts_robber() {
        let board = Board::standard();
        let desert: Vec<&Tile> = board
            .tiles()
            .iter()
            .filter(|t| matches!(t.terrain, Terrain::Desert))
            .collect();
        assert_eq!(desert.len(), 1);
        assert_eq!(desert[0].number, None);
        assert!(desert[0].has_robber);
        assert_eq!(board.robber_location(), desert[0].coord);

        let robber_count = board.tiles().iter().filter(|t| t.has_robber).count();
        assert_eq!(robber_count, 1);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = Board::standard_with_rng(&mut StdRng::seed_from_u64(7));
        let b = Board::standard_with_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(a.tiles(), b.tiles());
    }

    #[test]
    fn test_different_seeds_produce_different_boards() {
        let a = Board::standard_with_rng(&mut StdRng::seed_from_u64(1));
        let mut found_different = false;
        for seed in 2..12 {
            let b = Board::standard_with_rng(&mut StdRng::seed_from_u64(seed));
            if a.tiles() != b.tiles() {
                found_different = true;
                break;
            }
        }
        assert!(found_different, "shuffling should vary with the seed");
    }

    #[test]
    fn test_tile_at_lookup() {
        let board = Board::standard();
        assert!(board.tile_at(0, 0).is_some());
        assert!(board.tile_at(2, -2).is_some());
        assert!(board.tile_at(3, 3).is_none());
    }

    #[test]
    fn test_from_layout_rejects_duplicate_coords() {
        let tiles = vec![
            Tile::producing(HexCoord::new(0, 0), Resource::Brick, 5),
            Tile::producing(HexCoord::new(0, 0), Resource::Wool, 9),
        ];
        assert_eq!(
            Board::from_layout(tiles),
            Err(BoardError::DuplicateCoord { q: 0, r: 0 })
        );
    }

    #[test]
    fn test_from_layout_rejects_out_of_range_number() {
        let tiles = vec![
            Tile::producing(HexCoord::new(0, 0), Resource::Brick, 5),
            Tile::producing(HexCoord::new(1, 0), Resource::Grain, 13),
        ];
        assert_eq!(
            Board::from_layout(tiles),
            Err(BoardError::NumberOutOfRange {
                q: 1,
                r: 0,
                number: 13
            })
        );

        let tiles = vec![Tile::producing(HexCoord::new(0, 0), Resource::Ore, 1)];
        assert!(matches!(
            Board::from_layout(tiles),
            Err(BoardError::NumberOutOfRange { number: 1, .. })
        ));
    }

    #[test]
    fn test_boards_compare_equal_by_value() {
        let a = Board::standard_with_rng(&mut StdRng::seed_from_u64(13));
        let b = Board::standard_with_rng(&mut StdRng::seed_from_u64(13));
        assert_eq!(a, b);

        let mut c = b.clone();
        let target = STANDARD_COORDS
            .into_iter()
            .find(|coord| *coord != c.robber_location())
            .unwrap();
        c.move_robber(target);
        assert_ne!(a, c);
    }

    #[test]
    fn test_from_layout_places_robber_on_desert() {
        let tiles = vec![
            Tile::producing(HexCoord::new(0, 0), Resource::Brick, 5),
            Tile::desert(HexCoord::new(1, 0)),
        ];
        let board = Board::from_layout(tiles).unwrap();
        assert_eq!(board.robber_location(), HexCoord::new(1, 0));
        assert!(board.tile_at(1, 0).unwrap().has_robber);
        assert!(!board.tile_at(0, 0).unwrap().has_robber);
    }

    #[test]
    fn test_move_robber() {
        let mut board = Board::standard();
        let old = board.robber_location();
        let target = STANDARD_COORDS
            .into_iter()
            .find(|c| *c != old)
            .unwrap();

        assert!(board.move_robber(target));
        assert_eq!(board.robber_location(), target);
        assert!(board.tile_at(target.q, target.r).unwrap().has_robber);
        assert!(!board.tile_at(old.q, old.r).unwrap().has_robber);

        // Off-board move is rejected without state change
        assert!(!board.move_robber(HexCoord::new(9, 9)));
        assert_eq!(board.robber_location(), target);
    }

    #[test]
    fn test_board_json_round_trip() {
        let board = Board::standard();
        let json = serde_json::to_string(&board.to_json_friendly()).unwrap();
        let parsed: BoardJson = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tiles.len(), 19);
        assert_eq!(parsed.robber_q, board.robber_location().q);
    }
}
