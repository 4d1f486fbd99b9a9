//! Game session shell: players, board, graph, and turn rotation.
//!
//! Deliberately thin. Dice and turn order live here; rule enforcement does
//! not.

use crate::board::{Board, PlayerId};
use crate::graph::IntersectionGraph;
use crate::hex::HexCoord;
use crate::player::Player;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// All players
    pub players: Vec<Player>,
    /// The game board
    pub board: Board,
    /// Graph derived from the board at session start
    pub graph: IntersectionGraph,
    /// Index of the player whose turn it is
    pub current_turn: usize,
}

impl Game {
    /// Create a game with a standard randomized board
    pub fn new(num_players: usize) -> Self {
        let mut rng = rand::thread_rng();
        Self::with_rng(num_players, &mut rng)
    }

    /// Create a game with a provided RNG for deterministic board generation
    pub fn with_rng<R: Rng>(num_players: usize, rng: &mut R) -> Self {
        assert!(num_players > 0, "game needs at least one player");

        let board = Board::standard_with_rng(rng);
        let graph = IntersectionGraph::from_board(&board);
        let players = (0..num_players).map(|i| Player::new(i as PlayerId)).collect();

        Self {
            players,
            board,
            graph,
            current_turn: 0,
        }
    }

    /// The tile the robber currently occupies
    pub fn robber_tile(&self) -> HexCoord {
        self.board.robber_location()
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_turn]
    }

    /// Mutable access to the player whose turn it is
    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_turn]
    }

    /// Advance to the next player's turn, wrapping around
    pub fn next_turn(&mut self) {
        self.current_turn = (self.current_turn + 1) % self.players.len();
    }

    /// Roll two dice and return their sum (2-12)
    pub fn roll_dice(&self) -> u8 {
        let mut rng = rand::thread_rng();
        self.roll_dice_with_rng(&mut rng)
    }

    /// Roll two dice with a provided RNG
    pub fn roll_dice_with_rng<R: Rng>(&self, rng: &mut R) -> u8 {
        rng.gen_range(1..=6) + rng.gen_range(1..=6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Terrain;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_game_state() {
        let game = Game::new(4);
        assert_eq!(game.players.len(), 4);
        assert_eq!(game.current_turn, 0);
        assert_eq!(game.graph.node_count(), 54);
        assert_eq!(game.graph.edge_count(), 72);
    }

    #[test]
    fn test_robber_starts_on_desert() {
        let game = Game::new(3);
        let robber = game.robber_tile();
        let tile = game.board.tile_at(robber.q, robber.r).unwrap();
        assert!(matches!(tile.terrain, Terrain::Desert));
        assert!(tile.has_robber);
    }

    #[test]
    fn test_next_turn_wraps() {
        let mut game = Game::new(3);
        assert_eq!(game.current_player().id, 0);
        game.next_turn();
        game.next_turn();
        assert_eq!(game.current_turn, 2);
        game.next_turn();
        assert_eq!(game.current_turn, 0, "turn index wraps modulo player count");
    }

    #[test]
    fn test_roll_dice_range() {
        let game = Game::new(2);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let roll = game.roll_dice_with_rng(&mut rng);
            assert!((2..=12).contains(&roll), "roll {} out of range", roll);
        }
    }

    #[test]
    fn test_roll_dice_hits_extremes() {
        // With 2000 seeded rolls both 2 and 12 appear (p ~ 1/36 each).
        let game = Game::new(2);
        let mut rng = StdRng::seed_from_u64(7);
        let rolls: Vec<u8> = (0..2000).map(|_| game.roll_dice_with_rng(&mut rng)).collect();
        assert!(rolls.contains(&2));
        assert!(rolls.contains(&12));
        assert!(rolls.contains(&7));
    }

    #[test]
    fn test_seeded_games_match() {
        let a = Game::with_rng(2, &mut StdRng::seed_from_u64(11));
        let b = Game::with_rng(2, &mut StdRng::seed_from_u64(11));
        assert_eq!(a.board.tiles(), b.board.tiles());
    }
}
