//! Game state representation.
//!
//! Holds the complete snapshot of a Pig game at a given point in time:
//! banked scores, the at-risk turn score, whose turn it is, game status,
//! winner, and the last die face shown.

/// Score a player must reach (by holding) to win the game.
pub const WINNING_SCORE: u32 = 100;

/// One of the two participants in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Returns the display label used by the table renderer and game log.
    pub const fn label(self) -> &'static str {
        match self {
            Player::Human => "You",
            Player::Computer => "Gemini",
        }
    }
}

/// The lifecycle status of a game.
///
/// `Idle` means no scoring roll has been made yet this game. A bust does
/// not promote `Idle` to `Playing`; only a 2-6 roll does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Idle,
    Playing,
    Finished,
}

/// Complete game state at a point in time.
///
/// Scores use a fixed-size array indexed by `Player as usize`. The record
/// is owned exclusively by the engine; all mutation goes through the
/// transition functions in [`crate::game::turn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Banked score per player, indexed by `Player as usize`.
    pub scores: [u32; 2],
    /// Points accumulated this turn, lost on a roll of 1.
    pub current_turn_score: u32,
    pub active_player: Player,
    pub status: GameStatus,
    pub winner: Option<Player>,
    /// Most recent die face, 1 before any roll.
    pub last_roll: u8,
}

impl GameState {
    /// Creates the initial state: both scores 0, human to move, no roll yet.
    pub fn new() -> Self {
        GameState {
            scores: [0, 0],
            current_turn_score: 0,
            active_player: Player::Human,
            status: GameStatus::Idle,
            winner: None,
            last_roll: 1,
        }
    }

    /// Returns a player's banked score.
    pub fn score(&self, player: Player) -> u32 {
        self.scores[player as usize]
    }

    /// Returns true once a player has banked past the winning threshold.
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
