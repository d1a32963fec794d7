//! Game state management.
//!
//! Holds the single authoritative phase of the match plus the timestamps of
//! its lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::admin::AdminError;

/// Game lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Players are being selected
    #[default]
    Initializing,
    /// Game in progress
    InProgress,
    /// Temporarily halted
    Paused,
    /// Pacman won
    FinishedPacmanWin,
    /// The ghosts won
    FinishedGhostsWin,
}

impl GameState {
    pub const ALL: [GameState; 5] = [
        GameState::Initializing,
        GameState::InProgress,
        GameState::Paused,
        GameState::FinishedPacmanWin,
        GameState::FinishedGhostsWin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "INITIALIZING",
            Self::InProgress => "IN_PROGRESS",
            Self::Paused => "PAUSED",
            Self::FinishedPacmanWin => "FINISHED_PACMAN_WIN",
            Self::FinishedGhostsWin => "FINISHED_GHOSTS_WIN",
        }
    }

    /// Check if game is active (can receive player actions).
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Check if a winner has been declared.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::FinishedPacmanWin | Self::FinishedGhostsWin)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameState {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AdminError::UnknownGameState(s.to_string()))
    }
}

/// Owner of the game phase.
#[derive(Debug, Clone, Default)]
pub struct GameStateRegistry {
    state: GameState,

    /// When the game first left Initializing for InProgress
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When a winner was declared
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl GameStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Back to Initializing, clearing timestamps.
    pub fn reset_game(&mut self) {
        *self = Self::default();
    }

    pub fn start_game(&mut self) {
        self.state = GameState::InProgress;
        if self.started_at.is_none() {
            self.started_at = Some(chrono::Utc::now());
        }
    }

    pub fn pause_game(&mut self) {
        self.state = GameState::Paused;
    }

    pub fn set_winner_pacman(&mut self) {
        self.finish(GameState::FinishedPacmanWin);
    }

    pub fn set_winner_ghosts(&mut self) {
        self.finish(GameState::FinishedGhostsWin);
    }

    fn finish(&mut self, state: GameState) {
        self.state = state;
        self.finished_at = Some(chrono::Utc::now());
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "state": self.state.as_str(),
            "started_at": self.started_at.map(|t| t.to_rfc3339()),
            "finished_at": self.finished_at.map(|t| t.to_rfc3339())
        })
    }
}
