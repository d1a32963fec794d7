//! Player roster and per-player state.
//!
//! Every role (Pacman and the four ghosts) has exactly one entry, created
//! unselected. A player only leaves or re-enters `Uninitialized` through
//! [`PlayerRegistry::select`] and [`PlayerRegistry::deselect`].
//!
//! # State Diagram
//!
//! ```text
//! ┌───────────────┐   select    ┌─────────┐  start_from_ready  ┌──────────┐
//! │ Uninitialized │────────────▶│  Ready  │───────────────────▶│  Active  │
//! └───────────────┘             └─────────┘                    └────┬─────┘
//!         ▲                          │                              │
//!         │ deselect / reset         │      set_state (admin)       ▼
//!         └──────────────────────────┴──────────────── Powerup / Captured
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::admin::AdminError;
use super::coordinate::Coordinate;

/// Player roles. Pacman plays against the four ghosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Name {
    Pacman,
    Inky,
    Blinky,
    Pinky,
    Clyde,
}

impl Name {
    pub const ALL: [Name; 5] = [
        Name::Pacman,
        Name::Inky,
        Name::Blinky,
        Name::Pinky,
        Name::Clyde,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pacman => "Pacman",
            Self::Inky => "Inky",
            Self::Blinky => "Blinky",
            Self::Pinky => "Pinky",
            Self::Clyde => "Clyde",
        }
    }

    pub fn is_pacman(&self) -> bool {
        matches!(self, Self::Pacman)
    }

    pub fn is_ghost(&self) -> bool {
        !self.is_pacman()
    }

    /// Position in [`Name::ALL`].
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Name {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AdminError::UnknownPlayerName(s.to_string()))
    }
}

/// Per-player role status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    /// Not selected by anyone
    #[default]
    Uninitialized,
    /// Selected, waiting for the game to start
    Ready,
    /// Playing
    Active,
    /// Pacman ate a powerdot
    Powerup,
    /// Tagged out
    Captured,
}

impl PlayerStatus {
    pub const ALL: [PlayerStatus; 5] = [
        PlayerStatus::Uninitialized,
        PlayerStatus::Ready,
        PlayerStatus::Active,
        PlayerStatus::Powerup,
        PlayerStatus::Captured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Ready => "READY",
            Self::Active => "ACTIVE",
            Self::Powerup => "POWERUP",
            Self::Captured => "CAPTURED",
        }
    }

    /// Check if someone has selected this role.
    pub fn is_selected(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerStatus {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AdminError::UnknownPlayerState(s.to_string()))
    }
}

/// A single role's entry in the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: Name,
    pub status: PlayerStatus,
    pub location: Option<Coordinate>,
}

impl Player {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            status: PlayerStatus::Uninitialized,
            location: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name.as_str(),
            "state": self.status.as_str(),
            "location": self.location.map(|l| l.to_json())
        })
    }
}

/// Roster of every role, in [`Name::ALL`] order.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    players: [Player; 5],
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerRegistry {
    /// Create a roster with every role unselected.
    pub fn new() -> Self {
        Self {
            players: Name::ALL.map(Player::new),
        }
    }

    /// Get a player.
    pub fn get(&self, name: Name) -> &Player {
        &self.players[name.index()]
    }

    fn get_mut(&mut self, name: Name) -> &mut Player {
        &mut self.players[name.index()]
    }

    /// Current state of a player.
    pub fn player_state(&self, name: Name) -> PlayerStatus {
        self.get(name).status
    }

    /// Overwrite a player's state. No validation happens here.
    pub fn set_player_state(&mut self, name: Name, status: PlayerStatus) {
        self.get_mut(name).status = status;
    }

    /// Select a role: Uninitialized -> Ready.
    pub fn select(&mut self, name: Name, location: Coordinate) -> Result<(), AdminError> {
        let player = self.get_mut(name);
        if player.status.is_selected() {
            return Err(AdminError::conflict(format!(
                "Player {} has already been selected.",
                name
            )));
        }

        player.status = PlayerStatus::Ready;
        player.location = Some(location);
        Ok(())
    }

    /// Deselect a role: any selected state -> Uninitialized.
    pub fn deselect(&mut self, name: Name) -> Result<(), AdminError> {
        let player = self.get_mut(name);
        if !player.status.is_selected() {
            return Err(AdminError::conflict(format!(
                "Player {} has not been selected.",
                name
            )));
        }

        *player = Player::new(name);
        Ok(())
    }

    /// Move a selected player.
    pub fn set_location(&mut self, name: Name, location: Coordinate) -> Result<(), AdminError> {
        let player = self.get_mut(name);
        if !player.status.is_selected() {
            return Err(AdminError::conflict(format!(
                "Player {} must be selected before it can move.",
                name
            )));
        }

        player.location = Some(location);
        Ok(())
    }

    /// Return every player to the unselected default.
    pub fn reset(&mut self) {
        self.players = Name::ALL.map(Player::new);
    }

    /// Move every Ready player to Active. Returns the names that moved.
    pub fn start_from_ready(&mut self) -> Vec<Name> {
        self.players
            .iter_mut()
            .filter(|p| p.status == PlayerStatus::Ready)
            .map(|p| {
                p.status = PlayerStatus::Active;
                p.name
            })
            .collect()
    }

    /// All players in roster order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Number of selected roles.
    pub fn selected_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.status.is_selected())
            .count()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.players.iter().map(|p| p.to_json()).collect())
    }
}
