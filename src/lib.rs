//! Pacmacro State Library
//!
//! This crate provides the admin/control state for Pacmacro, a pacman versus
//! ghosts tag game played on a real-world map.
//!
//! # Overview
//!
//! - **Game State** - The single phase of the match (initializing, in
//!   progress, paused, finished) and the side effects each phase change
//!   applies to the other registries.
//!
//! - **Player Roster** - One entry per role with validated state changes.
//!   Selection and removal are separate operations from state changes.
//!
//! - **Pacdots** - The fixed set of board pacdots and their eaten flags.
//!
//! - **Tags** - Who caught whom, cleared when the game is reset.
//!
//! # Design Principles
//!
//! 1. **Registries own data, the admin manager owns decisions** - Registries
//!    mutate without checking; [`AdminManager`] validates first.
//!
//! 2. **One lock per operation** - [`SharedAdmin`] runs every admin call as a
//!    single critical section.
//!
//! 3. **No networking** - This crate is pure state; transports call into it.
//!
//! # Example
//!
//! ```rust
//! use pacmacro_state::{AdminConfig, AdminManager, Coordinate, GameState, Name, PlayerStatus};
//!
//! let mut admin = AdminManager::from_config(&AdminConfig::default());
//!
//! // Unselected players can't be moved through the generic setter
//! assert!(admin.set_player_state(Name::Pacman, PlayerStatus::Ready).is_err());
//!
//! admin.select_player(Name::Pacman, Coordinate::new(34.07, -118.44)).unwrap();
//! admin.set_player_state(Name::Pacman, PlayerStatus::Powerup).unwrap();
//!
//! admin.change_game_state(GameState::FinishedGhostsWin);
//! assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Captured);
//! ```

pub mod command;
pub mod config;
pub mod state;

pub use config::{AdminConfig, BoardConfig, PacdotConfig};

// Re-export everything from state module at crate root
pub use state::*;
