//! State management module for Pacmacro.
//!
//! This module provides the core state types and registries:
//!
//! - `game` - The single game phase and its timestamps
//! - `player` - Roster of roles and their states
//! - `pacdot` - Board pacdots and their eaten flags
//! - `tag` - History of captures
//! - `admin` - Cross-registry admin operations and validation
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                    SharedAdmin (Arc<Mutex<_>>)                        │
//! │  ┌────────────────────────────────────────────────────────────────┐  │
//! │  │                        AdminManager                            │  │
//! │  │                                                                │  │
//! │  │  ┌──────────────┐ ┌──────────────┐ ┌────────────┐ ┌─────────┐  │  │
//! │  │  │GameStateReg. │ │PlayerRegistry│ │PacdotReg.  │ │TagReg.  │  │  │
//! │  │  │              │ │              │ │            │ │         │  │  │
//! │  │  │ GameState    │ │ Name →       │ │ [Pacdot]   │ │ [Tag]   │  │  │
//! │  │  │ started_at   │ │   Player     │ │            │ │         │  │  │
//! │  │  │ finished_at  │ │              │ │            │ │         │  │  │
//! │  │  └──────────────┘ └──────────────┘ └────────────┘ └─────────┘  │  │
//! │  └────────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pacmacro_state::state::{AdminManager, Coordinate, GameState, Name, PlayerStatus};
//!
//! let mut admin = AdminManager::default();
//! admin.select_player(Name::Pacman, Coordinate::new(34.07, -118.44))?;
//! admin.set_player_state(Name::Pacman, PlayerStatus::Powerup)?;
//! admin.change_game_state(GameState::FinishedGhostsWin);
//! ```

pub mod admin;
pub mod coordinate;
pub mod game;
pub mod pacdot;
pub mod player;
pub mod tag;

// Re-export commonly used types
pub use admin::{
    transition_effects, validate_player_state, AdminError, AdminManager, SharedAdmin,
    TransitionEffect,
};
pub use coordinate::Coordinate;
pub use game::{GameState, GameStateRegistry};
pub use pacdot::{Pacdot, PacdotRegistry};
pub use player::{Name, Player, PlayerRegistry, PlayerStatus};
pub use tag::{Tag, TagRegistry};
