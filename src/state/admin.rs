//! Admin operations over the game registries.
//!
//! [`AdminManager`] owns the four registries and is the only place that
//! changes more than one of them at a time. Game-state changes are a
//! dispatch table from the requested [`GameState`] to a list of
//! [`TransitionEffect`]s; the table is keyed on the target only, so any phase
//! can be requested from any phase.
//!
//! # Transition Table
//!
//! ```text
//! target               effects
//! ───────────────────  ────────────────────────────────────────────────
//! INITIALIZING         ResetGame, ResetPlayers, ResetPacdots, ClearTags
//! IN_PROGRESS          StartGame, StartPlayersFromReady
//! PAUSED               PauseGame
//! FINISHED_PACMAN_WIN  SetWinnerPacman
//! FINISHED_GHOSTS_WIN  SetWinnerGhosts, CapturePacman
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use super::coordinate::Coordinate;
use super::game::{GameState, GameStateRegistry};
use super::pacdot::PacdotRegistry;
use super::player::{Name, PlayerRegistry, PlayerStatus};
use super::tag::TagRegistry;
use crate::config::AdminConfig;

/// Admin errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// The request contradicts the current player state
    Conflict { reason: String },
    UnknownGameState(String),
    UnknownPlayerName(String),
    UnknownPlayerState(String),
    /// Malformed console command
    InvalidCommand(String),
    Config(String),
}

impl AdminError {
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { reason } => write!(f, "Conflict: {}", reason),
            Self::UnknownGameState(s) => write!(f, "Unknown game state: {}", s),
            Self::UnknownPlayerName(s) => write!(f, "Unknown player name: {}", s),
            Self::UnknownPlayerState(s) => write!(f, "Unknown player state: {}", s),
            Self::InvalidCommand(s) => write!(f, "Invalid command: {}", s),
            Self::Config(s) => write!(f, "Invalid configuration: {}", s),
        }
    }
}

impl std::error::Error for AdminError {}

/// A single registry mutation performed as part of a game-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    ResetGame,
    ResetPlayers,
    ResetPacdots,
    ClearTags,
    StartGame,
    StartPlayersFromReady,
    PauseGame,
    SetWinnerPacman,
    SetWinnerGhosts,
    CapturePacman,
}

/// Effects applied, in order, when `target` is requested.
pub fn transition_effects(target: GameState) -> &'static [TransitionEffect] {
    use TransitionEffect::*;

    match target {
        GameState::Initializing => &[ResetGame, ResetPlayers, ResetPacdots, ClearTags],
        GameState::InProgress => &[StartGame, StartPlayersFromReady],
        GameState::Paused => &[PauseGame],
        GameState::FinishedPacmanWin => &[SetWinnerPacman],
        GameState::FinishedGhostsWin => &[SetWinnerGhosts, CapturePacman],
    }
}

/// Owner of every registry, exposing the admin operations.
#[derive(Debug, Clone)]
pub struct AdminManager {
    pub game: GameStateRegistry,
    pub pacdots: PacdotRegistry,
    pub players: PlayerRegistry,
    pub tags: TagRegistry,
}

impl Default for AdminManager {
    /// Fresh registries on the built-in board.
    fn default() -> Self {
        Self::from_config(&AdminConfig::default())
    }
}

impl AdminManager {
    pub fn new(
        game: GameStateRegistry,
        pacdots: PacdotRegistry,
        players: PlayerRegistry,
        tags: TagRegistry,
    ) -> Self {
        Self {
            game,
            pacdots,
            players,
            tags,
        }
    }

    /// Fresh registries with the configured board.
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(
            GameStateRegistry::new(),
            PacdotRegistry::from_layout(&config.board),
            PlayerRegistry::new(),
            TagRegistry::new(),
        )
    }

    /// Move the game to `target` and apply its side effects.
    ///
    /// Total over [`GameState`]; the current phase is not checked.
    pub fn change_game_state(&mut self, target: GameState) {
        let previous = self.game.state();
        info!(from = %previous, to = %target, "changing game state");

        for effect in transition_effects(target) {
            self.apply_effect(*effect);
        }
    }

    fn apply_effect(&mut self, effect: TransitionEffect) {
        debug!(?effect, "applying transition effect");

        match effect {
            TransitionEffect::ResetGame => self.game.reset_game(),
            TransitionEffect::ResetPlayers => self.players.reset(),
            TransitionEffect::ResetPacdots => self.pacdots.reset_pacdots(),
            TransitionEffect::ClearTags => self.tags.clear_tags(),
            TransitionEffect::StartGame => self.game.start_game(),
            TransitionEffect::StartPlayersFromReady => {
                let started = self.players.start_from_ready();
                debug!(?started, "players started from ready");
            }
            TransitionEffect::PauseGame => self.game.pause_game(),
            TransitionEffect::SetWinnerPacman => self.game.set_winner_pacman(),
            TransitionEffect::SetWinnerGhosts => self.game.set_winner_ghosts(),
            TransitionEffect::CapturePacman => self
                .players
                .set_player_state(Name::Pacman, PlayerStatus::Captured),
        }
    }

    /// Mark every pacdot uneaten.
    pub fn reset_pacdots(&mut self) {
        self.pacdots.reset_pacdots();
        info!(count = self.pacdots.count(), "pacdots reset");
    }

    /// Validate and apply a player state change.
    pub fn set_player_state(&mut self, name: Name, state: PlayerStatus) -> Result<(), AdminError> {
        let current = self.players.player_state(name);

        if let Err(error) = validate_player_state(name, current, state) {
            warn!(player = %name, from = %current, to = %state, %error, "rejected player state change");
            return Err(error);
        }

        info!(player = %name, from = %current, to = %state, "changing player state");
        self.players.set_player_state(name, state);
        Ok(())
    }

    /// Select a role, placing it on the board.
    pub fn select_player(&mut self, name: Name, location: Coordinate) -> Result<(), AdminError> {
        self.players.select(name, location).inspect_err(|error| {
            warn!(player = %name, %error, "rejected player selection");
        })?;
        info!(player = %name, %location, "player selected");
        Ok(())
    }

    /// Return a role to the unselected pool.
    pub fn deselect_player(&mut self, name: Name) -> Result<(), AdminError> {
        self.players.deselect(name).inspect_err(|error| {
            warn!(player = %name, %error, "rejected player removal");
        })?;
        info!(player = %name, "player deselected");
        Ok(())
    }

    pub fn set_player_location(
        &mut self,
        name: Name,
        location: Coordinate,
    ) -> Result<(), AdminError> {
        self.players.set_location(name, location)?;
        debug!(player = %name, %location, "player moved");
        Ok(())
    }

    /// Record that `tagger` caught `tagged`.
    ///
    /// One side must be Pacman and the other a ghost.
    pub fn record_tag(&mut self, tagger: Name, tagged: Name) -> Result<(), AdminError> {
        if tagger.is_pacman() == tagged.is_pacman() {
            return Err(AdminError::conflict(format!(
                "Player {} cannot tag {}; tags are between Pacman and a ghost.",
                tagger, tagged
            )));
        }
        for name in [tagger, tagged] {
            if !self.players.player_state(name).is_selected() {
                return Err(AdminError::conflict(format!(
                    "Player {} has not been selected.",
                    name
                )));
            }
        }

        self.tags.add_tag(tagger, tagged);
        info!(%tagger, %tagged, "tag recorded");
        Ok(())
    }

    /// Full admin view as JSON.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "game": self.game.to_json(),
            "players": self.players.to_json(),
            "pacdots": self.pacdots.to_json(),
            "tags": self.tags.to_json()
        })
    }
}

/// Player state rules, checked in order.
pub fn validate_player_state(
    name: Name,
    current: PlayerStatus,
    requested: PlayerStatus,
) -> Result<(), AdminError> {
    if current == PlayerStatus::Uninitialized && requested != current {
        return Err(AdminError::conflict(
            "This operation cannot change the state of an unselected player; \
             use the player selection operation instead.",
        ));
    }

    if requested == PlayerStatus::Uninitialized && requested != current {
        return Err(AdminError::conflict(
            "This operation cannot change the state of a selected player to \
             uninitialized; use the player removal operation instead.",
        ));
    }

    if requested == PlayerStatus::Powerup && !name.is_pacman() {
        return Err(AdminError::conflict(format!(
            "The POWERUP state is not valid for {}.",
            name
        )));
    }

    Ok(())
}

/// Thread-safe handle to an [`AdminManager`].
///
/// Every call holds one lock for its whole duration, so a reader never sees
/// a multi-registry transition half applied.
#[derive(Debug, Clone, Default)]
pub struct SharedAdmin {
    inner: Arc<Mutex<AdminManager>>,
}

impl SharedAdmin {
    pub fn new(manager: AdminManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AdminManager> {
        // No public method leaves a registry half written before it can panic.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` inside the critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut AdminManager) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn change_game_state(&self, target: GameState) {
        self.lock().change_game_state(target);
    }

    pub fn reset_pacdots(&self) {
        self.lock().reset_pacdots();
    }

    pub fn set_player_state(&self, name: Name, state: PlayerStatus) -> Result<(), AdminError> {
        self.lock().set_player_state(name, state)
    }

    pub fn snapshot(&self) -> serde_json::Value {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn here() -> Coordinate {
        Coordinate::new(34.07, -118.44)
    }

    fn make_manager() -> AdminManager {
        AdminManager::from_config(&AdminConfig::default())
    }

    #[test]
    fn test_effect_table() {
        use TransitionEffect::*;

        assert_eq!(
            transition_effects(GameState::Initializing),
            &[ResetGame, ResetPlayers, ResetPacdots, ClearTags]
        );
        assert_eq!(
            transition_effects(GameState::InProgress),
            &[StartGame, StartPlayersFromReady]
        );
        assert_eq!(transition_effects(GameState::Paused), &[PauseGame]);
        assert_eq!(
            transition_effects(GameState::FinishedPacmanWin),
            &[SetWinnerPacman]
        );
        assert_eq!(
            transition_effects(GameState::FinishedGhostsWin),
            &[SetWinnerGhosts, CapturePacman]
        );
    }

    #[test]
    fn test_uninitialized_player_cannot_change_state() {
        let mut admin = make_manager();

        for state in PlayerStatus::ALL {
            for name in Name::ALL {
                let result = admin.set_player_state(name, state);
                if state == PlayerStatus::Uninitialized {
                    assert!(result.is_ok());
                } else {
                    assert!(result.unwrap_err().is_conflict());
                }
                assert_eq!(admin.players.player_state(name), PlayerStatus::Uninitialized);
            }
        }
    }

    #[test]
    fn test_selected_player_cannot_become_uninitialized() {
        let mut admin = make_manager();
        admin.select_player(Name::Inky, here()).unwrap();

        let err = admin
            .set_player_state(Name::Inky, PlayerStatus::Uninitialized)
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(admin.players.player_state(Name::Inky), PlayerStatus::Ready);
    }

    #[test]
    fn test_powerup_only_for_pacman() {
        let mut admin = make_manager();
        for name in Name::ALL {
            admin.select_player(name, here()).unwrap();
        }

        for ghost in Name::ALL.into_iter().filter(Name::is_ghost) {
            let err = admin
                .set_player_state(ghost, PlayerStatus::Powerup)
                .unwrap_err();
            assert!(err.is_conflict());
            assert_eq!(admin.players.player_state(ghost), PlayerStatus::Ready);
        }

        admin
            .set_player_state(Name::Pacman, PlayerStatus::Powerup)
            .unwrap();
        assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Powerup);
    }

    #[test]
    fn test_rule_order() {
        // Unselected ghost asking for POWERUP hits the selection rule first
        let err = validate_player_state(
            Name::Clyde,
            PlayerStatus::Uninitialized,
            PlayerStatus::Powerup,
        )
        .unwrap_err();
        assert!(err.to_string().contains("selection"));

        let err = validate_player_state(Name::Clyde, PlayerStatus::Active, PlayerStatus::Powerup)
            .unwrap_err();
        assert!(err.to_string().contains("POWERUP"));

        assert!(
            validate_player_state(Name::Clyde, PlayerStatus::Active, PlayerStatus::Captured)
                .is_ok()
        );
    }

    #[test]
    fn test_initializing_resets_everything() {
        let mut admin = make_manager();
        admin.select_player(Name::Pacman, here()).unwrap();
        admin.select_player(Name::Blinky, here()).unwrap();
        admin.change_game_state(GameState::InProgress);
        let first = admin.pacdots.pacdots()[0].location;
        admin.pacdots.eat_pacdot(first);
        admin.record_tag(Name::Blinky, Name::Pacman).unwrap();

        admin.change_game_state(GameState::Initializing);

        assert_eq!(admin.game.state(), GameState::Initializing);
        assert!(admin.game.started_at.is_none());
        assert_eq!(admin.players.selected_count(), 0);
        assert_eq!(admin.pacdots.eaten_count(), 0);
        assert_eq!(admin.tags.count(), 0);
    }

    #[test]
    fn test_in_progress_starts_ready_players() {
        let mut admin = make_manager();
        admin.select_player(Name::Pacman, here()).unwrap();
        admin.select_player(Name::Pinky, here()).unwrap();

        admin.change_game_state(GameState::InProgress);

        assert_eq!(admin.game.state(), GameState::InProgress);
        assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Active);
        assert_eq!(admin.players.player_state(Name::Pinky), PlayerStatus::Active);
        assert_eq!(admin.players.player_state(Name::Inky), PlayerStatus::Uninitialized);
    }

    #[test]
    fn test_paused_has_no_side_effects() {
        let mut admin = make_manager();
        admin.select_player(Name::Pacman, here()).unwrap();
        let first = admin.pacdots.pacdots()[0].location;
        admin.pacdots.eat_pacdot(first);

        admin.change_game_state(GameState::Paused);

        assert_eq!(admin.game.state(), GameState::Paused);
        assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Ready);
        assert_eq!(admin.pacdots.eaten_count(), 1);
    }

    #[test]
    fn test_ghosts_win_captures_pacman() {
        for prior in [
            PlayerStatus::Uninitialized,
            PlayerStatus::Ready,
            PlayerStatus::Active,
            PlayerStatus::Powerup,
        ] {
            let mut admin = make_manager();
            admin.players.set_player_state(Name::Pacman, prior);

            admin.change_game_state(GameState::FinishedGhostsWin);

            assert_eq!(admin.game.state(), GameState::FinishedGhostsWin);
            assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Captured);
        }
    }

    #[test]
    fn test_pacman_win_leaves_players_alone() {
        let mut admin = make_manager();
        admin.select_player(Name::Pacman, here()).unwrap();
        admin.change_game_state(GameState::InProgress);

        admin.change_game_state(GameState::FinishedPacmanWin);

        assert_eq!(admin.game.state(), GameState::FinishedPacmanWin);
        assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Active);
    }

    #[test]
    fn test_any_target_accepted_from_any_state() {
        for from in GameState::ALL {
            for to in GameState::ALL {
                let mut admin = make_manager();
                admin.change_game_state(from);
                admin.change_game_state(to);
                assert_eq!(admin.game.state(), to);
            }
        }
    }

    #[test]
    fn test_record_tag_requires_selected_players() {
        let mut admin = make_manager();
        admin.select_player(Name::Blinky, here()).unwrap();

        assert!(admin.record_tag(Name::Blinky, Name::Pacman).is_err());
        assert!(admin.record_tag(Name::Blinky, Name::Blinky).is_err());

        admin.select_player(Name::Pacman, here()).unwrap();
        admin.record_tag(Name::Blinky, Name::Pacman).unwrap();
        assert_eq!(admin.tags.count(), 1);
    }

    #[test]
    fn test_record_tag_rejects_same_side() {
        let mut admin = make_manager();
        for name in Name::ALL {
            admin.select_player(name, here()).unwrap();
        }

        let err = admin.record_tag(Name::Inky, Name::Clyde).unwrap_err();
        assert!(err.is_conflict());
        assert!(admin.record_tag(Name::Pacman, Name::Pacman).is_err());
        assert_eq!(admin.tags.count(), 0);

        admin.record_tag(Name::Pacman, Name::Clyde).unwrap();
        admin.record_tag(Name::Inky, Name::Pacman).unwrap();
        assert_eq!(admin.tags.count(), 2);
    }

    #[test]
    fn test_default_manager_has_configured_board() {
        let admin = AdminManager::default();
        let configured = AdminManager::from_config(&AdminConfig::default());

        assert_eq!(admin.pacdots.count(), configured.pacdots.count());
        assert!(admin.pacdots.count() > 0);

        let shared = SharedAdmin::default();
        assert_eq!(
            shared.snapshot()["pacdots"]["total"],
            configured.pacdots.count()
        );
    }

    #[test]
    fn test_captured_unselected_pacman_must_be_deselected() {
        let mut admin = make_manager();

        admin.change_game_state(GameState::FinishedGhostsWin);
        assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Captured);
        assert_eq!(admin.players.get(Name::Pacman).location, None);

        // Captured counts as selected, so selection is refused
        assert!(admin.select_player(Name::Pacman, here()).unwrap_err().is_conflict());
        assert!(admin
            .set_player_state(Name::Pacman, PlayerStatus::Uninitialized)
            .unwrap_err()
            .is_conflict());

        admin.deselect_player(Name::Pacman).unwrap();
        assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Uninitialized);

        admin.select_player(Name::Pacman, here()).unwrap();
        assert_eq!(admin.players.player_state(Name::Pacman), PlayerStatus::Ready);
        assert_eq!(admin.players.get(Name::Pacman).location, Some(here()));
    }

    #[test]
    fn test_shared_admin() {
        let shared = SharedAdmin::new(make_manager());
        let other = shared.clone();

        shared
            .with(|admin| admin.select_player(Name::Pacman, here()))
            .unwrap();
        other.change_game_state(GameState::InProgress);

        let snapshot = shared.snapshot();
        assert_eq!(snapshot["game"]["state"], "IN_PROGRESS");
        assert_eq!(snapshot["players"][0]["state"], "ACTIVE");
    }
}
