//! Line-oriented admin commands.
//!
//! Parses the console text protocol and runs each command against a
//! [`SharedAdmin`].

use crate::state::{AdminError, Coordinate, GameState, Name, PlayerStatus, SharedAdmin};

/// A parsed admin command.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    Help,
    Show,
    ResetPacdots,
    ChangeGameState(GameState),
    SetPlayerState(Name, PlayerStatus),
    Select(Name, Coordinate),
    Deselect(Name),
    Tag { tagger: Name, tagged: Name },
    Quit,
}

/// Parse one console line.
pub fn parse_command(input: &str) -> Result<AdminCommand, AdminError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Err(AdminError::InvalidCommand(String::new()));
    };

    let usage = |text: &str| AdminError::InvalidCommand(format!("usage: {}", text));

    match (first.to_lowercase().as_str(), &parts[1..]) {
        ("help" | "?", []) => Ok(AdminCommand::Help),
        ("show", []) => Ok(AdminCommand::Show),
        ("pacdots", ["reset"]) => Ok(AdminCommand::ResetPacdots),
        ("pacdots", _) => Err(usage("pacdots reset")),
        ("state", [state]) => Ok(AdminCommand::ChangeGameState(state.parse()?)),
        ("state", _) => Err(usage("state <GAME_STATE>")),
        ("player", [name, state]) => {
            Ok(AdminCommand::SetPlayerState(name.parse()?, state.parse()?))
        }
        ("player", _) => Err(usage("player <Name> <STATE>")),
        ("select", [name, lat, lng]) => {
            let coordinate = |s: &str| {
                s.parse::<f64>()
                    .map_err(|_| AdminError::InvalidCommand(format!("not a coordinate: {}", s)))
            };
            Ok(AdminCommand::Select(
                name.parse()?,
                Coordinate::new(coordinate(*lat)?, coordinate(*lng)?),
            ))
        }
        ("select", _) => Err(usage("select <Name> <latitude> <longitude>")),
        ("deselect", [name]) => Ok(AdminCommand::Deselect(name.parse()?)),
        ("deselect", _) => Err(usage("deselect <Name>")),
        ("tag", [tagger, tagged]) => Ok(AdminCommand::Tag {
            tagger: tagger.parse()?,
            tagged: tagged.parse()?,
        }),
        ("tag", _) => Err(usage("tag <tagger> <tagged>")),
        ("quit" | "exit", []) => Ok(AdminCommand::Quit),
        (cmd, _) => Err(AdminError::InvalidCommand(format!("unknown command: {}", cmd))),
    }
}

pub fn help_message() -> &'static str {
    r#"Commands:
  show                          Print the full admin snapshot
  pacdots reset                 Mark every pacdot uneaten
  state <GAME_STATE>            INITIALIZING | IN_PROGRESS | PAUSED |
                                FINISHED_PACMAN_WIN | FINISHED_GHOSTS_WIN
  player <Name> <STATE>         READY | ACTIVE | POWERUP | CAPTURED
  select <Name> <lat> <lng>     Select a role at a location
  deselect <Name>               Return a role to the unselected pool
  tag <tagger> <tagged>         Record a capture
  quit                          Exit"#
}

/// Run a command, returning the JSON reply.
pub fn execute(admin: &SharedAdmin, command: &AdminCommand) -> Result<serde_json::Value, AdminError> {
    match command {
        AdminCommand::Help => return Ok(serde_json::json!({"help": help_message()})),
        AdminCommand::Quit => return Ok(serde_json::json!({"status": "bye"})),
        AdminCommand::Show => {}
        AdminCommand::ResetPacdots => admin.reset_pacdots(),
        AdminCommand::ChangeGameState(state) => admin.change_game_state(*state),
        AdminCommand::SetPlayerState(name, state) => admin.set_player_state(*name, *state)?,
        AdminCommand::Select(name, location) => {
            admin.with(|a| a.select_player(*name, *location))?
        }
        AdminCommand::Deselect(name) => admin.with(|a| a.deselect_player(*name))?,
        AdminCommand::Tag { tagger, tagged } => {
            admin.with(|a| a.record_tag(*tagger, *tagged))?
        }
    }

    Ok(admin.snapshot())
}
