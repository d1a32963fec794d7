//! Pacdot board state.
//!
//! The set of pacdots is fixed by the board layout; only the `eaten` flag
//! changes during play.

use super::coordinate::Coordinate;
use crate::config::BoardConfig;

/// A collectible point on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Pacdot {
    pub location: Coordinate,
    pub powerdot: bool,
    pub eaten: bool,
}

impl Pacdot {
    pub fn new(location: Coordinate, powerdot: bool) -> Self {
        Self {
            location,
            powerdot,
            eaten: false,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "location": self.location.to_json(),
            "powerdot": self.powerdot,
            "eaten": self.eaten
        })
    }
}

/// Owner of every pacdot on the board.
#[derive(Debug, Clone, Default)]
pub struct PacdotRegistry {
    pacdots: Vec<Pacdot>,
}

impl PacdotRegistry {
    pub fn new(pacdots: Vec<Pacdot>) -> Self {
        Self { pacdots }
    }

    /// Build the board from configuration. Every dot starts uneaten.
    pub fn from_layout(board: &BoardConfig) -> Self {
        let pacdots = board
            .pacdots
            .iter()
            .map(|dot| Pacdot::new(dot.location, dot.powerdot))
            .collect();
        Self { pacdots }
    }

    /// All pacdots, eaten or not.
    pub fn pacdots(&self) -> &[Pacdot] {
        &self.pacdots
    }

    /// Mark every pacdot uneaten.
    pub fn reset_pacdots(&mut self) {
        for pacdot in &mut self.pacdots {
            pacdot.eaten = false;
        }
    }

    /// Eat the uneaten pacdot at `location`, if there is one.
    pub fn eat_pacdot(&mut self, location: Coordinate) -> Option<&Pacdot> {
        let pacdot = self
            .pacdots
            .iter_mut()
            .find(|p| !p.eaten && p.location == location)?;
        pacdot.eaten = true;
        Some(pacdot)
    }

    pub fn count(&self) -> usize {
        self.pacdots.len()
    }

    pub fn eaten_count(&self) -> usize {
        self.pacdots.iter().filter(|p| p.eaten).count()
    }

    pub fn uneaten_count(&self) -> usize {
        self.count() - self.eaten_count()
    }

    pub fn all_eaten(&self) -> bool {
        self.pacdots.iter().all(|p| p.eaten)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "total": self.count(),
            "eaten": self.eaten_count(),
            "pacdots": self.pacdots.iter().map(|p| p.to_json()).collect::<Vec<_>>()
        })
    }
}
