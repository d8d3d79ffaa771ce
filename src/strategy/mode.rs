//! Coordination mode tags.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::centralized::CentralizedStrategy;
use super::cooperative::CooperativeStrategy;
use super::decentralized::DecentralizedStrategy;
use super::CoordinationStrategy;
use crate::task::TaskBoard;

/// Which coordination strategy drives a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Task locations are known; one authoritative pass assigns them to free robots.
    #[default]
    Centralized,
    /// Robots explore and share visited cells and found tasks.
    Cooperative,
    /// Robots explore alone with private memory only.
    Decentralized,
}

impl Mode {
    /// Returns all modes.
    pub fn all() -> [Mode; 3] {
        [Mode::Centralized, Mode::Cooperative, Mode::Decentralized]
    }

    /// Builds the strategy for this mode over the given tasks.
    pub fn strategy(&self, tasks: &TaskBoard) -> Box<dyn CoordinationStrategy> {
        match self {
            Mode::Centralized => Box::new(CentralizedStrategy::new(tasks)),
            Mode::Cooperative => Box::new(CooperativeStrategy::new()),
            Mode::Decentralized => Box::new(DecentralizedStrategy::new()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Centralized => write!(f, "centralized"),
            Mode::Cooperative => write!(f, "cooperative"),
            Mode::Decentralized => write!(f, "decentralized"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown mode '{0}'; expected centralized, cooperative or decentralized")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Accepts the mode names and the menu labels they replace (`information`,
    /// `cooperation`, `mute`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "centralized" | "information" => Ok(Mode::Centralized),
            "cooperative" | "cooperation" => Ok(Mode::Cooperative),
            "decentralized" | "mute" => Ok(Mode::Decentralized),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("centralized".parse::<Mode>(), Ok(Mode::Centralized));
        assert_eq!("Information".parse::<Mode>(), Ok(Mode::Centralized));
        assert_eq!("COOPERATIVE".parse::<Mode>(), Ok(Mode::Cooperative));
        assert_eq!("cooperation".parse::<Mode>(), Ok(Mode::Cooperative));
        assert_eq!(" mute ".parse::<Mode>(), Ok(Mode::Decentralized));
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "swarm".parse::<Mode>().unwrap_err();
        assert_eq!(err, ParseModeError("swarm".into()));
        assert!(err.to_string().contains("swarm"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mode in Mode::all() {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn strategy_reports_its_mode() {
        let tasks = TaskBoard::new(vec![]);
        for mode in Mode::all() {
            assert_eq!(mode.strategy(&tasks).mode(), mode);
        }
    }
}
