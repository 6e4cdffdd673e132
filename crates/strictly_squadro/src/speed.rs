//! Speed tables and rule configuration.
//!
//! Each side has one per-lane distance table for each heading. The standard
//! Squadro values are the default; alternative tables can be loaded from
//! TOML.

use super::types::{EDGE, Heading, PIECES_PER_SIDE, Side};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Per-lane step counts for one side.
///
/// Deserialization rejects entries outside `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "RawSpeedTable")]
pub struct SpeedTable {
    /// Distances while heading away from the starting edge.
    outbound: [u8; PIECES_PER_SIDE],
    /// Distances while heading back.
    homebound: [u8; PIECES_PER_SIDE],
}

impl SpeedTable {
    /// Creates a table from outbound and homebound distances.
    pub const fn new(outbound: [u8; PIECES_PER_SIDE], homebound: [u8; PIECES_PER_SIDE]) -> Self {
        Self {
            outbound,
            homebound,
        }
    }

    /// Standard yellow table: down `1 3 2 3 1`, up `3 1 2 1 3`.
    pub const YELLOW: SpeedTable = SpeedTable::new([1, 3, 2, 3, 1], [3, 1, 2, 1, 3]);

    /// Standard red table: left `1 2 3 2 1`, right `3 2 1 2 3`.
    pub const RED: SpeedTable = SpeedTable::new([1, 2, 3, 2, 1], [3, 2, 1, 2, 3]);

    /// Distance for a heading and a lane index in `0..5`.
    pub fn distance(&self, heading: Heading, lane: usize) -> u8 {
        let row = match heading {
            Heading::Outbound => &self.outbound,
            Heading::Homebound => &self.homebound,
        };
        row[lane.min(PIECES_PER_SIDE - 1)]
    }

    fn out_of_range(&self) -> Option<u8> {
        let entries = self.outbound.iter().chain(self.homebound.iter());
        entries.copied().find(|d| !(1..=EDGE).contains(d))
    }

    fn validate(&self, side: Side) -> Result<(), RulesError> {
        match self.out_of_range() {
            Some(bad) => Err(RulesError::new(format!(
                "{side} speed table entry {bad} outside 1..={EDGE}"
            ))),
            None => Ok(()),
        }
    }
}

/// Unchecked wire form of [`SpeedTable`].
#[derive(Deserialize)]
struct RawSpeedTable {
    outbound: [u8; PIECES_PER_SIDE],
    homebound: [u8; PIECES_PER_SIDE],
}

impl TryFrom<RawSpeedTable> for SpeedTable {
    type Error = RulesError;

    fn try_from(raw: RawSpeedTable) -> Result<Self, Self::Error> {
        let table = SpeedTable::new(raw.outbound, raw.homebound);
        match table.out_of_range() {
            Some(bad) => Err(RulesError::new(format!(
                "speed table entry {bad} outside 1..={EDGE}"
            ))),
            None => Ok(table),
        }
    }
}

/// When a piece counts as completed after turning around at an edge.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CompletionRule {
    /// Completes only if the turnaround sets the return flag while the piece
    /// already sits on its home edge. A full return trip flips the flag back
    /// off instead, so ordinary play never completes a piece.
    #[default]
    Literal,
    /// Completes when a returning piece reaches its home edge.
    HomeArrival,
}

/// Rule configuration for a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Yellow speed table.
    yellow: SpeedTable,
    /// Red speed table.
    red: SpeedTable,
    /// Completion condition.
    completion: CompletionRule,
}

impl Rules {
    /// Creates rules from explicit tables.
    ///
    /// # Errors
    ///
    /// Returns `RulesError` if any distance is outside `1..=6`.
    #[instrument]
    pub fn new(
        yellow: SpeedTable,
        red: SpeedTable,
        completion: CompletionRule,
    ) -> Result<Self, RulesError> {
        let rules = Self {
            yellow,
            red,
            completion,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Speed table for a side.
    pub fn table(&self, side: Side) -> &SpeedTable {
        match side {
            Side::Yellow => &self.yellow,
            Side::Red => &self.red,
        }
    }

    /// Parses rules from TOML; missing keys take the standard values.
    ///
    /// ```toml
    /// completion = "home_arrival"
    ///
    /// [red]
    /// outbound = [1, 2, 3, 2, 1]
    /// homebound = [3, 2, 1, 2, 3]
    /// ```
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, RulesError> {
        let rules: Self = toml::from_str(content)
            .map_err(|e| RulesError::new(format!("Failed to parse rules: {}", e)))?;
        rules.validate()?;
        debug!(completion = %rules.completion, "Rules parsed");
        Ok(rules)
    }

    /// Loads rules from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        debug!("Loading rules from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RulesError::new(format!("Failed to read rules file: {}", e)))?;
        let rules = Self::from_toml_str(&content)?;
        info!(completion = %rules.completion, "Rules loaded");
        Ok(rules)
    }

    fn validate(&self) -> Result<(), RulesError> {
        self.yellow.validate(Side::Yellow)?;
        self.red.validate(Side::Red)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            yellow: SpeedTable::YELLOW,
            red: SpeedTable::RED,
            completion: CompletionRule::Literal,
        }
    }
}

/// Rules configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Rules error: {} at {}:{}", message, file, line)]
pub struct RulesError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RulesError {
    /// Creates a new rules error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let rules = Rules::default();
        assert_eq!(rules.yellow().outbound(), &[1, 3, 2, 3, 1]);
        assert_eq!(rules.yellow().homebound(), &[3, 1, 2, 1, 3]);
        assert_eq!(rules.red().outbound(), &[1, 2, 3, 2, 1]);
        assert_eq!(rules.red().homebound(), &[3, 2, 1, 2, 3]);
        assert_eq!(*rules.completion(), CompletionRule::Literal);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Rules::from_toml_str("").unwrap(), Rules::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let rules = Rules::from_toml_str(
            r#"
            completion = "home_arrival"

            [red]
            outbound = [2, 2, 2, 2, 2]
            homebound = [1, 1, 1, 1, 1]
            "#,
        )
        .unwrap();
        assert_eq!(*rules.completion(), CompletionRule::HomeArrival);
        assert_eq!(rules.table(Side::Red).distance(Heading::Outbound, 3), 2);
        assert_eq!(rules.table(Side::Yellow), &SpeedTable::YELLOW);
    }

    #[test]
    fn test_zero_distance_rejected() {
        let err = Rules::from_toml_str(
            r#"
            [yellow]
            outbound = [1, 0, 2, 3, 1]
            homebound = [3, 1, 2, 1, 3]
            "#,
        )
        .unwrap_err();
        assert!(err.message.contains("outside 1..=6"));
    }

    #[test]
    fn test_new_rejects_oversized_distance() {
        let table = SpeedTable::new([7, 1, 1, 1, 1], [1, 1, 1, 1, 1]);
        let err = Rules::new(SpeedTable::YELLOW, table, CompletionRule::Literal).unwrap_err();
        assert!(err.message.contains("red"));
    }

    #[test]
    fn test_json_rules_with_zero_distance_rejected() {
        let json = r#"{
            "yellow": {"outbound": [0, 0, 0, 0, 0], "homebound": [3, 1, 2, 1, 3]},
            "red": {"outbound": [1, 2, 3, 2, 1], "homebound": [3, 2, 1, 2, 3]},
            "completion": "literal"
        }"#;
        assert!(serde_json::from_str::<Rules>(json).is_err());
    }

    #[test]
    fn test_json_speed_table_rejects_oversized_distance() {
        let json = r#"{"outbound": [1, 2, 3, 2, 1], "homebound": [3, 2, 9, 2, 3]}"#;
        assert!(serde_json::from_str::<SpeedTable>(json).is_err());
    }

    #[test]
    fn test_json_rules_round_trip() {
        let json = serde_json::to_string(&Rules::default()).unwrap();
        assert_eq!(serde_json::from_str::<Rules>(&json).unwrap(), Rules::default());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(Rules::from_toml_str("completion = 3").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "completion = \"literal\"\n").unwrap();
        assert_eq!(Rules::from_file(&path).unwrap(), Rules::default());
        assert!(Rules::from_file(dir.path().join("missing.toml")).is_err());
    }
}
