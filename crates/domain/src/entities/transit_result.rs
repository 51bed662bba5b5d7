//! Nearest-station lookup result

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// One step of the pedestrian route to the station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkingStep {
    /// Human-readable instruction, e.g. "Turn left onto Queen's Road"
    pub instruction: String,
    /// Distance as reported by the backend, e.g. "50m"
    pub distance: String,
}

impl WalkingStep {
    /// Create a walking step
    #[must_use]
    pub fn new(instruction: impl Into<String>, distance: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            distance: distance.into(),
        }
    }
}

impl fmt::Display for WalkingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.instruction, self.distance)
    }
}

/// Accessibility features per station exit
///
/// Exits are ordered by identifier. Features keep the order in which they
/// were supplied, with blanks and duplicates removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessibility {
    exits: BTreeMap<String, Vec<String>>,
}

impl Accessibility {
    /// No accessibility information
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from `(exit, features)` pairs
    ///
    /// Exits whose identifier is blank are skipped.
    pub fn from_exits<I, F>(exits: I) -> Self
    where
        I: IntoIterator<Item = (String, F)>,
        F: IntoIterator<Item = String>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (exit, features) in exits {
            let exit = exit.trim();
            if exit.is_empty() {
                continue;
            }
            let entry = map.entry(exit.to_string()).or_default();
            for feature in features {
                let feature = feature.trim();
                if !feature.is_empty() && !entry.iter().any(|f| f == feature) {
                    entry.push(feature.to_string());
                }
            }
        }
        Self { exits: map }
    }

    /// Exits that have at least one feature, in exit order
    pub fn exits_with_features(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.exits
            .iter()
            .filter(|(_, features)| !features.is_empty())
            .map(|(exit, features)| (exit.as_str(), features.as_slice()))
    }

    /// Features listed for one exit
    #[must_use]
    pub fn features(&self, exit: &str) -> Option<&[String]> {
        self.exits.get(exit).map(Vec::as_slice)
    }

    /// True when no exit carries any feature
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exits.values().all(Vec::is_empty)
    }
}

/// The nearest station to a queried location, with walking guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitResult {
    /// Station display name
    pub station_name: String,
    /// Where the user is (as resolved by the backend)
    pub input_location: GeoLocation,
    /// Where the station is
    pub station_location: GeoLocation,
    /// Ordered walking steps from input to station
    pub walking_directions: Vec<WalkingStep>,
    /// Per-exit accessibility features
    pub accessibility: Accessibility,
}

impl TransitResult {
    /// Straight-line distance between input and station in meters
    #[must_use]
    pub fn straight_line_meters(&self) -> f64 {
        self.input_location.distance_km(&self.station_location) * 1000.0
    }
}

impl fmt::Display for TransitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} steps from {})",
            self.station_name,
            self.walking_directions.len(),
            self.input_location
        )
    }
}
