//! Snapshot Types
//!
//! Serialization structs for full simulation state observations.
//!
//! A snapshot captures every agent's externally visible state at a tick
//! boundary, for plotting and export by out-of-process tooling. The engine
//! produces these through `RebellionManager::observe`.

use serde::{Deserialize, Serialize};

use crate::record::TickRecord;

/// Externally visible citizen status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CitizenStatus {
    /// Passive, not rebelling
    #[default]
    Quiescent,
    /// Openly rebelling
    Active,
    /// Serving a jail term, off the grid
    Jailed,
}

/// Per-citizen state at a tick boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenSnapshot {
    /// Index of the citizen in the population (stable for the run)
    pub id: u32,
    pub status: CitizenStatus,
    /// Grid cell, absent while jailed or awaiting re-placement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<(u32, u32)>,
    /// Perceived hardship in [0, 1]
    pub hardship: f64,
    /// Risk aversion in [0, 1], fixed at setup
    pub risk_aversion: f64,
    /// Remaining jail term; nonzero exactly when status is Jailed
    pub jail_term_remaining: u32,
}

/// Per-cop state at a tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopSnapshot {
    /// Index of the cop in the population (stable for the run)
    pub id: u32,
    pub position: (u32, u32),
}

/// Complete observation of the simulation at a tick boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    /// Tick the snapshot was taken at
    pub tick: u64,
    /// Aggregate counts for this tick
    pub counts: TickRecord,
    pub citizens: Vec<CitizenSnapshot>,
    pub cops: Vec<CopSnapshot>,
}

impl SimSnapshot {
    /// Creates an empty snapshot for the given tick.
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            counts: TickRecord::new(tick, 0, 0, 0),
            citizens: Vec::new(),
            cops: Vec::new(),
        }
    }

    /// Finds a citizen by id.
    pub fn find_citizen(&self, id: u32) -> Option<&CitizenSnapshot> {
        self.citizens.iter().find(|c| c.id == id)
    }

    /// Returns citizens with the given status.
    pub fn citizens_with_status(&self, status: CitizenStatus) -> Vec<&CitizenSnapshot> {
        self.citizens.iter().filter(|c| c.status == status).collect()
    }

    /// Serializes the snapshot to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> SimSnapshot {
        let mut snapshot = SimSnapshot::new(10);
        snapshot.counts = TickRecord::new(10, 1, 1, 1);
        snapshot.citizens.push(CitizenSnapshot {
            id: 0,
            status: CitizenStatus::Active,
            position: Some((3, 4)),
            hardship: 0.9,
            risk_aversion: 0.1,
            jail_term_remaining: 0,
        });
        snapshot.citizens.push(CitizenSnapshot {
            id: 1,
            status: CitizenStatus::Jailed,
            position: None,
            hardship: 0.5,
            risk_aversion: 0.5,
            jail_term_remaining: 12,
        });
        snapshot.citizens.push(CitizenSnapshot {
            id: 2,
            status: CitizenStatus::Quiescent,
            position: Some((0, 0)),
            hardship: 0.2,
            risk_aversion: 0.8,
            jail_term_remaining: 0,
        });
        snapshot.cops.push(CopSnapshot {
            id: 0,
            position: (9, 9),
        });
        snapshot
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&CitizenStatus::Quiescent).unwrap(),
            r#""quiescent""#
        );
        assert_eq!(
            serde_json::to_string(&CitizenStatus::Active).unwrap(),
            r#""active""#
        );
        assert_eq!(
            serde_json::to_string(&CitizenStatus::Jailed).unwrap(),
            r#""jailed""#
        );
    }

    #[test]
    fn test_find_citizen() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.find_citizen(1).unwrap().jail_term_remaining, 12);
        assert!(snapshot.find_citizen(99).is_none());
    }

    #[test]
    fn test_citizens_with_status() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.citizens_with_status(CitizenStatus::Active).len(), 1);
        assert_eq!(snapshot.citizens_with_status(CitizenStatus::Jailed).len(), 1);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let snapshot = sample_snapshot();
        let json = snapshot.to_json().unwrap();

        // Jailed citizen's absent position is omitted from the payload
        assert!(json.contains(r#""status":"jailed""#));

        let parsed = SimSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
