//! Controller telemetry payloads (`/counter`, `/valves`, `/gpm`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CounterResponse {
    pub counter: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GpmResponse {
    pub gpm: f64,
}

/// `/valves` maps valve numbers (as JSON object keys) to open/closed.
pub type ValveStates = BTreeMap<String, bool>;

/// One combined read of the controller's telemetry endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub water_counter: u64,
    pub gpm: f64,
    pub valves: ValveStates,
}

impl TelemetrySnapshot {
    /// Valve numbers currently open, in numeric order.
    pub fn open_valves(&self) -> Vec<u32> {
        let mut open: Vec<u32> = self
            .valves
            .iter()
            .filter(|(_, &is_open)| is_open)
            .filter_map(|(n, _)| n.parse().ok())
            .collect();
        open.sort_unstable();
        open
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = self.open_valves();
        let open = if open.is_empty() {
            "none".to_string()
        } else {
            open.iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        write!(
            f,
            "counter={} gpm={:.1} open valves={}",
            self.water_counter, self.gpm, open
        )
    }
}
