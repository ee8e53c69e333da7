//! Plain data row types written by output backends.

/// Aggregate status counts at one reporting interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickCountsRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    pub waiting:      u64,
    pub evacuating:   u64,
    pub evacuated:    u64,
    pub dead:         u64,
}

/// One resident reaching shelter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvacuationRow {
    pub resident_id:  u32,
    /// Tick during which the shelter was reached.
    pub tick:         u64,
    /// Simulated seconds from run start to arrival.
    pub elapsed_secs: f64,
}
