use serde::Serialize;

// ---------------------------------------------------------------------------
// Lateral control phase
// ---------------------------------------------------------------------------

/// Phase of the approach controller. The only transition is
/// `ContinuingTurn -> RollingOut`; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ControlPhase {
    /// Holding the bank carried over from the recorded flight.
    #[default]
    ContinuingTurn,
    /// Rolling out and intercepting the extended centerline.
    RollingOut,
}

impl ControlPhase {
    /// Next phase given whether the hold-turn condition still applies.
    pub fn next(self, hold_turn: bool) -> ControlPhase {
        match self {
            ControlPhase::ContinuingTurn if hold_turn => ControlPhase::ContinuingTurn,
            _ => ControlPhase::RollingOut,
        }
    }

    pub fn is_rolling_out(self) -> bool {
        self == ControlPhase::RollingOut
    }

    /// Numeric marker used in tabular output (0 is reserved for recorded rows).
    pub fn marker(self) -> u8 {
        match self {
            ControlPhase::ContinuingTurn => 1,
            ControlPhase::RollingOut => 2,
        }
    }
}
