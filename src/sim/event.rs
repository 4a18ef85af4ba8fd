use serde::Serialize;

use crate::scenario::runway::ApproachGeometry;

// ---------------------------------------------------------------------------
// Stop conditions
// ---------------------------------------------------------------------------

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StopReason {
    /// Along-track passed the threshold by the configured margin.
    PastThreshold { along_track: f64 },
    /// Established on centerline and runway heading.
    CenterlineCaptured { cross_track: f64, heading_error: f64 },
    /// Iteration cap reached without a stop condition; the run is incomplete.
    IterationCap,
}

impl StopReason {
    pub fn is_complete(&self) -> bool {
        !matches!(self, StopReason::IterationCap)
    }
}

/// Trait for stop detectors evaluated at the top of every step.
pub trait StopDetector {
    fn check(&self, geom: &ApproachGeometry) -> Option<StopReason>;
}

/// Fires once the aircraft is `margin_ft` past the threshold.
pub struct PastThresholdDetector {
    pub margin_ft: f64,
}

impl Default for PastThresholdDetector {
    fn default() -> Self {
        Self { margin_ft: 1000.0 }
    }
}

impl StopDetector for PastThresholdDetector {
    fn check(&self, geom: &ApproachGeometry) -> Option<StopReason> {
        (geom.along_track < -self.margin_ft)
            .then_some(StopReason::PastThreshold { along_track: geom.along_track })
    }
}

/// Fires when both cross-track and heading error are inside their bands.
pub struct CenterlineCaptureDetector {
    pub cross_track_ft: f64,
    pub heading_deg: f64,
}

impl Default for CenterlineCaptureDetector {
    fn default() -> Self {
        Self { cross_track_ft: 50.0, heading_deg: 5.0 }
    }
}

impl StopDetector for CenterlineCaptureDetector {
    fn check(&self, geom: &ApproachGeometry) -> Option<StopReason> {
        let captured = geom.cross_track.abs() < self.cross_track_ft
            && geom.heading_error.abs() < self.heading_deg;
        captured.then_some(StopReason::CenterlineCaptured {
            cross_track: geom.cross_track,
            heading_error: geom.heading_error,
        })
    }
}

/// Detectors used by the default runner, in evaluation order.
pub fn default_detectors() -> Vec<Box<dyn StopDetector>> {
    vec![
        Box::new(PastThresholdDetector::default()),
        Box::new(CenterlineCaptureDetector::default()),
    ]
}
