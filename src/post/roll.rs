use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::dynamics::estimate::secs_between;
use crate::dynamics::state::{RollSample, TrackPoint};
use crate::sim::runner::Sample;

// ---------------------------------------------------------------------------
// Recorded bank angle series
// ---------------------------------------------------------------------------

/// Recorded roll samples sorted by time.
#[derive(Debug, Clone, Default)]
pub struct RollSeries {
    samples: Vec<RollSample>,
}

impl RollSeries {
    pub fn new(mut samples: Vec<RollSample>) -> Self {
        samples.sort_by_key(|s| s.time);
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[RollSample] {
        &self.samples
    }

    /// Linear interpolation at `time`. Outside the recorded range the nearest
    /// end value is held. `None` only for an empty series.
    pub fn interpolate(&self, time: NaiveDateTime) -> Option<f64> {
        let first = self.samples.first()?;
        // index of the first sample strictly after `time`
        let next = self.samples.partition_point(|s| s.time <= time);
        if next == 0 {
            return Some(first.bank);
        }
        let prev = &self.samples[next - 1];
        let Some(after) = self.samples.get(next) else {
            return Some(prev.bank);
        };
        if prev.time == time {
            return Some(prev.bank);
        }
        let span = secs_between(prev.time, after.time);
        let t = secs_between(prev.time, time) / span;
        Some(prev.bank + t * (after.bank - prev.bank))
    }
}

// ---------------------------------------------------------------------------
// Optional roll data providers
// ---------------------------------------------------------------------------

/// Provider of recorded bank angles. `None` means no data is available and
/// callers fall back to bank angles estimated from the track.
pub trait RollSource {
    fn roll_series(&self) -> Option<RollSeries>;
}

/// No recorded roll data.
pub struct NoRollData;

impl RollSource for NoRollData {
    fn roll_series(&self) -> Option<RollSeries> {
        None
    }
}

impl RollSource for RollSeries {
    fn roll_series(&self) -> Option<RollSeries> {
        (!self.is_empty()).then(|| self.clone())
    }
}

/// Headerless `time,bank` CSV file. A missing, unreadable or empty file
/// yields no data.
pub struct CsvRollSource {
    pub path: PathBuf,
}

impl CsvRollSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl RollSource for CsvRollSource {
    fn roll_series(&self) -> Option<RollSeries> {
        match crate::io::csv::read_roll_csv(&self.path) {
            Ok(samples) if !samples.is_empty() => {
                debug!(path = %self.path.display(), samples = samples.len(), "roll data loaded");
                Some(RollSeries::new(samples))
            }
            Ok(_) => {
                warn!(path = %self.path.display(), "roll file has no usable rows");
                None
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "roll file unavailable");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Merged bank output
// ---------------------------------------------------------------------------

/// Recorded bank interpolated at each history fix (omitted without roll data),
/// followed by the simulated bank of every sample.
pub fn merge_bank_series(
    history: &[TrackPoint],
    recorded: Option<&RollSeries>,
    samples: &[Sample],
) -> Vec<(NaiveDateTime, f64)> {
    let mut out = Vec::with_capacity(history.len() + samples.len());
    if let Some(series) = recorded {
        out.extend(
            history
                .iter()
                .filter_map(|p| series.interpolate(p.time).map(|bank| (p.time, bank))),
        );
    }
    out.extend(samples.iter().map(|s| (s.timestamp, s.bank)));
    out
}
