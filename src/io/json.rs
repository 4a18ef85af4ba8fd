use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::dynamics::estimate::CutoverEstimate;
use crate::errors::Result;
use crate::scenario::Scenario;
use crate::sim::event::StopReason;
use crate::sim::pipeline::{BankSource, Reconstruction};

/// Final simulated state with its runway-relative geometry.
#[derive(Debug, Clone, Serialize)]
pub struct FinalState {
    pub lat: f64,
    pub lon: f64,
    pub alt_ft: f64,
    pub speed_kts: f64,
    pub heading_deg: f64,
    pub bank_deg: f64,
    pub along_track_ft: f64,
    pub cross_track_ft: f64,
    pub heading_error_deg: f64,
}

/// Summary statistics of a reconstruction run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub cutover: CutoverEstimate,
    pub cutover_bank_deg: f64,
    pub bank_source: BankSource,
    pub descent_rate_fpm: f64,
    pub iterations: usize,
    pub history_points: usize,
    pub simulated_points: usize,
    pub stop: StopReason,
    pub complete: bool,
    #[serde(rename = "final")]
    pub final_state: FinalState,
    pub min_alt_ft: f64,
    pub max_alt_ft: f64,
    pub min_speed_kts: f64,
    pub max_speed_kts: f64,
}

impl RunSummary {
    pub fn new(scenario: &Scenario, rec: &Reconstruction) -> Self {
        let run = &rec.run;
        let s = &run.final_state;
        let g = &run.final_geometry;

        // initial state counts so an empty run still has extrema
        let alts = || std::iter::once(rec.initial.alt).chain(run.samples.iter().map(|x| x.alt));
        let speeds = || std::iter::once(rec.initial.speed).chain(run.samples.iter().map(|x| x.speed));

        RunSummary {
            scenario: scenario.name.clone(),
            cutover: rec.estimate.clone(),
            cutover_bank_deg: rec.cutover_bank,
            bank_source: rec.bank_source,
            descent_rate_fpm: rec.descent_rate_fpm,
            iterations: run.iterations,
            history_points: rec.history.len(),
            simulated_points: run.samples.len(),
            stop: run.stop,
            complete: run.stop.is_complete(),
            final_state: FinalState {
                lat: s.pos.lat,
                lon: s.pos.lon,
                alt_ft: s.alt,
                speed_kts: s.speed,
                heading_deg: s.heading,
                bank_deg: s.bank,
                along_track_ft: g.along_track,
                cross_track_ft: g.cross_track,
                heading_error_deg: g.heading_error,
            },
            min_alt_ft: alts().fold(f64::INFINITY, f64::min),
            max_alt_ft: alts().fold(f64::NEG_INFINITY, f64::max),
            min_speed_kts: speeds().fold(f64::INFINITY, f64::min),
            max_speed_kts: speeds().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Write the summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(writer: W, summary: &RunSummary) -> Result<()> {
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}

/// Write the summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &RunSummary) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_summary(file, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{LatLon, TrackPoint};
    use crate::physics::destination_point;
    use crate::post::roll::NoRollData;
    use crate::scenario::presets;
    use crate::sim::pipeline::reconstruct;
    use chrono::TimeDelta;

    fn straight_in(scenario: &Scenario) -> Vec<TrackPoint> {
        // three fixes flying the extended centerline toward the threshold
        (0..3)
            .map(|i| {
                let back = 10_000.0 + 100.0 * (2 - i) as f64;
                let p: LatLon = destination_point(scenario.runway.threshold, 134.5, back);
                TrackPoint {
                    time: scenario.cutover + TimeDelta::milliseconds(500 * (i - 2) as i64),
                    lon: p.lon,
                    lat: p.lat,
                    alt: 3000.0,
                }
            })
            .collect()
    }

    #[test]
    fn summary_json_has_sections() {
        let mut scenario = presets::north_las_vegas_30l();
        scenario.collision_point = None;
        let rec = reconstruct(&straight_in(&scenario), &scenario, &NoRollData).unwrap();
        let summary = RunSummary::new(&scenario, &rec);

        // already on centerline and heading: stops before the first step
        assert_eq!(summary.simulated_points, 0);
        assert_eq!(summary.min_alt_ft, 3000.0);
        assert!(summary.complete);

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["scenario"], "VGT-30L");
        assert!(v["stop"]["CenterlineCaptured"].is_object());
        assert!(v["final"]["cross_track_ft"].as_f64().unwrap().abs() < 50.0);
        assert_eq!(v["bank_source"], "Estimated");
        assert!(v["cutover"]["split_time"].is_string());
    }
}
