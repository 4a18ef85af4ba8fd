pub mod csv;
pub mod json;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::Result;
use crate::scenario::Scenario;
use crate::sim::pipeline::Reconstruction;

pub use self::csv::{read_roll_csv, read_track_csv};
pub use self::json::{write_summary_file, RunSummary};

/// Paths of the files written for one reconstruction.
#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub track: PathBuf,
    pub roll: PathBuf,
    pub groundspeed: PathBuf,
    pub extended: PathBuf,
    pub summary: Option<PathBuf>,
}

impl OutputFiles {
    pub fn new(dir: &Path, prefix: &str, summary: bool) -> Self {
        Self {
            track: dir.join(format!("{prefix}_xyz.csv")),
            roll: dir.join(format!("{prefix}_roll.csv")),
            groundspeed: dir.join(format!("{prefix}_gs.csv")),
            extended: dir.join(format!("{prefix}_extended.csv")),
            summary: summary.then(|| dir.join(format!("{prefix}_summary.json"))),
        }
    }
}

/// Write every output file of a reconstruction.
pub fn write_outputs(files: &OutputFiles, scenario: &Scenario, rec: &Reconstruction) -> Result<()> {
    let track = rec.track();
    self::csv::write_track(BufWriter::new(File::create(&files.track)?), &track)?;
    info!(path = %files.track.display(), rows = track.len(), "track written");

    self::csv::write_series(BufWriter::new(File::create(&files.roll)?), &rec.bank)?;
    info!(path = %files.roll.display(), rows = rec.bank.len(), "roll written");

    self::csv::write_series(BufWriter::new(File::create(&files.groundspeed)?), &rec.groundspeed)?;
    info!(path = %files.groundspeed.display(), rows = rec.groundspeed.len(), "groundspeed written");

    self::csv::write_extended(
        BufWriter::new(File::create(&files.extended)?),
        &scenario.runway,
        &rec.history,
        &rec.run.samples,
    )?;
    info!(path = %files.extended.display(), "extended table written");

    if let Some(path) = &files.summary {
        write_summary_file(path, &RunSummary::new(scenario, rec))?;
        info!(path = %path.display(), "summary written");
    }
    Ok(())
}
