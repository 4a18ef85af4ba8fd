use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::debug;

use crate::dynamics::state::{RollSample, TrackPoint};
use crate::errors::Result;
use crate::scenario::runway::RunwayGeometry;
use crate::sim::runner::Sample;

pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

pub const EXTENDED_HEADER: [&str; 11] = [
    "timeGE", "Longitude", "Latitude", "AltMSL", "X_ft", "Y_ft",
    "GS_kts", "Heading_deg", "Bank_deg", "TurnRate_dps", "Phase",
];

pub fn format_time(t: NaiveDateTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

/// Parse `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub fn parse_time(s: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S%.f")?)
}

/// Undecodable rows (bad UTF-8, broken quoting) count as skipped; only read
/// failures of the underlying source are errors.
fn decoded(
    rec: std::result::Result<StringRecord, csv::Error>,
    skipped: &mut usize,
) -> Result<Option<StringRecord>> {
    match rec {
        Ok(rec) => Ok(Some(rec)),
        Err(err) if err.is_io_error() => Err(err.into()),
        Err(err) => {
            debug!(%err, "skipping undecodable row");
            *skipped += 1;
            Ok(None)
        }
    }
}

fn field(rec: &StringRecord, i: usize) -> Option<f64> {
    rec.get(i)?.trim().parse().ok()
}

fn track_point(rec: &StringRecord) -> Option<TrackPoint> {
    Some(TrackPoint {
        time: parse_time(rec.get(0)?).ok()?,
        lon: field(rec, 1)?,
        lat: field(rec, 2)?,
        alt: field(rec, 3)?,
    })
}

fn roll_sample(rec: &StringRecord) -> Option<RollSample> {
    Some(RollSample {
        time: parse_time(rec.get(0)?).ok()?,
        bank: field(rec, 1)?,
    })
}

// ---------------------------------------------------------------------------
// Readers (malformed rows are skipped)
// ---------------------------------------------------------------------------

/// Recorded track with a header row: time, lon, lat, alt.
pub fn read_track<R: Read>(reader: R) -> Result<Vec<TrackPoint>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let Some(rec) = decoded(rec, &mut skipped)? else { continue };
        match track_point(&rec) {
            Some(p) => out.push(p),
            None => skipped += 1,
        }
    }
    debug!(rows = out.len(), skipped, "track read");
    Ok(out)
}

pub fn read_track_csv(path: impl AsRef<Path>) -> Result<Vec<TrackPoint>> {
    read_track(File::open(path)?)
}

/// Recorded roll without a header: time, bank.
pub fn read_roll<R: Read>(reader: R) -> Result<Vec<RollSample>> {
    let mut rdr = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(reader);
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let Some(rec) = decoded(rec, &mut skipped)? else { continue };
        match roll_sample(&rec) {
            Some(s) => out.push(s),
            None => skipped += 1,
        }
    }
    debug!(rows = out.len(), skipped, "roll read");
    Ok(out)
}

pub fn read_roll_csv(path: impl AsRef<Path>) -> Result<Vec<RollSample>> {
    read_roll(File::open(path)?)
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Headerless `time,lon,lat,alt` rows.
pub fn write_track<W: Write>(writer: W, track: &[TrackPoint]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    for p in track {
        wtr.write_record([format_time(p.time), p.lon.to_string(), p.lat.to_string(), p.alt.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Headerless `time,value` rows with one decimal.
pub fn write_series<W: Write>(writer: W, series: &[(NaiveDateTime, f64)]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    for (t, v) in series {
        wtr.write_record([format_time(*t), format!("{v:.1}")])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Full table: recorded history (phase 0, kinematic columns zeroed) followed
/// by the simulated samples.
pub fn write_extended<W: Write>(
    writer: W,
    runway: &RunwayGeometry,
    history: &[TrackPoint],
    samples: &[Sample],
) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(EXTENDED_HEADER)?;

    for p in history {
        let xy = runway.planar(p.position());
        wtr.write_record([
            format_time(p.time),
            p.lon.to_string(),
            p.lat.to_string(),
            format!("{:.2}", p.alt),
            format!("{:.2}", xy.x),
            format!("{:.2}", xy.y),
            "0.0".into(),
            "0.0".into(),
            "0.0".into(),
            "0.00".into(),
            "0".into(),
        ])?;
    }

    for s in samples {
        wtr.write_record([
            format_time(s.timestamp),
            s.lon.to_string(),
            s.lat.to_string(),
            format!("{:.2}", s.alt),
            format!("{:.2}", s.x_ft),
            format!("{:.2}", s.y_ft),
            format!("{:.1}", s.speed),
            format!("{:.1}", s.heading),
            format!("{:.1}", s.bank),
            format!("{:.2}", s.turn_rate),
            s.phase.marker().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
