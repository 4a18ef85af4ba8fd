use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use approach_sim::io::{self, OutputFiles};
use approach_sim::post::{CsvRollSource, NoRollData, RollSource};
use approach_sim::scenario::{presets, Scenario};
use approach_sim::sim::{reconstruct, Reconstruction};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "reconstruct an approach from a recorded track up to the cutover instant")]
struct Args {
    /// scenario RON file (defaults to the VGT runway 30L preset)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// recorded track CSV (time,lon,lat,alt with header)
    #[arg(short, long)]
    track: PathBuf,

    /// recorded roll CSV (time,bank without header)
    #[arg(short, long)]
    roll: Option<PathBuf>,

    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(short, long, default_value = "approach")]
    prefix: String,

    /// also write a JSON run summary
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => Scenario::from_ron_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => presets::north_las_vegas_30l(),
    };

    let track = io::read_track_csv(&args.track)
        .with_context(|| format!("reading track {}", args.track.display()))?;

    let roll: Box<dyn RollSource> = match &args.roll {
        Some(path) => Box::new(CsvRollSource::new(path)),
        None => Box::new(NoRollData),
    };

    let rec = reconstruct(&track, &scenario, roll.as_ref())?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let files = OutputFiles::new(&args.out_dir, &args.prefix, args.summary);
    io::write_outputs(&files, &scenario, &rec)?;

    print_report(&scenario, &rec, track.len());
    Ok(())
}

fn print_report(scenario: &Scenario, rec: &Reconstruction, recorded: usize) {
    let est = &rec.estimate;
    let run = &rec.run;
    let fin = &run.final_state;
    let g = &run.final_geometry;

    println!();
    println!("====================================================================");
    println!("  APPROACH RECONSTRUCTION: {}", scenario.name);
    println!("====================================================================");
    println!();
    println!("  Cutover");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Time:          {}    Recorded fixes: {} (split at {})",
        est.split_time, recorded, est.split_index
    );
    println!(
        "  Position:      {:>10.6}, {:>11.6}    Alt: {:>7.0} ft",
        rec.initial.pos.lat, rec.initial.pos.lon, rec.initial.alt
    );
    println!(
        "  Groundspeed:   {:>8.1} kts     Heading:    {:>7.1} deg",
        est.speed, est.heading
    );
    println!(
        "  Turn rate:     {:>8.2} deg/s   Radius:     {:>7.0} ft",
        est.turn_rate, est.radius_ft
    );
    println!(
        "  Bank:          {:>8.1} deg     ({:?}, estimated {:.1})",
        rec.cutover_bank, rec.bank_source, est.bank
    );
    println!("  Descent rate:  {:>8.0} fpm", rec.descent_rate_fpm);
    println!();

    println!("  Result");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Stop:          {:?}", run.stop);
    println!(
        "  Iterations:    {:>8}        Samples:    {:>7}",
        run.iterations,
        run.samples.len()
    );
    println!(
        "  Final:         hdg {:>5.1} deg   gs {:>5.1} kts   alt {:>6.0} ft",
        fin.heading, fin.speed, fin.alt
    );
    println!(
        "  Runway:        along {:>7.0} ft   cross {:>7.0} ft   hdg err {:>5.1} deg",
        g.along_track, g.cross_track, g.heading_error
    );
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>6}  {:>8}  {:>7}  {:>7}  {:>7}  {:>8}  {:>5}",
        "t (s)", "alt (ft)", "gs (kt)", "hdg", "bank", "xtk (ft)", "phase"
    );
    println!("  {}", "─".repeat(60));

    let interval = (run.samples.len() / 30).max(1);
    for (i, s) in run.samples.iter().enumerate() {
        if i % interval != 0 && i + 1 != run.samples.len() {
            continue;
        }
        println!(
            "  {:>6.1}  {:>8.0}  {:>7.1}  {:>7.1}  {:>7.1}  {:>8.0}  {:>5}",
            s.time,
            s.alt,
            s.speed,
            s.heading,
            s.bank,
            s.cross_track,
            s.phase.marker()
        );
    }

    println!();
    println!(
        "  Simulation: {} steps, dt={} s",
        run.samples.len(),
        scenario.sim.dt
    );
    println!("====================================================================");
    println!();
}
