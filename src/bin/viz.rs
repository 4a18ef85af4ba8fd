use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use approach_sim::dynamics::state::{KinematicState, LatLon};
use approach_sim::physics::{bank_from_turn_rate, destination_point};
use approach_sim::scenario::{presets, Scenario};
use approach_sim::sim::{self, SimulationRun};

fn main() -> eframe::Result {
    let scenario = presets::north_las_vegas_30l();
    let (speed, turn_rate) = (113.0, -5.0);
    let bank = bank_from_turn_rate(speed, turn_rate);
    let initial = KinematicState {
        time: 0.0,
        pos: LatLon::new(36.2028, -115.1844),
        alt: 2270.0,
        speed,
        heading: 250.0,
        bank,
        turn_rate,
    };
    let run = sim::simulate(&initial, scenario.cutover, &scenario, bank);

    let app = ApproachViz { run, scenario };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Approach Reconstruction", options, Box::new(|_| Ok(Box::new(app))))
}

struct ApproachViz {
    run: SimulationRun,
    scenario: Scenario,
}

impl ApproachViz {
    /// Extended centerline from 2 nm out to the stop marker, in runway-relative feet.
    fn centerline(&self) -> Vec<[f64; 2]> {
        let rwy = &self.scenario.runway;
        let far = destination_point(rwy.threshold, rwy.heading + 180.0, 12_000.0);
        let past = destination_point(rwy.threshold, rwy.heading, 1_000.0);
        [far, past]
            .into_iter()
            .map(|p| {
                let xy = rwy.planar(p);
                [xy.x, xy.y]
            })
            .collect()
    }
}

impl eframe::App for ApproachViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let samples = &self.run.samples;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Scenario: {}", self.scenario.name));
            let fin = &self.run.final_geometry;
            ui.label(format!(
                "Stop: {:?}  |  Iterations: {}  |  Final cross-track: {:.0} ft  |  Heading error: {:.1} deg",
                self.run.stop, self.run.iterations, fin.cross_track, fin.heading_error,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Ground track, runway-relative
                ui.vertical(|ui| {
                    ui.label("Ground Track (ft from threshold)");
                    let track: PlotPoints = samples.iter().map(|s| [s.x_ft, s.y_ft]).collect();
                    let centerline = PlotPoints::from(self.centerline());
                    Plot::new("ground_track")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("East (ft)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Centerline", centerline));
                            plot_ui.line(Line::new("Track", track));
                        });
                });

                // Altitude vs Time
                ui.vertical(|ui| {
                    ui.label("Altitude (ft MSL)");
                    let points: PlotPoints = samples.iter().map(|s| [s.time, s.alt]).collect();
                    Plot::new("altitude")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Altitude", points));
                        });
                });
            });

            ui.horizontal(|ui| {
                // Bank vs Time
                ui.vertical(|ui| {
                    ui.label("Bank Angle (deg)");
                    let points: PlotPoints = samples.iter().map(|s| [s.time, s.bank]).collect();
                    Plot::new("bank")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Bank", points));
                        });
                });

                // Cross-track vs Time
                ui.vertical(|ui| {
                    ui.label("Cross-Track (ft, + right)");
                    let points: PlotPoints = samples.iter().map(|s| [s.time, s.cross_track]).collect();
                    Plot::new("cross_track")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Cross-track", points));
                        });
                });
            });
        });
    }
}
