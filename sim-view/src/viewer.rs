//! Interactive growth model dashboard built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the input state ([`Config`])
//! and the last simulated [`TimeSeries`], and implements [`eframe::App`]
//! to draw parameter controls, the growth curve and the model sketches.
//! All numbers come from `growth_core`; this module only lays them out.

use eframe::App;
use glam::Vec2;
use growth_core::{
    GrowthModel, SimulationParameters, TimeSeries, config::Config, series::display_population,
    simulate, simulate_exponential,
};
use tracing::{debug, warn};

/// Samples per sketch curve.
const SKETCH_SAMPLES: usize = 200;
/// Carrying capacity of the idealised S-curve sketch.
const SKETCH_K: f32 = 100.0;

/// World-space window `[min, max]` that gets stretched over a screen rect.
///
/// World x is time and world y is population. The y-axis is flipped so that
/// larger populations are drawn higher up.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PlotFrame {
    min: Vec2,
    max: Vec2,
}

impl PlotFrame {
    /// Frame from the origin to the largest coordinates in `points`, with a
    /// little headroom on y.
    ///
    /// ### Parameters
    /// - `points` - World-space points that must be visible.
    /// - `y_guide` - Extra y value to keep in view, e.g. a carrying capacity line.
    fn around(points: &[Vec2], y_guide: Option<f32>) -> Self {
        let top = points.iter().fold(Vec2::ZERO, |acc, p| acc.max(*p));
        let y = y_guide.map_or(top.y, |g| top.y.max(g));
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(top.x, y * 1.05),
        }
    }

    fn span(&self) -> Vec2 {
        (self.max - self.min).max(Vec2::splat(f32::EPSILON))
    }

    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let u = (p - self.min) / self.span();
        egui::pos2(
            rect.left() + u.x * rect.width(),
            rect.bottom() - u.y * rect.height(),
        )
    }

    /// Inverse of [`PlotFrame::world_to_screen`], up to float rounding.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let u = Vec2::new(
            (p.x - rect.left()) / rect.width(),
            (rect.bottom() - p.y) / rect.height(),
        );
        self.min + u * self.span()
    }
}

/// Main application state for the dashboard.
///
/// ### Fields
/// - `defaults` - Config loaded at start-up; "Reset" returns to it.
/// - `cfg` - Values currently shown in the controls.
/// - `series` - Result of the last successful simulation.
/// - `error` - Message of the last rejected simulation, if any.
/// - `last_inputs` - Inputs of the last simulation, so unchanged frames
///   don't simulate again.
pub struct Viewer {
    defaults: Config,
    cfg: Config,
    series: Option<TimeSeries>,
    error: Option<String>,
    last_inputs: Option<(GrowthModel, SimulationParameters)>,
}

impl Viewer {
    pub fn new(cfg: Config) -> Self {
        let mut viewer = Self {
            defaults: cfg.clone(),
            cfg,
            series: None,
            error: None,
            last_inputs: None,
        };
        viewer.refresh();
        viewer
    }

    /// Inputs for the simulator, after forcing the controls into range.
    fn current_inputs(&self) -> (GrowthModel, SimulationParameters) {
        let cfg = self.cfg.clamp_inputs();
        (cfg.model, cfg.parameters(cfg.model))
    }

    /// Re-runs the simulation if any input changed since the last run.
    ///
    /// ### Returns
    /// `true` if a simulation was run.
    fn refresh(&mut self) -> bool {
        let inputs = self.current_inputs();
        if self.last_inputs == Some(inputs) {
            return false;
        }

        let (model, params) = inputs;
        match simulate(model, &params) {
            Ok(series) => {
                debug!(?model, samples = series.len(), "curve updated");
                self.series = Some(series);
                self.error = None;
            }
            Err(err) => {
                warn!(%err, ?model, "simulation rejected the inputs");
                self.series = None;
                self.error = Some(err.to_string());
            }
        }
        self.last_inputs = Some(inputs);
        true
    }

    fn reset(&mut self) {
        self.cfg = self.defaults.clone();
    }

    fn labeled_drag_count(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f64,
        range: std::ops::RangeInclusive<f64>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(
                egui::DragValue::new(value)
                    .range(range)
                    .speed(speed)
                    .fixed_decimals(0),
            );
        });
    }

    /// Builds the title bar with the short introduction.
    fn ui_top_panel(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("title_panel").show(ctx, |ui| {
            ui.heading("Interactive Biological Growth Models");
            ui.label(
                "Explore exponential growth (unlimited resources) and logistic growth \
                 (limited resources). Adjust the parameters on the left to see how the \
                 population changes over time.",
            );
        });
    }

    /// Builds the bottom status bar (sample count, time step, final value).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let Some((_, params)) = &self.last_inputs else {
                    return;
                };
                if let Some(dt) = params.time_step() {
                    ui.label(format!("dt = {dt:.4}"));
                }
                ui.label(format!("samples = {}", params.sample_count));
                if let Some(series) = &self.series {
                    ui.separator();
                    ui.label(format!("final N = {:.3}", series.final_population()));
                }
            });
        });
    }

    /// Builds the left-hand parameter panel.
    fn ui_params_panel(&mut self, ctx: &egui::Context) {
        let ranges = self.cfg.ranges;

        egui::SidePanel::left("params_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Model Parameters");

                ui.separator();
                ui.label("Choose Growth Model");
                for model in GrowthModel::ALL {
                    ui.radio_value(&mut self.cfg.model, model, model.label());
                }

                ui.separator();
                Self::labeled_drag_count(
                    ui,
                    "Initial population (N₀):",
                    &mut self.cfg.initial_population,
                    ranges.initial_population_min..=f64::MAX,
                    1.0,
                );
                ui.add(
                    egui::Slider::new(
                        &mut self.cfg.growth_rate,
                        ranges.growth_rate_min..=ranges.growth_rate_max,
                    )
                    .step_by(ranges.growth_rate_step)
                    .text("Growth rate (r)"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut self.cfg.duration,
                        ranges.duration_min..=ranges.duration_max,
                    )
                    .step_by(1.0)
                    .text("Time duration (t)"),
                );

                if self.cfg.model.uses_carrying_capacity() {
                    let min_k = self.cfg.min_carrying_capacity();
                    Self::labeled_drag_count(
                        ui,
                        "Carrying capacity (K):",
                        &mut self.cfg.carrying_capacity,
                        min_k..=f64::MAX,
                        1.0,
                    );
                }

                ui.separator();
                if ui.button("Reset to defaults").clicked() {
                    self.reset();
                }
            });
    }

    /// Builds the central panel: formula, curve, summary and sketches.
    fn ui_central_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let model = self.cfg.model;

            ui.heading(format!("{} Model", model.label()));
            ui.label(egui::RichText::new(model.formula()).monospace().size(16.0));
            ui.separator();

            if let Some(err) = &self.error {
                ui.colored_label(egui::Color32::RED, err);
            }

            if let Some(series) = &self.series {
                self.ui_curve(ui, model, series);
                ui.label(egui::RichText::new(summary_text(model, &self.cfg, series)).strong());
            }

            ui.separator();
            egui::CollapsingHeader::new("Show model sketches")
                .default_open(false)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for model in GrowthModel::ALL {
                            Self::ui_sketch(ui, model);
                        }
                    });
                });
        });
    }

    /// Draws the simulated curve with axes, a filled area and, for the
    /// logistic model, the carrying capacity line.
    fn ui_curve(&self, ui: &mut egui::Ui, model: GrowthModel, series: &TimeSeries) {
        let points = series_points(series);
        if !points.iter().all(|p| p.is_finite()) {
            ui.colored_label(
                egui::Color32::YELLOW,
                "Population overflowed the plottable range; try a smaller r or t.",
            );
            return;
        }

        let capacity = model
            .uses_carrying_capacity()
            .then_some(self.cfg.clamp_inputs().carrying_capacity as f32);
        let frame = PlotFrame::around(&points, capacity);

        let (response, painter) = ui.allocate_painter(
            egui::vec2(ui.available_width(), 320.0),
            egui::Sense::hover(),
        );
        let rect = response.rect.shrink(24.0);
        let text_color = ui.visuals().text_color();

        let (color, fill) = match model {
            GrowthModel::Exponential => (
                egui::Color32::from_rgb(0, 160, 0),
                egui::Color32::from_rgba_unmultiplied(144, 238, 144, 70),
            ),
            GrowthModel::Logistic => (
                egui::Color32::from_rgb(30, 90, 220),
                egui::Color32::from_rgba_unmultiplied(173, 216, 230, 70),
            ),
        };

        // Axes.
        let axis = egui::Stroke::new(1.0, text_color);
        painter.line_segment([rect.left_bottom(), rect.right_bottom()], axis);
        painter.line_segment([rect.left_bottom(), rect.left_top()], axis);
        painter.text(
            rect.center_bottom() + egui::vec2(0.0, 4.0),
            egui::Align2::CENTER_TOP,
            "Time",
            egui::FontId::proportional(12.0),
            text_color,
        );
        painter.text(
            rect.left_top() + egui::vec2(4.0, 0.0),
            egui::Align2::LEFT_TOP,
            "Population",
            egui::FontId::proportional(12.0),
            text_color,
        );

        draw_curve(&painter, rect, &frame, &points, color, Some(fill));

        if let Some(k) = capacity {
            let a = frame.world_to_screen(Vec2::new(frame.min.x, k), rect);
            let b = frame.world_to_screen(Vec2::new(frame.max.x, k), rect);
            painter.extend(egui::Shape::dashed_line(
                &[a, b],
                egui::Stroke::new(1.5, egui::Color32::RED),
                8.0,
                5.0,
            ));
            painter.text(
                b,
                egui::Align2::RIGHT_BOTTOM,
                "Carrying Capacity (K)",
                egui::FontId::proportional(11.0),
                egui::Color32::RED,
            );
        }

        // Hover readout.
        if let Some(hover) = response.hover_pos()
            && rect.contains(hover)
        {
            let w = frame.screen_to_world(hover, rect);
            painter.text(
                hover + egui::vec2(8.0, -8.0),
                egui::Align2::LEFT_BOTTOM,
                format!("t = {:.2}, N = {:.1}", w.x, w.y),
                egui::FontId::monospace(11.0),
                text_color,
            );
        }
    }

    /// Draws one small idealised curve for `model`.
    fn ui_sketch(ui: &mut egui::Ui, model: GrowthModel) {
        let points = sketch_points(model);
        let guide = model.uses_carrying_capacity().then_some(SKETCH_K);
        let frame = PlotFrame::around(&points, guide);

        ui.vertical(|ui| {
            ui.label(format!("{} {} curve", model.curve_shape(), model.label()));
            let (response, painter) =
                ui.allocate_painter(egui::vec2(200.0, 120.0), egui::Sense::hover());
            let rect = response.rect;
            painter.rect_filled(rect, 4.0, egui::Color32::BLACK);
            let rect = rect.shrink(8.0);

            let color = match model {
                GrowthModel::Exponential => egui::Color32::from_rgb(0, 255, 0),
                GrowthModel::Logistic => egui::Color32::from_rgb(0, 255, 255),
            };
            draw_curve(&painter, rect, &frame, &points, color, None);

            if let Some(k) = guide {
                let a = frame.world_to_screen(Vec2::new(frame.min.x, k), rect);
                let b = frame.world_to_screen(Vec2::new(frame.max.x, k), rect);
                painter.extend(egui::Shape::dashed_line(
                    &[a, b],
                    egui::Stroke::new(1.0, egui::Color32::RED),
                    4.0,
                    3.0,
                ));
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that rebuilds all panels each frame.
    ///
    /// Controls are drawn first so that the curve below reflects any
    /// change made in the same frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_params_panel(ctx);
        self.refresh();
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}

/// Converts a series into world-space points for drawing.
fn series_points(series: &TimeSeries) -> Vec<Vec2> {
    series
        .iter()
        .map(|p| Vec2::new(p.time as f32, p.population as f32))
        .collect()
}

/// Idealised curves shown in the sketch area.
///
/// - Exponential: `e^t` on `[0, 5]`, i.e. the exponential simulator with
///   `N0 = 1` and `r = 1`.
/// - Logistic: `K / (1 + 9 e^(-1.2 t))` on `[0, 8]` with `K = 100`.
fn sketch_points(model: GrowthModel) -> Vec<Vec2> {
    match model {
        GrowthModel::Exponential => {
            let params = SimulationParameters::new(1.0, 1.0, 5.0, SKETCH_SAMPLES);
            simulate_exponential(&params)
                .map(|series| series_points(&series))
                .unwrap_or_default()
        }
        GrowthModel::Logistic => (0..SKETCH_SAMPLES)
            .map(|i| {
                let t = 8.0 * i as f32 / (SKETCH_SAMPLES - 1) as f32;
                Vec2::new(t, SKETCH_K / (1.0 + 9.0 * (-1.2 * t).exp()))
            })
            .collect(),
    }
}

fn draw_curve(
    painter: &egui::Painter,
    rect: egui::Rect,
    frame: &PlotFrame,
    points: &[Vec2],
    color: egui::Color32,
    fill: Option<egui::Color32>,
) {
    if let Some(fill) = fill {
        for &p in points {
            let base = frame.world_to_screen(Vec2::new(p.x, frame.min.y), rect);
            let top = frame.world_to_screen(p, rect);
            painter.line_segment([base, top], egui::Stroke::new(1.0, fill));
        }
    }

    let line: Vec<egui::Pos2> = points
        .iter()
        .map(|&p| frame.world_to_screen(p, rect))
        .collect();
    painter.add(egui::Shape::line(line, egui::Stroke::new(2.5, color)));
}

/// One-line result shown under the curve.
///
/// The final population is truncated toward zero for display; an overflowed
/// value is reported as such.
fn summary_text(model: GrowthModel, cfg: &Config, series: &TimeSeries) -> String {
    let cfg = cfg.clamp_inputs();
    let final_value = match display_population(series.final_population()) {
        Some(n) => n.to_string(),
        None => "∞ (overflow)".to_string(),
    };

    match model {
        GrowthModel::Exponential => format!(
            "After {} time units, the population reaches approximately {final_value}.",
            cfg.duration
        ),
        GrowthModel::Logistic => format!(
            "Population approaches the carrying capacity (K = {}). Final value: {final_value}",
            cfg.carrying_capacity
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(10.0, 20.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let frame = PlotFrame {
            min: Vec2::ZERO,
            max: Vec2::new(20.0, 1050.0),
        };
        let rect = test_rect();

        let world_points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 500.0),
            Vec2::new(20.0, 1050.0),
            Vec2::new(3.5, 82.25),
        ];

        for p in world_points {
            let screen = frame.world_to_screen(p, rect);
            let back = frame.screen_to_world(screen, rect);

            assert!(
                (back.x - p.x).abs() < 1e-3 && (back.y - p.y).abs() < 1e-2,
                "roundtrip mismatch: p={:?}, back={:?}",
                p,
                back
            );
        }
    }

    #[test]
    fn world_origin_maps_to_bottom_left() {
        let frame = PlotFrame {
            min: Vec2::ZERO,
            max: Vec2::new(4.0, 8.0),
        };
        let rect = test_rect();

        assert_eq!(frame.world_to_screen(Vec2::ZERO, rect), rect.left_bottom());
        assert_eq!(
            frame.world_to_screen(Vec2::new(4.0, 8.0), rect),
            rect.right_top()
        );
    }

    #[test]
    fn frame_keeps_guide_line_in_view() {
        let points = [Vec2::new(0.0, 100.0), Vec2::new(20.0, 400.0)];

        let plain = PlotFrame::around(&points, None);
        assert_eq!(plain.min, Vec2::ZERO);
        assert_eq!(plain.max.x, 20.0);
        assert!((plain.max.y - 420.0).abs() < 1e-3);

        let guided = PlotFrame::around(&points, Some(1000.0));
        assert!((guided.max.y - 1050.0).abs() < 1e-3);
    }

    #[test]
    fn new_viewer_simulates_defaults() {
        let viewer = Viewer::new(Config::default());

        let series = viewer.series.as_ref().expect("defaults simulate");
        assert_eq!(series.len(), 500);
        assert!(viewer.error.is_none());
        assert_eq!(
            viewer.last_inputs.map(|(model, _)| model),
            Some(GrowthModel::Exponential)
        );
    }

    #[test]
    fn refresh_only_runs_when_inputs_change() {
        let mut viewer = Viewer::new(Config::default());
        assert!(!viewer.refresh());

        viewer.cfg.growth_rate = 0.5;
        assert!(viewer.refresh());
        assert!(!viewer.refresh());

        viewer.cfg.model = GrowthModel::Logistic;
        assert!(viewer.refresh());
        let last = viewer.series.as_ref().unwrap().final_population();
        assert!(last < 1000.0);
    }

    #[test]
    fn carrying_capacity_change_is_ignored_for_exponential() {
        let mut viewer = Viewer::new(Config::default());
        viewer.cfg.carrying_capacity = 5000.0;
        assert!(!viewer.refresh());
    }

    #[test]
    fn out_of_range_controls_are_clamped_before_simulating() {
        let mut viewer = Viewer::new(Config::default());
        viewer.cfg.model = GrowthModel::Logistic;
        viewer.cfg.carrying_capacity = 10.0;
        viewer.refresh();

        let (_, params) = viewer.last_inputs.unwrap();
        assert_eq!(params.carrying_capacity, Some(101.0));
        assert!(viewer.error.is_none());
    }

    #[test]
    fn reset_restores_loaded_config() {
        let loaded = Config {
            growth_rate: 0.8,
            ..Config::default()
        };
        let mut viewer = Viewer::new(loaded.clone());

        viewer.cfg.growth_rate = 0.1;
        viewer.cfg.model = GrowthModel::Logistic;
        viewer.reset();

        assert_eq!(viewer.cfg, loaded);
    }

    #[test]
    fn summary_reports_truncated_final_population() {
        let cfg = Config::default();

        let exp = simulate(GrowthModel::Exponential, &cfg.parameters(GrowthModel::Exponential))
            .unwrap();
        assert_eq!(
            summary_text(GrowthModel::Exponential, &cfg, &exp),
            "After 20 time units, the population reaches approximately 40342."
        );

        let log = simulate(GrowthModel::Logistic, &cfg.parameters(GrowthModel::Logistic)).unwrap();
        let text = summary_text(GrowthModel::Logistic, &cfg, &log);
        assert!(
            text.starts_with("Population approaches the carrying capacity (K = 1000). Final value: 9"),
            "{text}"
        );
    }

    #[test]
    fn summary_flags_overflow() {
        let cfg = Config {
            growth_rate: 1.0,
            duration: 50.0,
            initial_population: 1e300,
            ..Config::default()
        };
        let series = simulate(
            GrowthModel::Exponential,
            &cfg.parameters(GrowthModel::Exponential),
        )
        .unwrap();

        assert!(summary_text(GrowthModel::Exponential, &cfg, &series).ends_with("∞ (overflow)."));
    }

    #[test]
    fn sketches_follow_their_closed_forms() {
        let exp = sketch_points(GrowthModel::Exponential);
        assert_eq!(exp.len(), SKETCH_SAMPLES);
        assert_eq!(exp[0], Vec2::new(0.0, 1.0));
        assert!((exp[SKETCH_SAMPLES - 1].y - 5.0_f32.exp()).abs() < 1e-3);

        let log = sketch_points(GrowthModel::Logistic);
        assert_eq!(log.len(), SKETCH_SAMPLES);
        assert!((log[0].y - 10.0).abs() < 1e-4);
        assert!(log.iter().all(|p| p.y < SKETCH_K));
        assert!((log[SKETCH_SAMPLES - 1].x - 8.0).abs() < 1e-6);
    }
}
