use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{GridInput, GridMark, Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::data::filter::ScatterChart;
use crate::state::AppState;

/// Largest wedge drawn as a single polygon; egui fills polygons as convex.
const MAX_WEDGE: f64 = TAU / 16.0;

/// Arc resolution (points per full turn).
const ARC_SEGMENTS: f64 = 180.0;

// ---------------------------------------------------------------------------
// Pie chart (upper half of the central panel)
// ---------------------------------------------------------------------------

pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = &state.pie;
    ui.heading(&pie.title);

    if pie.total() == 0 {
        ui.label(RichText::new(format!("No launches recorded for {}", state.site)).italics());
        return;
    }

    Plot::new("success_pie")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            // Clockwise from twelve o'clock, like the web chart.
            let mut start = FRAC_PI_2;
            for (idx, slice) in pie.slices.iter().enumerate() {
                if slice.value == 0 {
                    continue;
                }
                let fraction = pie.fraction(idx);
                let sweep = -fraction * TAU;
                let color = state.site_colors.color_for(&slice.label);

                for wedge in sector_polygons(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(wedge))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                // percent + label, like `textinfo='percent+label'`
                let mid = start + sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                        RichText::new(format!("{}\n{:.1}%", slice.label, fraction * 100.0))
                            .strong(),
                    )
                    .color(Color32::WHITE),
                );

                start += sweep;
            }
        });
}

/// Split a unit-circle sector into convex wedges no wider than [`MAX_WEDGE`].
/// `sweep` may be negative (clockwise).
pub fn sector_polygons(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    if sweep == 0.0 {
        return Vec::new();
    }
    let n_wedges = (sweep.abs() / MAX_WEDGE - 1e-9).ceil().max(1.0) as usize;
    let wedge_sweep = sweep / n_wedges as f64;
    let steps = ((wedge_sweep.abs() / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;

    (0..n_wedges)
        .map(|w| {
            let a0 = start + w as f64 * wedge_sweep;
            let mut points = Vec::with_capacity(steps + 2);
            points.push([0.0, 0.0]);
            for s in 0..=steps {
                let a = a0 + wedge_sweep * s as f64 / steps as f64;
                points.push([a.cos(), a.sin()]);
            }
            points
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart (lower half of the central panel)
// ---------------------------------------------------------------------------

pub fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    let scatter = &state.scatter;
    ui.heading(&scatter.title);
    if scatter.is_empty() {
        ui.label(RichText::new(format!("No launches in {}", state.payload_range)).italics());
    }

    let hover_chart = scatter.clone();

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Mission Outcome")
        .y_grid_spacer(|_input: GridInput| {
            vec![
                GridMark { value: 0.0, step_size: 1.0 },
                GridMark { value: 1.0, step_size: 1.0 },
            ]
        })
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            outcome_tick_label(mark.value)
        })
        .label_formatter(move |name: &str, value: &PlotPoint| {
            hover_label(&hover_chart, name, value)
        })
        .include_y(-0.5)
        .include_y(1.5)
        .include_x(state.payload_range.min_kg())
        .include_x(state.payload_range.max_kg())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (booster, points) in scatter.by_booster() {
                let series: PlotPoints = points
                    .iter()
                    .map(|p| [p.payload_kg, p.outcome.class() as f64])
                    .collect();

                plot_ui.points(
                    Points::new(series)
                        .name(booster)
                        .color(state.booster_colors.color_for(booster))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

/// Hover text.  Over a series, describe the launch under the cursor
/// (booster, site, payload, outcome); elsewhere just the payload.
pub fn hover_label(chart: &ScatterChart, name: &str, value: &PlotPoint) -> String {
    if name.is_empty() {
        return format!("{:.0} kg", value.x);
    }
    match chart.nearest(name, value.x, value.y) {
        Some(p) => format!(
            "{name}\n{}\n{:.0} kg\n{}",
            p.site, p.payload_kg, p.outcome
        ),
        None => format!("{name}\n{:.0} kg\n{}", value.x, outcome_tick_label(value.y.round())),
    }
}

/// Y axis ticks: `{0: "Failure", 1: "Success"}`, nothing in between.
pub fn outcome_tick_label(value: f64) -> String {
    if value == 0.0 {
        "Failure".to_string()
    } else if value == 1.0 {
        "Success".to_string()
    } else {
        String::new()
    }
}
