use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, PlotPoints, Points};

use exhibition_explorer::session::{BarChartModel, NO_DATA_MESSAGE, ScatterChart, ScatterModel};

use crate::state::AppState;

/// Click tolerance around a mark, in screen points.
const PICK_RADIUS: f32 = 8.0;
const MARK_RADIUS: f32 = 5.0;
const BAR_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Central panel: scatter plot on top, bar chart below
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.session.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore exhibitions  (File → Open…)");
        });
        return;
    }

    let Some(render) = &state.render else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Choose filters and press Apply");
        });
        return;
    };

    let chart = match &render.scatter {
        ScatterModel::NoData => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(NO_DATA_MESSAGE);
            });
            return;
        }
        ScatterModel::Chart(chart) => chart,
    };

    let scatter_height = ui.available_height() * 0.6;
    let clicked = scatter_plot(ui, chart, state, scatter_height);

    ui.separator();
    match &state.bar {
        Some(bar) => country_bar_chart(ui, bar),
        None => {
            ui.label("Click a point to see exhibitions by country.");
        }
    }

    if let Some(index) = clicked {
        state.select_mark(index);
    }
}

// ---------------------------------------------------------------------------
// Scatter plot: artist rows × exhibition year
// ---------------------------------------------------------------------------

/// Draw the scatter plot and return the index of a clicked mark, if any.
fn scatter_plot(ui: &mut Ui, chart: &ScatterChart, state: &AppState, height: f32) -> Option<usize> {
    let n_rows = chart.artists.len();
    // Highest-ranked artist on the top row.
    let row_y = move |row: usize| (n_rows - 1 - row) as f64;

    let row_names: Vec<String> = chart.artists.iter().map(|a| a.artist.clone()).collect();
    let tooltips: Vec<(String, [f64; 2], String)> = chart
        .marks
        .iter()
        .map(|m| (m.artist.clone(), [m.year as f64, row_y(m.row)], m.tooltip()))
        .collect();

    let mut plot = Plot::new("scatter_plot")
        .height(height)
        .x_axis_label("Year")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .include_y(-0.5)
        .include_y(n_rows as f64 - 0.5)
        .x_axis_formatter(|mark: GridMark, _range| format!("{:.0}", mark.value))
        .y_axis_formatter(move |mark: GridMark, _range| {
            let value = mark.value.round();
            if (mark.value - value).abs() > 1e-6 || value < 0.0 {
                return String::new();
            }
            row_names
                .get(n_rows.saturating_sub(1 + value as usize))
                .cloned()
                .unwrap_or_default()
        })
        .y_grid_spacer(move |_input| {
            (0..n_rows)
                .map(|i| GridMark {
                    value: i as f64,
                    step_size: 1.0,
                })
                .collect()
        })
        .label_formatter(move |name, value: &PlotPoint| {
            tooltips
                .iter()
                .filter(|(artist, _, _)| artist == name)
                .min_by(|(_, a, _), (_, b, _)| {
                    let da = (a[0] - value.x).powi(2) + (a[1] - value.y).powi(2);
                    let db = (b[0] - value.x).powi(2) + (b[1] - value.y).powi(2);
                    da.total_cmp(&db)
                })
                .map(|(_, _, text)| text.clone())
                .unwrap_or_default()
        });

    if let Some((lo, hi)) = chart.year_extent {
        plot = plot.include_x(lo as f64 - 1.0).include_x(hi as f64 + 1.0);
    }

    let response = plot.show(ui, |plot_ui| {
        for artist in &chart.artists {
            let points: PlotPoints = chart
                .marks
                .iter()
                .filter(|m| m.artist == artist.artist)
                .map(|m| [m.year as f64, row_y(m.row)])
                .collect();
            plot_ui.points(
                Points::new(points)
                    .name(&artist.artist)
                    .color(state.color_map.color_for(&artist.artist))
                    .radius(MARK_RADIUS),
            );
        }
    });

    if !response.response.clicked() {
        return None;
    }
    let pointer = response.response.interact_pointer_pos()?;
    chart
        .marks
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let pos = response
                .transform
                .position_from_point(&PlotPoint::new(m.year as f64, row_y(m.row)));
            (i, pos.distance(pointer))
        })
        .filter(|(_, d)| *d <= PICK_RADIUS)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Bar chart: exhibitions per country for the selected mark
// ---------------------------------------------------------------------------

fn country_bar_chart(ui: &mut Ui, model: &BarChartModel) {
    ui.heading(&model.title);

    let countries: Vec<String> = model.bars.iter().map(|b| b.country.clone()).collect();
    let ticks = model.axis.ticks.clone();

    let bars: Vec<Bar> = model
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.count as f64)
                .name(&b.country)
                .width(0.8)
        })
        .collect();

    Plot::new("country_bar_chart")
        .y_axis_label("Exhibitions")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_y(0.0)
        .include_y(model.axis.max as f64)
        .x_axis_formatter(move |mark: GridMark, _range| {
            let value = mark.value.round();
            if (mark.value - value).abs() > 1e-6 || value < 0.0 {
                return String::new();
            }
            countries.get(value as usize).cloned().unwrap_or_default()
        })
        .x_grid_spacer(move |input| {
            let (lo, hi) = input.bounds;
            (lo.ceil().max(0.0) as usize..=hi.floor().max(0.0) as usize)
                .map(|i| GridMark {
                    value: i as f64,
                    step_size: 1.0,
                })
                .collect()
        })
        .y_axis_formatter(|mark: GridMark, _range| format!("{:.0}", mark.value))
        .y_grid_spacer(move |_input| {
            ticks
                .iter()
                .map(|&t| GridMark {
                    value: t as f64,
                    step_size: 1.0,
                })
                .collect()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
        });
}
