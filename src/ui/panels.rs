use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use exhibition_explorer::data::filter::Selection;
use exhibition_explorer::data::model::{Gender, Status};
use exhibition_explorer::session::ScatterModel;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and summary numbers
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state below.
    let nationalities = match &state.session {
        Some(session) => session.dataset().nationalities.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("filter_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("Nationality");
                    egui::ComboBox::from_id_salt("nationality")
                        .selected_text(state.filters.nationality.to_string())
                        .show_ui(ui, |ui: &mut Ui| {
                            ui.selectable_value(&mut state.filters.nationality, Selection::All, "All");
                            for n in &nationalities {
                                ui.selectable_value(
                                    &mut state.filters.nationality,
                                    Selection::Only(n.clone()),
                                    n,
                                );
                            }
                        });
                    ui.end_row();

                    ui.label("Gender");
                    egui::ComboBox::from_id_salt("gender")
                        .selected_text(state.filters.gender.to_string())
                        .show_ui(ui, |ui: &mut Ui| {
                            ui.selectable_value(&mut state.filters.gender, Selection::All, "All");
                            for g in Gender::CHOICES {
                                let label = g.to_string();
                                ui.selectable_value(&mut state.filters.gender, Selection::Only(g), label);
                            }
                        });
                    ui.end_row();

                    ui.label("Status");
                    egui::ComboBox::from_id_salt("status")
                        .selected_text(state.filters.status.to_string())
                        .show_ui(ui, |ui: &mut Ui| {
                            ui.selectable_value(&mut state.filters.status, Selection::All, "All");
                            for s in Status::CHOICES {
                                let label = s.to_string();
                                ui.selectable_value(&mut state.filters.status, Selection::Only(s), label);
                            }
                        });
                    ui.end_row();

                    ui.label("Max age");
                    ui.add(
                        egui::TextEdit::singleline(&mut state.filters.max_age)
                            .hint_text("no limit")
                            .desired_width(80.0),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            if ui.button("Apply filters").clicked() {
                state.apply_filters();
            }

            ui.separator();
            summary(ui, state);
            ui.separator();
            top_artist_table(ui, state);
        });
}

fn summary(ui: &mut Ui, state: &AppState) {
    let Some(render) = &state.render else {
        return;
    };
    let stats = &render.stats;
    egui::Grid::new("summary_grid")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            for (label, value) in [
                ("Paintings", stats.paintings as usize),
                ("Countries", stats.countries),
                ("Cities", stats.cities),
                ("Exhibitions", stats.exhibitions),
            ] {
                ui.label(label);
                ui.strong(value.to_string());
                ui.end_row();
            }
        });
}

fn top_artist_table(ui: &mut Ui, state: &AppState) {
    let Some(ScatterModel::Chart(chart)) = state.render.as_ref().map(|r| &r.scatter) else {
        return;
    };

    ui.strong("Top artists");
    TableBuilder::new(ui)
        .id_salt("top_artists")
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Artist");
            });
            header.col(|ui| {
                ui.strong("Records");
            });
        })
        .body(|mut body| {
            for a in &chart.artists {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new(&a.artist).color(state.color_map.color_for(&a.artist)));
                    });
                    row.col(|ui| {
                        ui.label(a.count.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            match &state.render {
                Some(render) => ui.label(format!(
                    "{} records loaded, {} match",
                    session.dataset().len(),
                    render.filtered_count
                )),
                None => ui.label(format!("{} records loaded", session.dataset().len())),
            };
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open exhibition data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
