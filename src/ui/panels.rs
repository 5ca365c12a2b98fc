use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::SiteFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dropdown and payload slider
// ---------------------------------------------------------------------------

/// Render the left input panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("SpaceX Launch Records Dashboard").color(Color32::from_rgb(80, 61, 54)));
    });
    ui.separator();

    let sites: Vec<String> = match &state.table {
        Some(table) => table.sites().iter().cloned().collect(),
        None => {
            ui.label("No launch records loaded.");
            return;
        }
    };

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    let mut selected = state.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, SiteFilter::All, "All Sites");
            for site in sites {
                let label = site.clone();
                ui.selectable_value(&mut selected, SiteFilter::Site(site), label);
            }
        });
    state.set_site(selected);

    ui.add_space(12.0);

    // ---- Payload range slider ----
    ui.strong("Payload range (Kg):");
    let bounds = state.slider_bounds();
    let mut min_kg = state.payload_range.min_kg();
    let mut max_kg = state.payload_range.max_kg();

    let min_changed = ui
        .add(payload_slider(&mut min_kg, bounds.min_kg(), bounds.max_kg(), state.slider_step).text("min"))
        .changed();
    let max_changed = ui
        .add(payload_slider(&mut max_kg, bounds.min_kg(), bounds.max_kg(), state.slider_step).text("max"))
        .changed();

    let mut range = state.payload_range;
    if min_changed {
        range = range.with_min(min_kg);
    }
    if max_changed {
        range = range.with_max(max_kg);
    }
    state.set_payload_range(range);

    if ui.small_button("Reset range").clicked() {
        state.set_payload_range(state.observed_bounds());
    }
}

fn payload_slider(value: &mut f64, lo: f64, hi: f64, step: f64) -> egui::Slider<'_> {
    let slider = egui::Slider::new(value, lo..=hi).suffix(" kg");
    if step > 0.0 {
        slider.step_by(step)
    } else {
        slider
    }
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

        if let Some(summary) = state.summary() {
            ui.label(summary);
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
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        crate::app::load_into(state, &path);
    }
}
