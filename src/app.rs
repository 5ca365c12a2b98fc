use std::path::Path;

use eframe::egui;

use crate::data::loader;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + slider ----
        egui::SidePanel::left("input_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie over scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.table.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a launch records file  (File → Open…)");
                });
                return;
            }

            // Leave room for the two chart headings.
            let chart_height = ((ui.available_height() - 80.0) / 2.0).max(120.0);
            charts::success_pie(ui, &self.state, chart_height);
            ui.separator();
            charts::payload_scatter(ui, &self.state, chart_height);
        });
    }
}

/// Load `path` into the state, reporting failures through the status bar.
pub fn load_into(state: &mut AppState, path: &Path) {
    match loader::load_file(path) {
        Ok(table) => {
            log::info!(
                "Loaded {} launches from {} ({} sites)",
                table.len(),
                path.display(),
                table.sites().len()
            );
            if table.is_empty() {
                log::warn!("{} contains no launch records", path.display());
            }
            state.set_table(table);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_sets_status_instead_of_failing() {
        let mut state = AppState::default();
        load_into(&mut state, Path::new("does/not/exist.csv"));

        assert!(state.table.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }
}
