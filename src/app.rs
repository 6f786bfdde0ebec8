use eframe::egui;

use csv_sieve::config::ViewerConfig;
use csv_sieve::state::Session;

use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CsvSieveApp {
    pub session: Session,
}

impl CsvSieveApp {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            session: Session::new(config),
        }
    }
}

impl eframe::App for CsvSieveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_dropped_files(ctx, &mut self.session);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.session);
        });

        // ---- Left side panel: filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session);
            });

        // ---- Bottom panel: column information ----
        if let Some(loaded) = self.session.table() {
            egui::TopBottomPanel::bottom("column_info")
                .resizable(true)
                .default_height(180.0)
                .show(ctx, |ui| {
                    table::column_info(ui, loaded);
                });
        }

        // ---- Central panel: data grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::data_panel(ui, &self.session);
        });
    }
}
