use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column as GridColumn, TableBuilder};

use csv_sieve::data::{Table, summarize};
use csv_sieve::state::{Session, Status};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Central panel – status line and data grid
// ---------------------------------------------------------------------------

pub fn data_panel(ui: &mut Ui, session: &Session) {
    ui.heading("Data Table");

    if let Some(status) = &session.status {
        status_line(ui, status);
    }

    match session.visible_table() {
        Some(table) => data_grid(ui, table),
        None => usage(ui),
    }
}

fn status_line(ui: &mut Ui, status: &Status) {
    let text = match status {
        Status::Info(msg) => RichText::new(msg),
        Status::Warning(msg) => RichText::new(msg).color(Color32::YELLOW),
        Status::Error(msg) => RichText::new(msg).color(Color32::RED),
    };
    ui.label(text);
    ui.separator();
}

fn data_grid(ui: &mut Ui, table: &Table) {
    if table.n_cols() == 0 {
        return;
    }

    TableBuilder::new(ui)
        .id_salt("data_grid")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(GridColumn::auto().at_least(60.0).clip(true), table.n_cols())
        .header(HEADER_HEIGHT, |mut header| {
            for col in table.columns() {
                header.col(|ui| {
                    ui.strong(col.name());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.n_rows(), |mut row| {
                let idx = row.index();
                for cell in table.row(idx) {
                    row.col(|ui| {
                        if cell.is_null() {
                            ui.label(RichText::new(cell.to_string()).weak().italics());
                        } else {
                            ui.label(cell.to_string());
                        }
                    });
                }
            });
        });
}

fn usage(ui: &mut Ui) {
    ui.label("Please open a CSV file to get started (File → Open…, or drop a file here).");
    ui.add_space(12.0);
    ui.strong("How to use this app:");
    for step in [
        "1. Open a CSV file from the File menu or drag it onto the window",
        "2. The data is displayed as a table, with column information below",
        "3. Select a column to filter by in the left panel",
        "4. Enter a value to match",
        "5. Click 'Apply Filter' to show only the matching rows",
    ] {
        ui.label(step);
    }
}

// ---------------------------------------------------------------------------
// Bottom panel – per-column metadata
// ---------------------------------------------------------------------------

pub fn column_info(ui: &mut Ui, table: &Table) {
    ui.heading("Column Information");

    let summary = summarize(table);

    TableBuilder::new(ui)
        .id_salt("column_info")
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(GridColumn::auto().at_least(90.0), 4)
        .header(HEADER_HEIGHT, |mut header| {
            for title in ["Column", "Type", "Non-Null Count", "Null Count"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for info in &summary.columns {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(info.name.as_str());
                    });
                    row.col(|ui| {
                        ui.label(info.dtype.to_string());
                    });
                    row.col(|ui| {
                        ui.label(info.non_null.to_string());
                    });
                    row.col(|ui| {
                        ui.label(info.null.to_string());
                    });
                });
            }
        });
}
