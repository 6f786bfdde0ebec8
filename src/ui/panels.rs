use eframe::egui::{self, Key, TextEdit, Ui};

use csv_sieve::state::Session;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, session: &mut Session) {
    ui.heading("Filter Data");
    ui.separator();

    let Some(table) = session.table() else {
        ui.label("No file loaded.");
        return;
    };
    // Owned copy so the session can be mutated below.
    let columns: Vec<String> = table
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    ui.label("Select column to filter by:");
    let current = session.selected_column.clone().unwrap_or_default();
    let mut picked = None;
    egui::ComboBox::from_id_salt("filter_column")
        .selected_text(current.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                if ui.selectable_label(current == *col, col.as_str()).clicked() {
                    picked = Some(col.clone());
                }
            }
        });
    if let Some(col) = picked {
        session.select_column(col);
    }

    if let Some(n) = session.selected_unique_count() {
        ui.label(format!("This column has {n} unique values"));
    }

    ui.add_space(8.0);
    ui.label("Enter value to match:");
    let response = ui.add(
        TextEdit::singleline(&mut session.filter_input).hint_text("exact value"),
    );
    if response.changed() {
        session.clear_filter();
    }
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

    if ui.button("Apply Filter").clicked() || submitted {
        session.apply_filter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &mut Session) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(session);
                ui.close_menu();
            }
            let has_file = session.file().is_some();
            if ui.add_enabled(has_file, egui::Button::new("Close")).clicked() {
                session.close();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(file) = session.file() {
            ui.label(format!(
                "{}    Rows: {}, Columns: {}",
                file.name,
                file.table.n_rows(),
                file.table.n_cols()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// File input
// ---------------------------------------------------------------------------

pub fn open_file_dialog(session: &mut Session) {
    let file = rfd::FileDialog::new()
        .set_title("Choose a CSV file")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        session.open_path(&path);
    }
}

/// Open the first file dropped onto the window, if any.
pub fn handle_dropped_files(ctx: &egui::Context, session: &mut Session) {
    let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
    let Some(file) = dropped else {
        return;
    };

    if let Some(path) = &file.path {
        session.open_path(path);
    } else if let Some(bytes) = &file.bytes {
        session.open_bytes(&file.name, bytes);
    } else {
        log::warn!("Dropped file '{}' has neither a path nor contents", file.name);
    }
}
