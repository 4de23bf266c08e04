use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::export_dataset;
use crate::render::save_figure;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – zone toggles
// ---------------------------------------------------------------------------

/// Render the left panel: one checkbox per Reynolds zone.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Reynolds zones");
    ui.separator();

    let labels: Vec<(String, usize)> = match &state.dataset {
        Some(ds) => ds
            .blocks
            .iter()
            .map(|b| (b.label.clone(), b.len()))
            .collect(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, (label, rows)) in labels.iter().enumerate() {
                let color = state.colors.get(idx).copied().unwrap_or(Color32::GRAY);
                let text = RichText::new(format!("{label}  ({rows} rows)")).color(color);

                let mut checked = state.visible.get(idx).copied().unwrap_or(false);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_zone(idx);
                }
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
            let has_data = state.dataset.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Save figure…"))
                .clicked()
            {
                save_figure_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_data, egui::Button::new("Export data…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(name) = state.source.as_ref().and_then(|p| p.file_name()) {
            ui.strong(name.to_string_lossy().into_owned());
        }

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} zones, {} rows, {} shown",
                ds.len(),
                ds.row_count(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open polar data")
        .add_filter("JavaFoil data", &["dat", "txt"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset, Some(path)),
            Err(e) => report(state, anyhow::Error::new(e).context("loading polar data")),
        }
    }
}

fn save_figure_dialog(state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Save figure")
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .set_file_name("cl_cd_vs_aoa.png")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = save_figure(dataset, &path, &state.figure) {
            report(state, anyhow::Error::new(e).context("saving figure"));
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export polar data")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .set_file_name("polars.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_dataset(dataset, &path) {
            report(state, anyhow::Error::new(e).context("exporting data"));
        }
    }
}

fn report(state: &mut AppState, err: anyhow::Error) {
    log::error!("{err:#}");
    state.status_message = Some(format!("Error: {err:#}"));
}
