use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PolarPlotApp {
    pub state: AppState,
}

impl PolarPlotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Default for PolarPlotApp {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl eframe::App for PolarPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: zone toggles ----
        egui::SidePanel::left("zone_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::polar_plot(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn run_viewer(state: AppState, title: &str) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(|_cc| Ok(Box::new(PolarPlotApp::new(state)))),
    )
}
