use std::path::PathBuf;

use eframe::egui::Color32;

use crate::color::{to_color32, zone_colors};
use crate::data::model::{PolarDataset, ReynoldsBlock};
use crate::figure::FigureLayout;
use crate::render::FigureOptions;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<PolarDataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Per-zone visibility, parallel to `dataset.blocks`.
    pub visible: Vec<bool>,

    /// Per-zone colour, parallel to `dataset.blocks`.
    pub colors: Vec<Color32>,

    /// Axis ranges over the whole dataset (kept fixed while toggling zones).
    pub layout: FigureLayout,

    /// Title and DPI used for "Save figure…".
    pub figure: FigureOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source: None,
            visible: Vec::new(),
            colors: Vec::new(),
            layout: FigureLayout::default(),
            figure: FigureOptions::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: every zone visible, fresh colours.
    pub fn set_dataset(&mut self, dataset: PolarDataset, source: Option<PathBuf>) {
        self.visible = vec![true; dataset.len()];
        self.colors = zone_colors(dataset.len())
            .into_iter()
            .map(to_color32)
            .collect();
        self.layout = FigureLayout::from_dataset(&dataset);

        self.dataset = Some(dataset);
        self.source = source;
        self.status_message = None;
    }

    /// Flip visibility of one zone.
    pub fn toggle_zone(&mut self, index: usize) {
        if let Some(v) = self.visible.get_mut(index) {
            *v = !*v;
        }
    }

    pub fn select_all(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = true);
    }

    pub fn select_none(&mut self) {
        self.visible.iter_mut().for_each(|v| *v = false);
    }

    /// Number of zones currently shown.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }

    /// Visible, non-empty blocks with their colours, in file order.
    pub fn visible_blocks(&self) -> Vec<(&ReynoldsBlock, Color32)> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        ds.blocks
            .iter()
            .zip(self.visible.iter())
            .zip(self.colors.iter())
            .filter(|((block, shown), _)| **shown && !block.is_empty())
            .map(|((block, _), &color)| (block, color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_polars;

    fn loaded() -> AppState {
        let ds = parse_polars(
            "ZONE T=\"Re=5E5\"\n0 0.4 0 0.01\nZONE T=\"Re=1E6\"\n0 0.5 0 0.009\nZONE T=\"Re=2E6\"\n",
        )
        .unwrap();
        let mut state = AppState::default();
        state.set_dataset(ds, None);
        state
    }

    #[test]
    fn new_dataset_shows_every_zone() {
        let state = loaded();
        assert_eq!(state.visible, vec![true, true, true]);
        assert_eq!(state.colors.len(), 3);
        // the empty third zone is never drawn
        assert_eq!(state.visible_blocks().len(), 2);
    }

    #[test]
    fn toggling_hides_and_restores() {
        let mut state = loaded();
        state.toggle_zone(0);
        let shown: Vec<&str> = state
            .visible_blocks()
            .into_iter()
            .map(|(b, _)| b.label.as_str())
            .collect();
        assert_eq!(shown, vec!["Re = 1×10^6"]);

        state.select_none();
        assert_eq!(state.visible_count(), 0);
        state.select_all();
        assert_eq!(state.visible_count(), 3);

        // out of range is ignored
        state.toggle_zone(42);
        assert_eq!(state.visible_count(), 3);
    }
}
