//! Lift/drag polar plotting for JavaFoil-style airfoil data files.
//!
//! `data` parses the `ZONE` blocks into a [`data::PolarDataset`]; `render`
//! writes the dual-axis figure to disk and `app` shows it in a window.

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod figure;
pub mod render;
pub mod state;
pub mod ui;
