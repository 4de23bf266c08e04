use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{
    AxisHints, Corner, GridMark, HPlacement, Legend, Line, LineStyle, MarkerShape, Plot,
    PlotPoints, Points,
};

use crate::figure::{CD_LABEL, CL_LABEL, X_LABEL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dual-axis polar plot (central panel)
// ---------------------------------------------------------------------------

/// Render Cl (left axis) and Cd (right axis) against AoA.
///
/// egui_plot has a single y scale, so drag values are mapped onto the lift
/// range and the right-hand axis labels map them back.
pub fn polar_plot(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a polar file to plot  (File → Open…)");
        });
        return;
    }

    let layout = &state.layout;
    let transform = layout.cd_transform();
    let axis_transform = transform.clone();

    let y_axes = vec![
        AxisHints::new_y().label(CL_LABEL),
        AxisHints::new_y()
            .label(CD_LABEL)
            .placement(HPlacement::Right)
            .formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                format!("{:.3}", axis_transform.to_secondary(mark.value))
            }),
    ];

    Plot::new("polar_plot")
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label(X_LABEL)
        .custom_y_axes(y_axes)
        .include_x(layout.aoa.start)
        .include_x(layout.aoa.end)
        .include_y(layout.cl.start)
        .include_y(layout.cl.end)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (block, color) in state.visible_blocks() {
                let series = block.sorted_series();
                let cl_name = format!("C_l  {}", block.label);
                let cd_name = format!("C_d  {}", block.label);

                let cl_points: Vec<[f64; 2]> =
                    series.iter().map(|&(aoa, cl, _)| [aoa, cl]).collect();
                let cd_points: Vec<[f64; 2]> = series
                    .iter()
                    .map(|&(aoa, _, cd)| [aoa, transform.to_primary(cd)])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(cl_points.clone()))
                        .name(&cl_name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(cl_points))
                        .name(&cl_name)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(2.5),
                );

                plot_ui.line(
                    Line::new(PlotPoints::from(cd_points.clone()))
                        .name(&cd_name)
                        .color(color)
                        .width(2.0)
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(cd_points))
                        .name(&cd_name)
                        .color(color)
                        .shape(MarkerShape::Square)
                        .radius(2.5),
                );
            }
        });
}
