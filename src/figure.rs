use std::ops::Range;

use crate::data::model::PolarDataset;

/// Figure size in inches (width, height).
pub const FIGURE_SIZE_INCHES: (f64, f64) = (9.0, 6.0);
pub const DEFAULT_DPI: u32 = 150;
/// Highest DPI the CLI accepts (10800 × 7200 px).
pub const MAX_DPI: u32 = 1200;
/// Largest raster side the renderer will allocate.
pub const MAX_SIDE_PX: u32 = 16_384;
/// Fraction of each data span added on both sides of an axis.
const AXIS_PADDING: f64 = 0.05;

pub const X_LABEL: &str = "Angle of attack (degrees)";
pub const CL_LABEL: &str = "Lift coefficient, C_l";
pub const CD_LABEL: &str = "Drag coefficient, C_d";

// ---------------------------------------------------------------------------
// Axis ranges shared by the file renderer and the interactive viewer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub aoa: Range<f64>,
    pub cl: Range<f64>,
    pub cd: Range<f64>,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            aoa: 0.0..1.0,
            cl: 0.0..1.0,
            cd: 0.0..1.0,
        }
    }
}

impl FigureLayout {
    /// Padded ranges covering every row of every block.
    pub fn from_dataset(dataset: &PolarDataset) -> Self {
        let rows = dataset.blocks.iter().flat_map(|b| {
            b.aoa_cl
                .iter()
                .zip(b.aoa_cd.iter())
                .map(|(&(aoa, cl), &(_, cd))| (aoa, cl, cd))
        });

        let mut aoa = Extent::default();
        let mut cl = Extent::default();
        let mut cd = Extent::default();
        for (a, l, d) in rows {
            aoa.push(a);
            cl.push(l);
            cd.push(d);
        }

        let fallback = Self::default();
        Self {
            aoa: aoa.padded().unwrap_or(fallback.aoa),
            cl: cl.padded().unwrap_or(fallback.cl),
            cd: cd.padded().unwrap_or(fallback.cd),
        }
    }

    /// Transform that puts drag values onto the lift axis.
    pub fn cd_transform(&self) -> AxisTransform {
        AxisTransform {
            primary: self.cl.clone(),
            secondary: self.cd.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Extent {
    min: Option<f64>,
    max: Option<f64>,
}

impl Extent {
    fn push(&mut self, v: f64) {
        if !v.is_finite() {
            return;
        }
        self.min = Some(self.min.map_or(v, |m| m.min(v)));
        self.max = Some(self.max.map_or(v, |m| m.max(v)));
    }

    fn padded(&self) -> Option<Range<f64>> {
        let (min, max) = (self.min?, self.max?);
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return Some(min - 0.5..max + 0.5);
        }
        let pad = span * AXIS_PADDING;
        Some(min - pad..max + pad)
    }
}

// ---------------------------------------------------------------------------
// Secondary-axis mapping
// ---------------------------------------------------------------------------

/// Affine map between a secondary y range and the primary one.
///
/// Needed where a plot has only one y scale: secondary values are drawn
/// at `to_primary(v)` and the right-hand tick labels read `to_secondary(y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTransform {
    pub primary: Range<f64>,
    pub secondary: Range<f64>,
}

impl AxisTransform {
    fn scale(&self) -> f64 {
        (self.primary.end - self.primary.start) / (self.secondary.end - self.secondary.start)
    }

    pub fn to_primary(&self, v: f64) -> f64 {
        self.primary.start + (v - self.secondary.start) * self.scale()
    }

    pub fn to_secondary(&self, y: f64) -> f64 {
        self.secondary.start + (y - self.primary.start) / self.scale()
    }
}

/// Figure size in pixels for a DPI.
pub fn pixel_size(dpi: u32) -> (u32, u32) {
    let (w, h) = FIGURE_SIZE_INCHES;
    let dpi = f64::from(dpi.max(1));
    ((w * dpi).round() as u32, (h * dpi).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_polars;

    #[test]
    fn ranges_cover_all_blocks_with_padding() {
        let ds = parse_polars(
            "ZONE T=\"Re=5E5\"\n0 0.0 0 0.01\n10 1.0 10 0.03\nZONE T=\"Re=1E6\"\n-10 -0.5 -10 0.05\n",
        )
        .unwrap();
        let layout = FigureLayout::from_dataset(&ds);

        assert!((layout.aoa.start - -11.0).abs() < 1e-9);
        assert!((layout.aoa.end - 11.0).abs() < 1e-9);
        assert!((layout.cl.start - -0.575).abs() < 1e-9);
        assert!((layout.cl.end - 1.075).abs() < 1e-9);
        assert!((layout.cd.start - 0.008).abs() < 1e-9);
        assert!((layout.cd.end - 0.052).abs() < 1e-9);
    }

    #[test]
    fn flat_series_gets_a_unit_window() {
        let ds = parse_polars("ZONE T=\"Re=5E5\"\n2 0.5 2 0.01\n").unwrap();
        let layout = FigureLayout::from_dataset(&ds);
        assert_eq!(layout.aoa, 1.5..2.5);
    }

    #[test]
    fn empty_blocks_fall_back_to_defaults() {
        let ds = parse_polars("ZONE T=\"Re=5E5\"\n").unwrap();
        assert_eq!(FigureLayout::from_dataset(&ds), FigureLayout::default());
    }

    #[test]
    fn transform_round_trips_and_maps_ends() {
        let t = AxisTransform {
            primary: -0.5..1.5,
            secondary: 0.0..0.04,
        };
        assert!((t.to_primary(0.0) - -0.5).abs() < 1e-12);
        assert!((t.to_primary(0.04) - 1.5).abs() < 1e-12);
        assert!((t.to_secondary(t.to_primary(0.013)) - 0.013).abs() < 1e-12);
    }

    #[test]
    fn pixel_size_follows_dpi() {
        assert_eq!(pixel_size(DEFAULT_DPI), (1350, 900));
        assert_eq!(pixel_size(100), (900, 600));
        let (w, h) = pixel_size(MAX_DPI);
        assert!(w <= MAX_SIDE_PX && h <= MAX_SIDE_PX);
        // saturates instead of wrapping
        assert_eq!(pixel_size(u32::MAX).0, u32::MAX);
    }
}
