use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use palette::Srgb;
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::color::zone_colors;
use crate::data::model::PolarDataset;
use crate::figure::{self, FigureLayout, CD_LABEL, CL_LABEL, X_LABEL};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to plot: every zone is empty")]
    Empty,

    #[error("unsupported figure format for {} (use .png, .jpg, .bmp or .svg)", path.display())]
    Unsupported { path: PathBuf },

    #[error("creating {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("figure of {width}×{height} px exceeds the {max} px limit per side; lower the DPI", max = figure::MAX_SIDE_PX)]
    TooLarge { width: u32, height: u32 },

    #[error("drawing figure: {0}")]
    Draw(String),

    #[error("encoding image")]
    Encode(#[from] image::ImageError),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

#[derive(Debug, Clone)]
pub struct FigureOptions {
    pub title: String,
    pub dpi: u32,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            title: "Airfoil Polars".to_string(),
            dpi: figure::DEFAULT_DPI,
        }
    }
}

enum Target {
    Svg,
    Raster(ImageFormat),
}

fn target_for(path: &Path) -> Result<Target, RenderError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "svg" => Ok(Target::Svg),
        "" | "png" => Ok(Target::Raster(ImageFormat::Png)),
        "jpg" | "jpeg" => Ok(Target::Raster(ImageFormat::Jpeg)),
        "bmp" => Ok(Target::Raster(ImageFormat::Bmp)),
        _ => Err(RenderError::Unsupported {
            path: path.to_path_buf(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Render the dual-axis Cl/Cd figure and write it to `path`.
///
/// `.svg` is written as vector output; everything else is rasterised at
/// `options.dpi` over a 9 × 6 inch canvas.
pub fn save_figure(
    dataset: &PolarDataset,
    path: &Path,
    options: &FigureOptions,
) -> Result<(), RenderError> {
    if dataset.row_count() == 0 {
        return Err(RenderError::Empty);
    }
    let target = target_for(path)?;
    let (width, height) = figure::pixel_size(options.dpi);
    if width > figure::MAX_SIDE_PX || height > figure::MAX_SIDE_PX {
        return Err(RenderError::TooLarge { width, height });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    match target {
        Target::Svg => {
            let root = SVGBackend::new(path, (width, height)).into_drawing_area();
            draw_figure(&root, dataset, options)?;
            root.present().map_err(draw_err)?;
        }
        Target::Raster(format) => {
            let mut buffer = vec![0u8; width as usize * height as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                    .into_drawing_area();
                draw_figure(&root, dataset, options)?;
                root.present().map_err(draw_err)?;
            }
            let img = RgbImage::from_raw(width, height, buffer)
                .ok_or_else(|| RenderError::Draw("pixel buffer size mismatch".into()))?;
            img.save_with_format(path, format)?;
        }
    }

    log::info!("Saved figure to {} ({width}×{height} px)", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn rgb(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &PolarDataset,
    options: &FigureOptions,
) -> Result<(), RenderError> {
    // Sizes in points, scaled to pixels for the chosen DPI.
    let pt = |points: f64| points * f64::from(options.dpi.max(1)) / 72.0;
    let text = ("sans-serif", pt(11.0));

    let layout = FigureLayout::from_dataset(dataset);
    let colors = zone_colors(dataset.len());

    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&options.title, ("sans-serif", pt(15.0)))
        .margin(pt(10.0) as u32)
        .x_label_area_size(pt(36.0) as u32)
        .y_label_area_size(pt(48.0) as u32)
        .right_y_label_area_size(pt(52.0) as u32)
        .build_cartesian_2d(layout.aoa.clone(), layout.cl.clone())
        .map_err(draw_err)?
        .set_secondary_coord(layout.aoa.clone(), layout.cd.clone());

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(CL_LABEL)
        .axis_desc_style(text)
        .label_style(text)
        .light_line_style(BLACK.mix(0.06))
        .bold_line_style(BLACK.mix(0.18))
        .draw()
        .map_err(draw_err)?;

    chart
        .configure_secondary_axes()
        .y_desc(CD_LABEL)
        .axis_desc_style(text)
        .label_style(text)
        .y_label_formatter(&|v: &f64| format!("{v:.3}"))
        .draw()
        .map_err(draw_err)?;

    let stroke = (pt(1.5) as u32).max(1);
    let marker = (pt(2.5) as i32).max(2);

    for (block, color) in dataset.blocks.iter().zip(colors) {
        if block.is_empty() {
            continue;
        }
        let series = block.sorted_series();
        let style = rgb(color).stroke_width(stroke);
        let fill = rgb(color).filled();

        chart
            .draw_series(LineSeries::new(
                series.iter().map(|&(aoa, cl, _)| (aoa, cl)),
                style,
            ))
            .map_err(draw_err)?
            .label(format!("C_l  {}", block.label))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        chart
            .draw_series(
                series
                    .iter()
                    .map(|&(aoa, cl, _)| Circle::new((aoa, cl), marker, fill)),
            )
            .map_err(draw_err)?;

        chart
            .draw_secondary_series(DashedLineSeries::new(
                series.iter().map(|&(aoa, _, cd)| (aoa, cd)),
                (pt(5.0) as u32).max(2),
                (pt(3.0) as u32).max(1),
                style,
            ))
            .map_err(draw_err)?
            .label(format!("C_d  {}", block.label))
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (7, 0)], style)
                    + PathElement::new(vec![(13, 0), (20, 0)], style)
            });
        chart
            .draw_secondary_series(series.iter().map(|&(aoa, _, cd)| {
                EmptyElement::at((aoa, cd))
                    + Rectangle::new([(-marker, -marker), (marker, marker)], fill)
            }))
            .map_err(draw_err)?;
    }

    chart
        .configure_series_labels()
        .label_font(text)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(draw_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_polars;

    #[test]
    fn picks_backend_from_extension() {
        assert!(matches!(target_for(Path::new("a.svg")), Ok(Target::Svg)));
        assert!(matches!(
            target_for(Path::new("a.PNG")),
            Ok(Target::Raster(ImageFormat::Png))
        ));
        assert!(matches!(
            target_for(Path::new("figure")),
            Ok(Target::Raster(ImageFormat::Png))
        ));
        assert!(matches!(
            target_for(Path::new("a.jpeg")),
            Ok(Target::Raster(ImageFormat::Jpeg))
        ));
        assert!(matches!(
            target_for(Path::new("a.pdf")),
            Err(RenderError::Unsupported { .. })
        ));
    }

    #[test]
    fn empty_dataset_is_rejected_before_touching_disk() {
        let ds = parse_polars("ZONE T=\"Re=5E5\"\n").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");

        let err = save_figure(&ds, &path, &FigureOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::Empty));
        assert!(!path.parent().unwrap().exists());
    }

    fn two_zones() -> PolarDataset {
        parse_polars(
            "TITLE = \"DU91-W2-250\"\n\
             ZONE T=\"Re=5E5\"\n-4 0.1 -4 0.012\n0 0.5 0 0.010\n4 0.9 4 0.011\n\
             ZONE T=\"Re=1E6\"\n-4 0.15 -4 0.011\n0 0.55 0 0.009\n4 0.95 4 0.010\n",
        )
        .unwrap()
    }

    #[test]
    fn huge_dpi_is_rejected_before_allocating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let options = FigureOptions {
            dpi: 50_000,
            ..FigureOptions::default()
        };

        match save_figure(&two_zones(), &path, &options).unwrap_err() {
            RenderError::TooLarge { width, height } => {
                assert_eq!((width, height), (450_000, 300_000));
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn png_lands_in_a_new_directory_at_figure_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");

        save_figure(&two_zones(), &path, &FigureOptions::default()).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), figure::pixel_size(figure::DEFAULT_DPI));
        assert_eq!((img.width(), img.height()), (1350, 900));
    }

    #[test]
    fn svg_output_is_a_vector_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polars.svg");

        save_figure(&two_zones(), &path, &FigureOptions::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.is_empty());
        assert!(svg.contains("<svg"), "{}", &svg[..svg.len().min(200)]);
    }
}
